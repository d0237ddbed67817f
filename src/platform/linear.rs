//! Linear tracker implementation (GraphQL over reqwest)

use crate::error::{Error, Result};
use crate::platform::TicketSource;
use crate::reconcile::{matches_all, normalize_labels};
use crate::types::{Attachment, Ticket, WorkflowState};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

/// Linear GraphQL endpoint
pub const LINEAR_API_URL: &str = "https://api.linear.app/graphql";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const TEAMS_QUERY: &str = r"
    query Teams($after: String) {
        teams(first: 50, after: $after) {
            nodes { id key name }
            pageInfo { hasNextPage endCursor }
        }
    }
";

const TEAM_ISSUES_QUERY: &str = r"
    query TeamIssues($teamId: ID!, $after: String) {
        issues(filter: { team: { id: { eq: $teamId } } }, first: 50, after: $after) {
            nodes {
                id
                identifier
                title
                url
                priority
                state { name type }
                labels(first: 50) { nodes { name } }
                attachments(first: 50) { nodes { url title subtitle } }
            }
            pageInfo { hasNextPage endCursor }
        }
    }
";

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Connection<T> {
    nodes: Vec<T>,
    page_info: Option<PageInfo>,
}

#[derive(Deserialize)]
struct Nodes<T> {
    nodes: Vec<T>,
}

#[derive(Deserialize)]
struct TeamsData {
    teams: Connection<LinearTeam>,
}

#[derive(Deserialize)]
struct IssuesData {
    issues: Connection<IssueNode>,
}

/// A Linear team
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinearTeam {
    /// Team ID
    pub id: String,
    /// Short key used in identifiers (e.g. "ENG")
    pub key: Option<String>,
    /// Display name
    pub name: Option<String>,
}

#[derive(Deserialize)]
struct StateNode {
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Deserialize)]
struct LabelNode {
    name: Option<String>,
}

#[derive(Deserialize)]
struct AttachmentNode {
    url: Option<String>,
    title: Option<String>,
    subtitle: Option<String>,
}

#[derive(Deserialize)]
struct IssueNode {
    id: String,
    identifier: String,
    title: String,
    url: Option<String>,
    priority: Option<f64>,
    state: Option<StateNode>,
    labels: Option<Nodes<LabelNode>>,
    attachments: Option<Nodes<AttachmentNode>>,
}

impl From<IssueNode> for Ticket {
    #[allow(clippy::cast_possible_truncation)]
    fn from(node: IssueNode) -> Self {
        let tags = node
            .labels
            .map(|l| l.nodes.into_iter().filter_map(|n| n.name).collect())
            .unwrap_or_default();

        let attachments = node
            .attachments
            .map(|a| {
                a.nodes
                    .into_iter()
                    .filter_map(|n| {
                        let url = n.url.filter(|u| !u.is_empty())?;
                        Some(Attachment {
                            url,
                            title: n.title.filter(|t| !t.is_empty()),
                            subtitle: n.subtitle.filter(|s| !s.is_empty()),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        let (state, workflow_state) = node.state.map_or((None, None), |s| {
            (
                s.name.filter(|n| !n.is_empty()),
                s.kind.as_deref().and_then(WorkflowState::from_linear_type),
            )
        });

        Self {
            id: node.id,
            identifier: node.identifier,
            title: node.title,
            url: node.url,
            state,
            workflow_state,
            // Linear reports priority as a float in 0..=4
            priority: node.priority.map(|p| p as i64),
            tags,
            attachments,
        }
    }
}

/// Pick the team matching `identifier` by id, then key, then name
///
/// Matching is case-insensitive and ignores surrounding whitespace.
pub fn find_team<'a>(teams: &'a [LinearTeam], identifier: &str) -> Option<&'a LinearTeam> {
    let wanted = identifier.trim().to_lowercase();
    let eq = |value: Option<&str>| value.is_some_and(|v| v.to_lowercase() == wanted);

    teams
        .iter()
        .find(|t| eq(Some(&t.id)))
        .or_else(|| teams.iter().find(|t| eq(t.key.as_deref())))
        .or_else(|| teams.iter().find(|t| eq(t.name.as_deref())))
}

/// Linear service using reqwest
pub struct LinearService {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl LinearService {
    /// Create a service against the public Linear API
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_endpoint(api_key, LINEAR_API_URL)
    }

    /// Create a service against a custom GraphQL endpoint
    pub fn with_endpoint(api_key: &str, endpoint: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("linear-roadmap-sync")
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::LinearApi(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            endpoint: endpoint.to_string(),
        })
    }

    async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", &self.api_key)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::LinearApi(format!(
                "request failed with status {status}: {}",
                body.trim()
            )));
        }

        let parsed: GraphQlResponse<T> = response.json().await?;

        if let Some(errors) = parsed.errors
            && !errors.is_empty()
        {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::LinearApi(format!(
                "GraphQL error: {}",
                messages.join(", ")
            )));
        }

        parsed
            .data
            .ok_or_else(|| Error::LinearApi("No data in GraphQL response".to_string()))
    }

    /// Fetch every page of a connection
    async fn collect_pages<T, D, F>(
        &self,
        query: &str,
        mut variables: Value,
        extract: F,
    ) -> Result<Vec<T>>
    where
        D: DeserializeOwned,
        F: Fn(D) -> Connection<T> + Send + Sync,
    {
        let mut all = Vec::new();
        loop {
            let data: D = self.query(query, variables.clone()).await?;
            let page = extract(data);
            all.extend(page.nodes);

            match page.page_info {
                Some(PageInfo {
                    has_next_page: true,
                    end_cursor: Some(cursor),
                }) => variables["after"] = Value::String(cursor),
                _ => break,
            }
        }
        Ok(all)
    }

    /// List every team visible to the API key
    pub async fn list_teams(&self) -> Result<Vec<LinearTeam>> {
        self.collect_pages(TEAMS_QUERY, json!({ "after": null }), |d: TeamsData| d.teams)
            .await
    }

    /// Resolve a team by id, key, or name
    pub async fn resolve_team(&self, identifier: &str) -> Result<LinearTeam> {
        if identifier.trim().is_empty() {
            return Err(Error::Config(
                "Linear team identifier must not be empty.".to_string(),
            ));
        }

        let teams = self.list_teams().await?;
        debug!(count = teams.len(), "listed Linear teams");
        find_team(&teams, identifier)
            .cloned()
            .ok_or_else(|| Error::TeamNotFound(identifier.to_string()))
    }
}

#[async_trait]
impl TicketSource for LinearService {
    async fn fetch_tickets(&self, team: &str, tags: &[String]) -> Result<Vec<Ticket>> {
        let team = self.resolve_team(team).await?;
        debug!(team_id = %team.id, ?tags, "fetching Linear tickets");

        let nodes = self
            .collect_pages(
                TEAM_ISSUES_QUERY,
                json!({ "teamId": team.id, "after": null }),
                |d: IssuesData| d.issues,
            )
            .await?;

        let required = normalize_labels(tags);
        let tickets: Vec<Ticket> = nodes
            .into_iter()
            .map(Ticket::from)
            .filter(|ticket| matches_all(&ticket.tags, &required))
            .collect();

        debug!(count = tickets.len(), "fetched Linear tickets");
        Ok(tickets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: &str, key: &str, name: &str) -> LinearTeam {
        LinearTeam {
            id: id.to_string(),
            key: Some(key.to_string()),
            name: Some(name.to_string()),
        }
    }

    #[test]
    fn test_find_team_prefers_id_then_key_then_name() {
        let teams = vec![
            team("abc", "ENG", "Platform"),
            team("def", "PLAT", "eng"),
            team("eng", "OPS", "Ops"),
        ];

        assert_eq!(find_team(&teams, "ENG").unwrap().id, "eng");
        assert_eq!(find_team(&teams, "plat").unwrap().id, "def");
        assert_eq!(find_team(&teams, " platform ").unwrap().id, "abc");
        assert!(find_team(&teams, "missing").is_none());
    }

    #[test]
    fn test_issue_node_conversion() {
        let node: IssueNode = serde_json::from_value(json!({
            "id": "uuid-1",
            "identifier": "ENG-7",
            "title": "Search",
            "url": "https://linear.app/acme/issue/ENG-7",
            "priority": 2.0,
            "state": { "name": "In Progress", "type": "started" },
            "labels": { "nodes": [{ "name": "Roadmap" }] },
            "attachments": { "nodes": [
                { "url": "https://github.com/acme/app/issues/3", "title": "GH #3", "subtitle": "" },
                { "url": null }
            ] }
        }))
        .unwrap();

        let ticket = Ticket::from(node);
        assert_eq!(ticket.priority, Some(2));
        assert_eq!(ticket.state.as_deref(), Some("In Progress"));
        assert_eq!(ticket.workflow_state, Some(WorkflowState::Started));
        assert_eq!(ticket.tags, vec!["Roadmap"]);
        assert_eq!(ticket.attachments.len(), 1);
        assert_eq!(ticket.attachments[0].title.as_deref(), Some("GH #3"));
        assert_eq!(ticket.attachments[0].subtitle, None);
    }
}
