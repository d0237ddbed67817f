//! Roadmap templates
//!
//! Templates use Handlebars syntax and see the [`RoadmapContext`] with
//! camelCase keys. Missing fields render as empty.

use crate::error::{Error, Result};
use crate::types::RoadmapContext;
use handlebars::Handlebars;
use std::path::Path;
use tracing::debug;

/// Built-in roadmap template
pub const DEFAULT_TEMPLATE: &str = r#"# Product Roadmap

Generated at: {{generatedAt}}

## Issues

### Started
{{#each mergedItems}}{{#if linearTicket}}{{#if (eq linearTicket.workflowState "started")}}- [{{linearTicket.identifier}}]({{linearTicket.url}}){{#if githubIssue}} / [#{{githubIssue.number}}]({{githubIssue.url}}){{/if}}: {{title}} ({{linearTicket.state}})
{{/if}}{{/if}}{{/each}}
### Unstarted
{{#each mergedItems}}{{#if linearTicket}}{{#if (eq linearTicket.workflowState "unstarted")}}- [{{linearTicket.identifier}}]({{linearTicket.url}}){{#if githubIssue}} / [#{{githubIssue.number}}]({{githubIssue.url}}){{/if}}: {{title}} ({{linearTicket.state}})
{{/if}}{{/if}}{{/each}}
### Backlog
{{#each mergedItems}}{{#if linearTicket}}{{#if (eq linearTicket.workflowState "backlog")}}- [{{linearTicket.identifier}}]({{linearTicket.url}}){{#if githubIssue}} / [#{{githubIssue.number}}]({{githubIssue.url}}){{/if}}: {{title}} ({{linearTicket.state}})
{{/if}}{{/if}}{{/each}}
### GitHub Only
{{#each mergedItems}}{{#if githubIssue}}{{#unless linearTicket}}- [#{{githubIssue.number}}]({{githubIssue.url}}): {{title}}
{{/unless}}{{/if}}{{/each}}
## GitHub Pull Requests
{{#each githubPulls}}- [#{{number}}]({{url}}): {{title}}
{{/each}}
"#;

/// Load a template, or the built-in one when no path is given
pub async fn load_template(path: Option<&Path>) -> Result<String> {
    let Some(path) = path else {
        return Ok(DEFAULT_TEMPLATE.to_string());
    };

    debug!(path = %path.display(), "loading template");
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::Template {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Render `template` against `context`
pub fn render_template(template: &str, context: &RoadmapContext) -> Result<String> {
    let registry = Handlebars::new();
    registry
        .render_template(template, context)
        .map_err(|e| Error::Render(e.to_string()))
}
