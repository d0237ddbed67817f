//! Sync command - build the roadmap and write it out

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{CHECK, Stylize, spinner_style};
use anstream::println;
use anyhow::{Context, Result};
use chrono::Utc;
use indicatif::ProgressBar;
use roadmap_sync::platform::{IssueTracker, TicketSource};
use roadmap_sync::reconcile::{RoadmapData, reconcile};
use roadmap_sync::template::{load_template, render_template};
use roadmap_sync::types::SyncOptions;
use std::time::Duration;
use tracing::info;

/// Run one roadmap sync
pub async fn run_sync(options: SyncOptions) -> Result<()> {
    let ctx = CommandContext::new(options)?;
    let opts = &ctx.options;

    // Gather everything concurrently; any failure aborts the run
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!(
        "Fetching from Linear ({}) and GitHub ({})...",
        opts.linear_team.emphasis(),
        opts.github_repo.emphasis()
    ));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let gathered = tokio::try_join!(
        ctx.linear.fetch_tickets(&opts.linear_team, &opts.linear_tags),
        ctx.github.fetch_issues(&opts.github_tags),
        ctx.github.fetch_pull_requests(&opts.github_tags),
        load_template(opts.template_file.as_deref()),
    );
    spinner.finish_and_clear();
    let (tickets, issues, pulls, template) = gathered?;

    info!(
        tickets = tickets.len(),
        issues = issues.len(),
        pulls = pulls.len(),
        "fetched roadmap sources"
    );

    let data = RoadmapData {
        tickets,
        issues,
        pulls,
    };

    let progress = CliProgress::new();
    let outcome = reconcile(&data, opts, &ctx.github, &progress).await;
    if !outcome.creation.is_success() {
        info!(
            failed = outcome.creation.failures.len(),
            "some GitHub issues could not be created"
        );
    }

    let context = outcome.plan.into_context(opts.clone(), Utc::now());
    let output = render_template(&template, &context)?;

    if opts.dry_run {
        println!("{output}");
        return Ok(());
    }

    let output_path = std::env::current_dir()
        .context("Failed to determine current directory")?
        .join(&opts.output_file);
    tokio::fs::write(&output_path, output)
        .await
        .with_context(|| format!("Failed to write roadmap to {}", output_path.display()))?;

    println!(
        "{} Roadmap written to {}",
        CHECK.success(),
        output_path.display().accent()
    );
    Ok(())
}
