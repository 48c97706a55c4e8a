//! Tracking and analytics commands

use colored::Colorize;

use super::helpers::check_navigation;
use crate::client::ClientContext;
use crate::controllers::{AnalyticsController, DetailState, ListState};
use crate::interfaces::cli::CliError;
use crate::models::{AnalyticsDetail, DateRange, EventCounts, EventKind};
use crate::tracking::DIRECT_SOURCE;

pub async fn track_event(
    ctx: &ClientContext,
    kind: EventKind,
    slug: &str,
    source: Option<&str>,
) -> Result<(), CliError> {
    let source = source.filter(|s| !s.is_empty()).unwrap_or(DIRECT_SOURCE);
    let response = ctx.tracking.track(kind, slug, source).await?;

    if response.success {
        println!(
            "{} Recorded {} for {} (source: {})",
            "✓".bold().green(),
            response.event.yellow(),
            response.slug.cyan(),
            response.source
        );
    } else {
        println!(
            "{} Backend did not record {} for {}",
            "⚠".bold().yellow(),
            kind,
            slug.cyan()
        );
    }
    Ok(())
}

pub async fn show_analytics(
    ctx: &ClientContext,
    slug: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(), CliError> {
    let range = DateRange::parse(start, end)?;
    let mut controller = AnalyticsController::new(ctx.tracking.clone(), ctx.sessions.clone());

    let nav = controller.enter().await;
    check_navigation(nav, None)?;

    let Some(slug) = slug else {
        return match controller.list() {
            ListState::Ready(summaries) => {
                print_summaries(summaries);
                Ok(())
            }
            ListState::Error(msg) => Err(CliError::CommandError(msg.clone())),
            ListState::Loading => Ok(()),
        };
    };

    controller.apply_date_filter(range).await;
    let nav = controller.view_details(slug).await;
    check_navigation(nav, None)?;

    match controller.detail() {
        DetailState::Ready(detail) => {
            print_detail(detail, &range);
            Ok(())
        }
        DetailState::Error(msg) => Err(CliError::CommandError(msg.clone())),
        DetailState::Idle | DetailState::Loading => Ok(()),
    }
}

fn counts_line(c: &EventCounts) -> String {
    format!(
        "views {:>6}  plays {:>6}  completes {:>6}  clicks {:>6}",
        c.views, c.plays, c.completes, c.clicks
    )
}

fn print_summaries(summaries: &[crate::models::AnalyticsSummary]) {
    if summaries.is_empty() {
        println!("{} No analytics yet", "ℹ".bold().blue());
        return;
    }
    println!("{}", "Campaign analytics:".bold().green());
    println!();
    for s in summaries {
        println!(
            "  {} {}  {}",
            format!("{:<24}", s.campaign_slug).cyan(),
            counts_line(&s.counts),
            format!("conv {:.2}%", s.conversion_rate).yellow()
        );
    }
}

fn print_detail(detail: &AnalyticsDetail, range: &DateRange) {
    println!(
        "{} {}",
        "Analytics for".bold().green(),
        detail.campaign_slug.cyan()
    );
    if !range.is_unbounded() {
        let bound = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.to_string()).unwrap_or_else(|| "…".to_string())
        };
        println!(
            "  {} {} → {}",
            "Range:".dimmed(),
            bound(range.start),
            bound(range.end)
        );
    }
    println!("  {}", counts_line(&detail.totals()));
    println!(
        "  {} {:.2}%",
        "Conversion:".dimmed(),
        detail.conversion_rate
    );

    if !detail.by_source.is_empty() {
        println!();
        println!("  {}", "By source:".bold());
        for source in detail.source_keys() {
            if let Some(counts) = detail.by_source.get(source) {
                println!("    {:<16} {}", source, counts_line(counts));
            }
        }
    }

    if !detail.by_date.is_empty() {
        println!();
        println!("  {}", "By date:".bold());
        for day in &detail.by_date {
            println!("    {:<16} {}", day.date, counts_line(&day.counts));
        }
    }
}
