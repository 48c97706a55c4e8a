//! Landing page command

use std::sync::Arc;

use colored::Colorize;
use url::Url;

use crate::client::ClientContext;
use crate::controllers::LandingController;
use crate::interfaces::cli::CliError;
use crate::router::Route;
use crate::tracking::{DIRECT_SOURCE, Tracker, resolve_source};

#[derive(Debug, Clone, Copy, Default)]
pub struct LandingOptions {
    pub play: bool,
    pub complete: bool,
    pub click: bool,
    pub html: bool,
}

/// Split a landing URL or bare slug into (slug, source).
pub fn parse_landing_target(target: &str) -> Result<(String, String), CliError> {
    match Url::parse(target) {
        Ok(url) => match Route::resolve(url.path()) {
            Route::Landing { slug } => Ok((slug, resolve_source(&url))),
            _ => Err(CliError::ParseError(format!(
                "Not a campaign landing URL: {}",
                target
            ))),
        },
        Err(_) => Ok((target.trim().to_string(), DIRECT_SOURCE.to_string())),
    }
}

pub async fn open_landing(
    ctx: &ClientContext,
    target: &str,
    opts: LandingOptions,
) -> Result<(), CliError> {
    let (slug, source) = parse_landing_target(target)?;
    let tracker = Tracker::new(Arc::new(ctx.tracking.clone())).with_default_source(&source);
    let mut page = LandingController::new(ctx.campaigns.clone(), tracker, ctx.site_url.clone());

    page.load(&slug).await;
    if let Some(error) = page.error() {
        return Err(CliError::CommandError(error.to_string()));
    }

    if let Some(view) = page.view() {
        let campaign = &view.campaign;
        println!(
            "{} {} {}",
            campaign.slug.bold().cyan(),
            "·".dimmed(),
            campaign.caption.as_deref().unwrap_or("").white()
        );
        println!("  {} {}", "Source:".dimmed(), source.yellow());
        if let Some(trigger) = campaign.popup_trigger() {
            println!("  {} {}", "Popup:".dimmed(), trigger);
        }
        println!();
        if opts.html {
            print!("{}", view.meta.render_html());
        } else {
            for tag in view.meta.tags() {
                println!("  {} {}", format!("{:<22}", tag.id).dimmed(), tag.content);
            }
        }
    }

    if opts.play {
        page.on_play();
    }
    if opts.complete {
        page.on_complete();
    }
    if opts.click
        && let Some(link) = page.on_cta_click()
    {
        let label = page
            .campaign()
            .map(|c| c.button_label().to_string())
            .unwrap_or_default();
        println!();
        println!("{} {} → {}", "➜".bold().green(), label, link.blue().underline());
    }

    page.settle().await;
    println!();
    println!("{} Events recorded", "✓".bold().green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_landing_url() {
        let (slug, source) =
            parse_landing_target("https://site.test/campaigns/summer?utm_source=newsletter")
                .unwrap();
        assert_eq!(slug, "summer");
        assert_eq!(source, "newsletter");
    }

    #[test]
    fn test_parse_bare_slug() {
        let (slug, source) = parse_landing_target("summer").unwrap();
        assert_eq!(slug, "summer");
        assert_eq!(source, "direct");
    }

    #[test]
    fn test_parse_non_landing_url() {
        assert!(matches!(
            parse_landing_target("https://site.test/dashboard"),
            Err(CliError::ParseError(_))
        ));
    }
}
