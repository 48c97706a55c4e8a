//! Campaign management commands

use std::path::PathBuf;

use colored::Colorize;

use super::helpers::{check_navigation, confirm, print_campaign, print_summary};
use crate::client::ClientContext;
use crate::controllers::CampaignDashboardController;
use crate::interfaces::cli::CliError;
use crate::models::{PopupTrigger, VideoFile};

pub struct CreateArgs {
    pub slug: String,
    pub wa_link: String,
    pub caption: String,
    pub video: PathBuf,
    pub button_label: Option<String>,
    pub popup: Option<PopupTrigger>,
    pub tags: Vec<String>,
}

pub struct UpdateArgs {
    pub slug: String,
    pub new_slug: Option<String>,
    pub wa_link: Option<String>,
    pub caption: Option<String>,
    pub button_label: Option<String>,
    pub popup: Option<PopupTrigger>,
    pub clear_popup: bool,
    pub tags: Option<Vec<String>>,
    pub video: Option<PathBuf>,
}

fn dashboard(ctx: &ClientContext) -> CampaignDashboardController {
    CampaignDashboardController::new(ctx.campaigns.clone(), ctx.sessions.clone())
}

pub async fn list_campaigns(ctx: &ClientContext) -> Result<(), CliError> {
    let campaigns = ctx.campaigns.list_public().await?;

    if campaigns.is_empty() {
        println!("{} No campaigns found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Campaigns:".bold().green());
    println!();
    for campaign in &campaigns {
        print_summary(campaign);
    }
    println!();
    println!(
        "{} Total {} campaigns",
        "ℹ".bold().blue(),
        campaigns.len().to_string().green()
    );
    Ok(())
}

pub async fn get_campaign(ctx: &ClientContext, slug: &str) -> Result<(), CliError> {
    let campaign = ctx.campaigns.get(slug).await?;
    print_campaign(&campaign);
    Ok(())
}

pub async fn create_campaign(ctx: &ClientContext, args: CreateArgs) -> Result<(), CliError> {
    let video = VideoFile::from_path(&args.video).await?;
    let mut dashboard = dashboard(ctx);

    {
        let form = dashboard.form_mut();
        form.slug = args.slug;
        form.wa_link = args.wa_link;
        form.caption = args.caption;
        if let Some(label) = args.button_label {
            form.wa_button_label = label;
        }
        form.popup_trigger = args.popup;
        form.tags = args.tags;
    }
    dashboard.select_video(Some(video));

    let nav = dashboard.submit().await;
    check_navigation(nav, dashboard.error())?;

    if let Some(created) = dashboard.campaigns().first() {
        println!(
            "{} Created campaign: {}",
            "✓".bold().green(),
            created.slug.cyan()
        );
        if !created.full_video_url.is_empty() {
            println!("  {} {}", "Video:".dimmed(), created.full_video_url);
        }
    }
    Ok(())
}

pub async fn update_campaign(ctx: &ClientContext, args: UpdateArgs) -> Result<(), CliError> {
    let video = match &args.video {
        Some(path) => Some(VideoFile::from_path(path).await?),
        None => None,
    };

    let mut dashboard = dashboard(ctx);
    let nav = dashboard.enter().await;
    check_navigation(nav, dashboard.error())?;

    if !dashboard.edit(&args.slug) {
        return Err(CliError::CommandError(format!(
            "Campaign not found: {}",
            args.slug
        )));
    }

    {
        let form = dashboard.form_mut();
        if let Some(slug) = args.new_slug {
            form.slug = slug;
        }
        if let Some(link) = args.wa_link {
            form.wa_link = link;
        }
        if let Some(caption) = args.caption {
            form.caption = caption;
        }
        if let Some(label) = args.button_label {
            form.wa_button_label = label;
        }
        if args.clear_popup {
            form.popup_trigger = None;
        } else if let Some(popup) = args.popup {
            form.popup_trigger = Some(popup);
        }
        if let Some(tags) = args.tags {
            form.tags = tags;
        }
    }
    if video.is_some() {
        dashboard.select_video(video);
    }

    let nav = dashboard.submit().await;
    check_navigation(nav, dashboard.error())?;

    println!(
        "{} Updated campaign: {}",
        "✓".bold().green(),
        args.slug.cyan()
    );
    Ok(())
}

pub async fn delete_campaign(ctx: &ClientContext, slug: &str, yes: bool) -> Result<(), CliError> {
    if !yes && !confirm(&format!("Delete campaign {}?", slug.cyan()))? {
        println!("{}", "Aborted.".red());
        return Ok(());
    }

    let mut dashboard = dashboard(ctx);
    let nav = dashboard.delete(slug).await;
    check_navigation(nav, dashboard.error())?;

    println!("{} Deleted campaign: {}", "✓".bold().green(), slug.cyan());
    Ok(())
}

pub async fn share_links(ctx: &ClientContext, slug: &str) -> Result<(), CliError> {
    let links = ctx.campaigns.share_links(slug).await?;

    println!(
        "{} {}",
        "Share links for".bold().green(),
        links.campaign_slug.cyan()
    );
    println!("  {} {}", "Base URL:".dimmed(), links.base_url.blue().underline());
    println!();
    if links.platforms.is_empty() {
        let mut entries: Vec<_> = links.share_links.iter().collect();
        entries.sort();
        for (platform, url) in entries {
            println!("  {:<10} {}", platform, url);
        }
    } else {
        for platform in &links.platforms {
            println!("  {:<10} {}", platform.label, platform.url);
        }
    }
    Ok(())
}
