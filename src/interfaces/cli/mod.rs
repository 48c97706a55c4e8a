//! CLI interface module
//!
//! This module provides command-line interface functionality for reelpage.

pub mod commands;

use std::fmt;

use crate::cli::{CampaignCommands, Commands, ConfigCommands};
use crate::client::ClientContext;
use crate::errors::ReelpageError;

#[derive(Debug)]
pub enum CliError {
    /// Missing or rejected session; run `reelpage login`
    SessionError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::SessionError(msg) => format!("Session error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::SessionError(msg) => format!(
                "{} {}\n  {}",
                "Session error:".red().bold(),
                msg.white(),
                "Run `reelpage login` first".dimmed()
            ),
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<ReelpageError> for CliError {
    fn from(err: ReelpageError) -> Self {
        match err {
            ReelpageError::Auth(msg) if msg.is_empty() => {
                CliError::SessionError("Not logged in or session expired".to_string())
            }
            ReelpageError::Auth(msg) => CliError::SessionError(msg),
            ReelpageError::Validation(msg) => CliError::ParseError(msg),
            other => CliError::CommandError(other.format_simple()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, ctx: ClientContext) -> Result<(), CliError> {
    match cmd {
        Commands::Login { email, password } => commands::login(&ctx, email, password).await,
        Commands::Logout => commands::logout(&ctx),
        Commands::Campaigns { action } => match action {
            CampaignCommands::List => commands::list_campaigns(&ctx).await,
            CampaignCommands::Get { slug } => commands::get_campaign(&ctx, &slug).await,
            CampaignCommands::Create {
                slug,
                wa_link,
                caption,
                video,
                button_label,
                popup,
                tags,
            } => {
                let args = commands::CreateArgs {
                    slug,
                    wa_link,
                    caption,
                    video,
                    button_label,
                    popup,
                    tags,
                };
                commands::create_campaign(&ctx, args).await
            }
            CampaignCommands::Update {
                slug,
                new_slug,
                wa_link,
                caption,
                button_label,
                popup,
                clear_popup,
                tags,
                video,
            } => {
                let args = commands::UpdateArgs {
                    slug,
                    new_slug,
                    wa_link,
                    caption,
                    button_label,
                    popup,
                    clear_popup,
                    tags,
                    video,
                };
                commands::update_campaign(&ctx, args).await
            }
            CampaignCommands::Delete { slug, yes } => {
                commands::delete_campaign(&ctx, &slug, yes).await
            }
            CampaignCommands::Share { slug } => commands::share_links(&ctx, &slug).await,
        },
        Commands::Track { kind, slug, source } => {
            commands::track_event(&ctx, kind, &slug, source.as_deref()).await
        }
        Commands::Analytics { slug, start, end } => {
            commands::show_analytics(&ctx, slug.as_deref(), start.as_deref(), end.as_deref())
                .await
        }
        Commands::Landing {
            target,
            play,
            complete,
            click,
            html,
        } => {
            let opts = commands::LandingOptions {
                play: play || complete,
                complete,
                click,
                html,
            };
            commands::open_landing(&ctx, &target, opts).await
        }
        Commands::Config { action } => match action {
            ConfigCommands::Generate { output_path, force } => {
                commands::config_generate(output_path, force)
            }
        },
    }
}
