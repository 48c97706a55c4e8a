//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for reelpage using clap's derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::{EventKind, PopupTrigger};

/// reelpage - campaign landing-page client
#[derive(Parser)]
#[command(name = "reelpage")]
#[command(version)]
#[command(about = "Manage video campaigns, record landing-page events and read analytics", long_about = None)]
pub struct Cli {
    /// Configuration file (default: reelpage.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    /// Override the backend API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Log in as admin and store the session token
    Login {
        #[arg(long)]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Destroy the stored session token
    Logout,

    /// Manage campaigns
    Campaigns {
        #[command(subcommand)]
        action: CampaignCommands,
    },

    /// Send a single tracking event
    Track {
        /// view, play, complete or click
        kind: EventKind,

        slug: String,

        /// Traffic source (default: direct)
        #[arg(long)]
        source: Option<String>,
    },

    /// Show analytics for all campaigns, or one campaign in detail
    Analytics {
        slug: Option<String>,

        /// Inclusive start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// Inclusive end date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },

    /// Open a landing page: print its meta tags and record the view
    Landing {
        /// Landing URL (https://site/campaigns/<slug>?utm_source=..) or bare slug
        target: String,

        /// Also record play
        #[arg(long)]
        play: bool,

        /// Also record play and complete
        #[arg(long)]
        complete: bool,

        /// Also press the call-to-action (records a click)
        #[arg(long)]
        click: bool,

        /// Print meta tags as HTML
        #[arg(long)]
        html: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Campaign management commands
#[derive(Subcommand)]
pub enum CampaignCommands {
    /// List public campaigns
    List,

    /// Show one campaign
    Get { slug: String },

    /// Upload a new campaign
    Create {
        slug: String,

        /// WhatsApp link the CTA opens
        #[arg(long)]
        wa_link: String,

        #[arg(long)]
        caption: String,

        /// Video file to upload
        #[arg(long)]
        video: PathBuf,

        /// CTA label (default: "Chat on WhatsApp")
        #[arg(long)]
        button_label: Option<String>,

        /// Popup trigger: seconds:N, percent:N, Ns or N%
        #[arg(long)]
        popup: Option<PopupTrigger>,

        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Update fields of an existing campaign
    Update {
        slug: String,

        /// Rename the campaign
        #[arg(long)]
        new_slug: Option<String>,

        #[arg(long)]
        wa_link: Option<String>,

        #[arg(long)]
        caption: Option<String>,

        #[arg(long)]
        button_label: Option<String>,

        #[arg(long, conflicts_with = "clear_popup")]
        popup: Option<PopupTrigger>,

        /// Remove the popup trigger
        #[arg(long)]
        clear_popup: bool,

        /// Comma-separated tags (replaces existing)
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,

        /// Replacement video file
        #[arg(long)]
        video: Option<PathBuf>,
    },

    /// Delete a campaign
    Delete {
        slug: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show share links for a campaign
    Share { slug: String },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: reelpage.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_track() {
        let cli = Cli::parse_from(["reelpage", "track", "view", "demo", "--source", "ig"]);
        match cli.command {
            Commands::Track { kind, slug, source } => {
                assert_eq!(kind, EventKind::View);
                assert_eq!(slug, "demo");
                assert_eq!(source.as_deref(), Some("ig"));
            }
            _ => panic!("Expected Track"),
        }
    }

    #[test]
    fn test_cli_parses_create_with_tags_and_popup() {
        let cli = Cli::parse_from([
            "reelpage",
            "-c",
            "custom.toml",
            "campaigns",
            "create",
            "summer",
            "--wa-link",
            "https://wa.me/1",
            "--caption",
            "Hi",
            "--video",
            "v.mp4",
            "--popup",
            "50%",
            "--tags",
            "a,b",
        ]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        match cli.command {
            Commands::Campaigns {
                action: CampaignCommands::Create { popup, tags, .. },
            } => {
                assert_eq!(popup, Some(PopupTrigger::percent(50.0)));
                assert_eq!(tags, vec!["a", "b"]);
            }
            _ => panic!("Expected Campaigns Create"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_event_kind() {
        assert!(Cli::try_parse_from(["reelpage", "track", "hover", "demo"]).is_err());
    }

    #[test]
    fn test_cli_popup_conflicts_with_clear() {
        assert!(
            Cli::try_parse_from([
                "reelpage",
                "campaigns",
                "update",
                "a",
                "--popup",
                "5s",
                "--clear-popup"
            ])
            .is_err()
        );
    }
}
