//! Shared helpers for CLI commands

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::models::{Campaign, CampaignSummary};
use crate::router::{Navigation, Route};
use crate::utils::is_whatsapp_link;

/// Turn a controller outcome into a command result.
pub(super) fn check_navigation(nav: Navigation, error: Option<&str>) -> Result<(), CliError> {
    match nav {
        Navigation::Redirect(Route::Login) => Err(CliError::SessionError(
            "Not logged in or session expired".to_string(),
        )),
        _ => match error {
            Some(msg) => Err(CliError::CommandError(msg.to_string())),
            None => Ok(()),
        },
    }
}

/// Read one line from stdin after printing `prompt`.
pub(super) fn prompt_line(prompt: &str) -> Result<String, CliError> {
    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|e| CliError::CommandError(format!("Failed to write prompt: {}", e)))?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(|e| CliError::CommandError(format!("Failed to read input: {}", e)))?;
    Ok(input.trim().to_string())
}

/// y/N confirmation; anything but `y` is a no.
pub(super) fn confirm(prompt: &str) -> Result<bool, CliError> {
    let answer = prompt_line(&format!("{} [y/N] ", prompt))?;
    Ok(answer.eq_ignore_ascii_case("y"))
}

pub(super) fn print_summary(c: &CampaignSummary) {
    let mut parts = vec![format!(
        "{} -> {}",
        c.slug.cyan(),
        c.wa_link.blue().underline()
    )];
    if let Some(trigger) = c.popup_trigger() {
        parts.push(format!("(popup {})", trigger).dimmed().yellow().to_string());
    }
    if !c.tags.is_empty() {
        parts.push(format!("[{}]", c.tags.join(", ")).dimmed().to_string());
    }
    println!("  {}", parts.join(" "));
}

fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", format!("{:<11}", label).dimmed(), value);
}

pub(super) fn print_campaign(c: &Campaign) {
    println!("{}", c.slug.bold().cyan());
    if is_whatsapp_link(&c.wa_link) {
        field("WhatsApp:", c.wa_link.blue().underline());
    } else {
        field(
            "WhatsApp:",
            format!("{} {}", c.wa_link.blue().underline(), "(custom redirect)".yellow()),
        );
    }
    field("Button:", c.button_label());
    field("Caption:", c.caption.as_deref().unwrap_or(""));
    field("Video:", &c.full_video_url);
    field("Thumbnail:", &c.full_thumbnail_url);
    if let Some(trigger) = c.popup_trigger() {
        field("Popup:", trigger);
    }
    if !c.tags.is_empty() {
        field("Tags:", c.tags.join(", "));
    }
    if let Some(updated) = c.updated_at.or(c.created_at) {
        field("Updated:", updated.format("%Y-%m-%d %H:%M:%S UTC"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_navigation() {
        assert!(check_navigation(Navigation::Stay, None).is_ok());
        assert!(matches!(
            check_navigation(Navigation::to_login(), None),
            Err(CliError::SessionError(_))
        ));
        assert!(matches!(
            check_navigation(Navigation::Stay, Some("Upload failed.")),
            Err(CliError::CommandError(msg)) if msg == "Upload failed."
        ));
        assert!(check_navigation(Navigation::Redirect(Route::Dashboard), None).is_ok());
    }
}
