//! Login / logout commands

use colored::Colorize;

use super::helpers::prompt_line;
use crate::client::ClientContext;
use crate::controllers::{INVALID_CREDENTIALS, LoginController, Navigation};
use crate::interfaces::cli::CliError;

pub async fn login(
    ctx: &ClientContext,
    email: Option<String>,
    password: Option<String>,
) -> Result<(), CliError> {
    let email = match email {
        Some(email) => email,
        None => prompt_line("Email: ")?,
    };
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")
            .map_err(|e| CliError::CommandError(format!("Failed to read password: {}", e)))?,
    };

    let mut controller = LoginController::new(ctx.auth.clone(), ctx.sessions.clone());
    match controller.submit(&email, &password).await {
        Navigation::Redirect(_) => {
            println!("{} Logged in as {}", "✓".bold().green(), email.cyan());
            Ok(())
        }
        Navigation::Stay => Err(CliError::SessionError(
            controller.error().unwrap_or(INVALID_CREDENTIALS).to_string(),
        )),
    }
}

pub fn logout(ctx: &ClientContext) -> Result<(), CliError> {
    ctx.sessions.clear()?;
    println!("{} Logged out", "✓".bold().green());
    Ok(())
}
