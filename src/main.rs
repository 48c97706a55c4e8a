use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing::debug;

use reelpage::cli::Cli;
use reelpage::client::ClientContext;
use reelpage::config::{get_config, init_config, update_config};
use reelpage::interfaces::cli::run_cli_command;
use reelpage::system::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_config(cli.config.as_deref());
    if let Some(base_url) = &cli.base_url {
        let mut config = (*get_config()).clone();
        config.api.base_url = base_url.clone();
        update_config(config);
    }

    let config = get_config();
    // guard 需存活到进程结束，保证日志刷盘
    let _guard = init_logging(&config);
    debug!("Using API base URL: {}", config.api.base_url);

    let ctx = match ClientContext::from_config() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            return ExitCode::FAILURE;
        }
    };

    match run_cli_command(cli.command, ctx).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "✗".bold().red(), e.format_colored());
            ExitCode::FAILURE
        }
    }
}
