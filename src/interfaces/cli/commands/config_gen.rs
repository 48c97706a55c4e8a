//! Generate config command

use std::path::Path;

use colored::Colorize;

use super::helpers::confirm;
use crate::config::StaticConfig;
use crate::interfaces::cli::CliError;

pub const DEFAULT_SAMPLE_PATH: &str = "reelpage.example.toml";

/// Generate example configuration file
pub fn config_generate(output_path: Option<String>, force: bool) -> Result<(), CliError> {
    let path = output_path.unwrap_or_else(|| DEFAULT_SAMPLE_PATH.to_string());

    // 文件已存在时，非 --force 模式下交互确认
    if !force
        && Path::new(&path).exists()
        && !confirm(&format!(
            "{} {} {}",
            "File already exists:".yellow(),
            path.blue(),
            "Overwrite?".yellow()
        ))?
    {
        println!("{}", "Aborted.".red());
        return Ok(());
    }

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );

    StaticConfig::default()
        .save_to_file(&path)
        .map_err(|e| CliError::CommandError(format!("Failed to write {}: {}", path, e)))?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    println!(
        "  {}",
        "Environment variables (RP__API__BASE_URL, ...) override file values".dimmed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_generate_force_writes_loadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.toml");
        let path_str = path.to_str().unwrap().to_string();

        config_generate(Some(path_str.clone()), true).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("base_url"));
        let parsed: StaticConfig = toml::from_str(&content).unwrap();
        assert_eq!(parsed.api.base_url, StaticConfig::default().api.base_url);
    }
}
