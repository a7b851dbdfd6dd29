use super::{load_config, path_manager};
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, Color, Table};
use movie_sync_config::{Config, PathManager, API_URL_ENV};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;

pub fn run_config(cmd: ConfigCommands, config_dir: Option<&Path>, output: &Output) -> Result<()> {
    let paths = path_manager(config_dir);
    match cmd {
        ConfigCommands::Show => show_config(&paths, output),
        ConfigCommands::Init { force } => init_config(&paths, force, output),
        ConfigCommands::SetUrl { url } => set_url(&paths, url, output),
    }
}

fn show_config(paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let config = load_config(paths)?;

    output.json(&json!({
        "configFile": config_file.display().to_string(),
        "exists": config_file.exists(),
        "config": config,
    }));
    if !output.is_human() || output.is_quiet() {
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Showing defaults. Run 'reelbook config init' to write them to disk.");
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Config File"), Cell::new(config_file.display().to_string())]);
    table.add_row(vec![Cell::new("Backend URL"), Cell::new(&config.backend.base_url)]);
    table.add_row(vec![Cell::new("Request timeout"), Cell::new(format!("{}s", config.backend.timeout_secs))]);
    table.add_row(vec![Cell::new("Alert dismiss"), Cell::new(format!("{}ms", config.ui.alert_dismiss_ms))]);
    table.add_row(vec![Cell::new("Redirect delay"), Cell::new(format!("{}ms", config.ui.redirect_delay_ms))]);
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    output.block(table);

    if std::env::var(API_URL_ENV).is_ok() {
        output.block(format!("{} backend URL overridden by {}", "note:".bright_black(), API_URL_ENV));
    }
    Ok(())
}

fn init_config(paths: &PathManager, force: bool, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!("Configuration already exists at {}", config_file.display()));
        output.info("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create {}: {}", paths.config_dir().display(), e))?;
    save(&Config::default(), &config_file)?;
    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn set_url(paths: &PathManager, url: String, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    config.backend.base_url = url.trim().trim_end_matches('/').to_string();
    config.validate()?;
    save(&config, &config_file)?;

    output.success(format!("Backend URL set to {}", config.backend.base_url));
    Ok(())
}

fn save(config: &Config, path: &std::path::PathBuf) -> Result<()> {
    config
        .save_to_file(path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", path.display(), e))
}
