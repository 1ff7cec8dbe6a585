//! CLI command implementations.
//!
//! Provides subcommand handlers for:
//! - `imgdash types`: image types, service status and per-type counts
//! - `imgdash status`: service status only
//! - `imgdash stats`: the statistics panel
//! - `imgdash fetch <type>`: fetch one random image
//! - `imgdash dashboard`: interactive session
//! - `imgdash config show|init|set|reset`: configuration management
//! - `imgdash log`: recent diagnostic entries

pub mod session;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;

use crate::api::{HttpApi, ImageApi, Orientation};
use crate::config::{self, DashConfig};
use crate::dashboard::{Dashboard, FetchOutcome};
use crate::diagnostics::{self, Diagnostics, Level};
use crate::ui::terminal::TerminalPort;
use crate::ui::UiManager;

/// Dashboard wired to the real backend and the terminal.
pub type TerminalDashboard = Dashboard<HttpApi, TerminalPort>;

/// Build a dashboard from the resolved config. `save_dir` overrides
/// `ui.save_dir`.
pub fn build_dashboard(config: &DashConfig, save_dir: Option<PathBuf>) -> TerminalDashboard {
    let api = HttpApi::from_config(config);
    let save_dir = save_dir.or_else(|| config.ui.save_dir.as_ref().map(PathBuf::from));
    let port = TerminalPort::new(api.origin().clone(), api.timeout(), save_dir);
    let ui = UiManager::new(
        port,
        Duration::from_millis(config.ui.banner_ms),
        config.ui.default_mode,
    );
    // Loads share the request timeout; leave headroom for redirects.
    let image_timeout = api.timeout() * 2;
    Dashboard::new(api, ui, Diagnostics::from_config(config)).with_image_timeout(image_timeout)
}

// ---------------------------------------------------------------------------
// imgdash types | status | stats
// ---------------------------------------------------------------------------

/// Load the catalog and everything that follows from it.
pub fn run_types(config: &DashConfig) -> Result<()> {
    let mut dashboard = build_dashboard(config, None);
    if !dashboard.load_categories() {
        anyhow::bail!("could not load image types from {}", config.server.base_url);
    }
    Ok(())
}

/// Show the service status panel.
pub fn run_status(config: &DashConfig) -> Result<()> {
    let mut dashboard = build_dashboard(config, None);
    dashboard.load_service_status();
    Ok(())
}

/// Show the statistics panel.
pub fn run_stats(config: &DashConfig) -> Result<()> {
    let mut dashboard = build_dashboard(config, None);
    dashboard.load_statistics();
    Ok(())
}

// ---------------------------------------------------------------------------
// imgdash fetch
// ---------------------------------------------------------------------------

/// Fetch one random image.
pub fn run_fetch(
    config: &DashConfig,
    category: &str,
    mode: Option<&str>,
    orientation: Option<&str>,
    save_dir: Option<PathBuf>,
) -> Result<()> {
    let orientation = orientation
        .map(str::parse::<Orientation>)
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    let mut dashboard = build_dashboard(config, save_dir);
    if !dashboard.sync_catalog() {
        anyhow::bail!("could not load image types from {}", config.server.base_url);
    }
    if !dashboard.select_category(category) {
        anyhow::bail!("'{category}' is not one of the available image types");
    }
    if let Some(mode) = mode
        && !dashboard.select_mode(mode)
    {
        anyhow::bail!("invalid mode '{mode}' (expected direct, json or redirect)");
    }
    dashboard.set_orientation(orientation);

    match dashboard.fetch_random_image() {
        FetchOutcome::Succeeded => Ok(()),
        outcome => anyhow::bail!("fetch did not succeed ({outcome:?})"),
    }
}

// ---------------------------------------------------------------------------
// imgdash dashboard
// ---------------------------------------------------------------------------

pub fn run_dashboard(config: &DashConfig) -> Result<()> {
    let mut dashboard = build_dashboard(config, None);
    session::run(&mut dashboard);
    Ok(())
}

// ---------------------------------------------------------------------------
// imgdash config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show(config: &DashConfig) -> Result<()> {
    let toml_str = config::show_effective_config(config)?;
    println!("{}", "Effective imgdash Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    println!("{}", "Sources:".bold());
    for (label, path) in [
        ("global ", config::global_config_file()),
        ("project", config::project_config_file()),
    ] {
        if let Some(path) = path {
            let state = if path.exists() {
                "found".green()
            } else {
                "not found".dimmed()
            };
            println!("  {} {} ({})", label, path.display(), state);
        }
    }
    Ok(())
}

/// Write the default config file.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} {}", "Created".green().bold(), path.display());
    Ok(())
}

/// Set one key in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} {} = {}", "Set".green().bold(), key, value);
    Ok(())
}

/// Reset the global config to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!("{} {}", "Reset".green().bold(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// imgdash log
// ---------------------------------------------------------------------------

/// Print the most recent diagnostic entries.
pub fn run_log(limit: usize) -> Result<()> {
    let Some(path) = diagnostics::diagnostics_log_path() else {
        anyhow::bail!("could not determine home directory");
    };

    let entries = diagnostics::read_recent(&path, limit);
    if entries.is_empty() {
        println!("{}", "No diagnostics recorded yet.".yellow());
        return Ok(());
    }

    for entry in entries {
        let level = match entry.level {
            Level::Info => "info ".blue(),
            Level::Warn => "warn ".yellow(),
            Level::Error => "error".red(),
        };
        println!(
            "{} {} {} {}",
            entry.timestamp.dimmed(),
            level,
            entry.operation.bold(),
            entry.message
        );
    }
    Ok(())
}
