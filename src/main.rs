use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use imgdash::{cli, config};

#[derive(Debug, Parser)]
#[command(name = "imgdash")]
#[command(about = "Terminal dashboard for a random-image API")]
struct App {
    /// API origin (overrides config and IMGDASH_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List image types, then show service status and per-type counts
    Types,
    /// Show the service status
    Status,
    /// Show aggregate statistics across all image types
    Stats,
    /// Fetch a random image of the given type
    Fetch {
        /// Image type, as listed by `imgdash types`
        category: String,
        /// Response mode: direct, json or redirect (default from config)
        #[arg(long)]
        mode: Option<String>,
        /// Restrict to horizontal or vertical images
        #[arg(long)]
        orientation: Option<String>,
        /// Directory to store the loaded image in
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Interactive dashboard session
    Dashboard,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show recent diagnostic log entries
    Log {
        /// Number of entries to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default config to ~/.imgdash/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `server.base_url http://host:5000`
    Set { key: String, value: String },
    /// Restore the default config file
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    let mut cfg = config::load();
    if let Some(url) = app.base_url {
        cfg.server.base_url = url;
    }
    if app.no_color || !cfg.ui.color {
        colored::control::set_override(false);
    }

    match app.command {
        Commands::Types => cli::run_types(&cfg),
        Commands::Status => cli::run_status(&cfg),
        Commands::Stats => cli::run_stats(&cfg),
        Commands::Fetch {
            category,
            mode,
            orientation,
            save,
        } => cli::run_fetch(
            &cfg,
            &category,
            mode.as_deref(),
            orientation.as_deref(),
            save,
        ),
        Commands::Dashboard => cli::run_dashboard(&cfg),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(&cfg),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
        Commands::Log { limit } => cli::run_log(limit),
    }
}
