use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::DashConfig;

// ---------------------------------------------------------------------------
// Diagnostic entry (JSONL)
// ---------------------------------------------------------------------------

/// Severity of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// A single line in `~/.imgdash/diagnostics.jsonl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    pub timestamp: String,
    pub level: Level,
    /// Dashboard operation that produced the entry, e.g. `"load_categories"`.
    pub operation: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Where diagnostics go. Every write is best-effort: a full disk or a missing
/// home directory must never turn into a dashboard error.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    path: Option<PathBuf>,
    echo: bool,
}

impl Diagnostics {
    /// Sink configured from `[logging]`.
    pub fn from_config(config: &DashConfig) -> Self {
        Self {
            path: if config.logging.enabled {
                diagnostics_log_path()
            } else {
                None
            },
            echo: config.logging.echo,
        }
    }

    /// Sink that writes to an explicit file.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            echo: false,
        }
    }

    /// Sink that drops everything.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn info(&self, operation: &str, message: impl Into<String>) {
        self.record(Level::Info, operation, message.into());
    }

    pub fn warn(&self, operation: &str, message: impl Into<String>) {
        self.record(Level::Warn, operation, message.into());
    }

    pub fn error(&self, operation: &str, message: impl Into<String>) {
        self.record(Level::Error, operation, message.into());
    }

    fn record(&self, level: Level, operation: &str, message: String) {
        if self.echo {
            eprintln!("[imgdash] {operation}: {message}");
        }

        let Some(path) = &self.path else {
            return;
        };

        let entry = DiagnosticEntry {
            timestamp: Utc::now().to_rfc3339(),
            level,
            operation: operation.to_string(),
            message,
        };
        let _ = append_entry(path, &entry);
    }
}

// ---------------------------------------------------------------------------
// Reading entries
// ---------------------------------------------------------------------------

/// Read all entries from the log at `path`.
///
/// Silently skips malformed lines. Returns an empty vec if the file does not
/// exist or cannot be read.
pub fn read_entries(path: &Path) -> Vec<DiagnosticEntry> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<DiagnosticEntry>(&line).ok())
        .collect()
}

/// The last `limit` entries, oldest first.
pub fn read_recent(path: &Path, limit: usize) -> Vec<DiagnosticEntry> {
    let mut entries = read_entries(path);
    let skip = entries.len().saturating_sub(limit);
    entries.drain(..skip);
    entries
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

fn append_entry(path: &Path, entry: &DiagnosticEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Return the path to the diagnostic log file.
pub fn diagnostics_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".imgdash").join("diagnostics.jsonl"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
