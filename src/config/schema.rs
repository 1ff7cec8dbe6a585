/// Configuration schema and defaults for imgdash.
///
/// Defines the TOML-serializable configuration structure with the
/// `[server]`, `[ui]` and `[logging]` sections. Every field has a built-in
/// default; users only set the values they want to override.
use serde::{Deserialize, Serialize};

use crate::api::ResponseMode;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level imgdash configuration.
///
/// Maps directly to the `~/.imgdash/config.toml` and `.imgdash.toml` file
/// schemas. Missing sections and fields fall back to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub server: ServerConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

/// Where the random-image API lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Origin of the API; all endpoint paths are appended to it.
    pub base_url: String,
    /// Per-request timeout (milliseconds). Also bounds image loads.
    pub timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_ms: 10_000,
        }
    }
}

// ---------------------------------------------------------------------------
// [ui]
// ---------------------------------------------------------------------------

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long an `info` banner stays visible (milliseconds).
    pub banner_ms: u64,
    /// Response mode preselected when the dashboard starts.
    pub default_mode: ResponseMode,
    /// Colored terminal output.
    pub color: bool,
    /// Directory loaded images are written to. Unset means images are
    /// downloaded and discarded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_dir: Option<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            banner_ms: 3000,
            default_mode: ResponseMode::Direct,
            color: true,
            save_dir: None,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Diagnostic log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append diagnostic entries to `~/.imgdash/diagnostics.jsonl`.
    pub enabled: bool,
    /// Also echo each entry to stderr.
    pub echo: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            echo: false,
        }
    }
}

impl DashConfig {
    /// Annotated default config written by `imgdash config init`.
    pub fn default_toml() -> &'static str {
        r#"# imgdash configuration
#
# Precedence: built-in defaults < ~/.imgdash/config.toml < ./.imgdash.toml
#             < IMGDASH_* environment variables < command-line flags

[server]
# Origin of the random-image API.
base_url = "http://127.0.0.1:5000"
# Request timeout in milliseconds (also bounds image downloads).
timeout_ms = 10000

[ui]
# How long informational banners stay visible, in milliseconds.
banner_ms = 3000
# Response mode selected at start: "direct", "json" or "redirect".
default_mode = "direct"
# Colored terminal output.
color = true
# Directory to store loaded images in (unset: images are not kept).
# save_dir = "/tmp/imgdash"

[logging]
# Append diagnostics to ~/.imgdash/diagnostics.jsonl.
enabled = true
# Echo diagnostics to stderr.
echo = false
"#
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toml_parses_to_defaults() {
        let parsed: DashConfig = toml::from_str(DashConfig::default_toml()).unwrap();
        assert_eq!(parsed, DashConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let parsed: DashConfig = toml::from_str(
            r#"
[ui]
default_mode = "json"
"#,
        )
        .unwrap();
        assert_eq!(parsed.ui.default_mode, ResponseMode::Json);
        assert_eq!(parsed.ui.banner_ms, 3000);
        assert_eq!(parsed.server, ServerConfig::default());
    }

    #[test]
    fn serializes_round_trip() {
        let mut config = DashConfig::default();
        config.ui.save_dir = Some("/tmp/out".to_string());
        let text = toml::to_string_pretty(&config).unwrap();
        let back: DashConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
