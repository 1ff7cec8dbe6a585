/// Wire types for the random-image API.
///
/// Every response is deserialized leniently: optional fields default, and
/// unknown fields are kept in a flattened map so they still show up in the
/// raw pretty-printed dumps.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category / ResponseMode / Orientation
// ---------------------------------------------------------------------------

/// A named image classification discovered from the backend at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Which backend endpoint variant to call and how to interpret its response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// `/random_image/{type}`: binary image.
    #[default]
    Direct,
    /// `/random_image/j/{type}`: JSON metadata.
    Json,
    /// `/random_image/g/{type}`: HTTP redirect.
    Redirect,
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Json => write!(f, "json"),
            Self::Redirect => write!(f, "redirect"),
        }
    }
}

impl FromStr for ResponseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "json" | "j" => Ok(Self::Json),
            "redirect" | "g" => Ok(Self::Redirect),
            other => Err(format!("invalid response mode '{other}'")),
        }
    }
}

/// Image orientation filter accepted by every random-image endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" | "landscape" => Ok(Self::Horizontal),
            "vertical" | "v" | "portrait" => Ok(Self::Vertical),
            other => Err(format!("invalid orientation '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// Response body from `GET /api/img/types`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeCatalog {
    pub types: Vec<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// Response body from `GET /api`.
///
/// The shape is opaque; only a handful of optional fields are read for the
/// summary line and the full payload is rendered as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceStatus {
    raw: serde_json::Value,
}

impl ServiceStatus {
    pub fn from_value(raw: serde_json::Value) -> Self {
        Self { raw }
    }

    fn field(&self, key: &str) -> Option<String> {
        match self.raw.get(key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn status(&self) -> Option<String> {
        self.field("status")
    }

    pub fn version(&self) -> Option<String> {
        self.field("version")
    }

    pub fn start_time(&self) -> Option<String> {
        self.field("start_time")
    }

    /// Two-space indented dump of the whole payload.
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }
}

/// Response body from `GET /api/img/{type}/count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub horizontal_count: Option<u64>,
    #[serde(default)]
    pub vertical_count: Option<u64>,
}

impl CategoryCount {
    pub fn total(&self) -> u64 {
        self.total_count.unwrap_or(0)
    }

    /// Horizontal count, or `None` when absent or zero (the sub-line is omitted).
    pub fn horizontal(&self) -> Option<u64> {
        self.horizontal_count.filter(|&n| n > 0)
    }

    /// Vertical count, or `None` when absent or zero.
    pub fn vertical(&self) -> Option<u64> {
        self.vertical_count.filter(|&n| n > 0)
    }
}

/// Response body from `GET /random_image/j/{type}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonImage {
    pub path: String,
    pub direct_url: String,
    pub redirect_url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl JsonImage {
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
