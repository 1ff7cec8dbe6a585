/// Presentational content handed to the [`super::UiPort`].
///
/// These are the rendered fragments of the dashboard, expressed as data so a
/// port decides how they look. Nothing here is derived beyond defaulting
/// missing counts and dropping empty orientation lines.
use crate::api::{Category, CategoryCount, ServiceStatus};

/// Placeholder shown for missing summary fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Content of the service-status panel.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusView {
    Loaded {
        status: String,
        version: String,
        raw: String,
    },
    /// Inline error placeholder.
    Unavailable,
}

impl StatusView {
    pub fn from_status(status: &ServiceStatus) -> Self {
        Self::Loaded {
            status: status.status().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            version: status.version().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            raw: status.pretty(),
        }
    }
}

/// One category's line in a statistics listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeStatRow {
    pub category: Category,
    pub outcome: TypeStatOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeStatOutcome {
    Counted {
        total: u64,
        /// `None` when absent or zero; the sub-line is omitted.
        horizontal: Option<u64>,
        vertical: Option<u64>,
    },
    /// The count lookup for this category failed.
    Failed,
}

impl TypeStatRow {
    pub fn counted(category: Category, count: &CategoryCount) -> Self {
        Self {
            category,
            outcome: TypeStatOutcome::Counted {
                total: count.total(),
                horizontal: count.horizontal(),
                vertical: count.vertical(),
            },
        }
    }

    pub fn failed(category: Category) -> Self {
        Self {
            category,
            outcome: TypeStatOutcome::Failed,
        }
    }
}

/// Content of the per-category counts shown next to the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeStatsView {
    pub rows: Vec<TypeStatRow>,
}

/// Content of the statistics tab.
#[derive(Debug, Clone, PartialEq)]
pub enum StatisticsView {
    /// Placeholder while the requests are running.
    Loading,
    Loaded {
        version: String,
        start_time: String,
        type_count: u64,
        rows: Vec<TypeStatRow>,
    },
    Unavailable(String),
}

/// Content of the fetch result panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    /// Binary image endpoint; `link` is the URL without cache-buster.
    Direct { link: String },
    /// Redirect endpoint; `link` equals the image source.
    Redirect { link: String },
    /// JSON endpoint: raw payload plus origin-prefixed variant links.
    Json {
        raw: String,
        direct_link: String,
        redirect_link: String,
    },
    Error(String),
}
