/// URL construction for every endpoint the dashboard consumes.
///
/// All URLs are built against an [`Origin`], the scheme + host + port that
/// stands in for the page origin. Query strings are appended in a fixed order:
/// `orientation` first, then the `t` cache-buster. Category names are
/// percent-encoded as a single path segment.
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use super::types::{Category, Orientation, ResponseMode};

/// Characters that cannot appear raw inside one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Base URL every request is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin(String);

impl Origin {
    /// Normalise a configured base URL: trim whitespace and trailing slashes.
    pub fn new(base_url: &str) -> Self {
        Self(base_url.trim().trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix a root-relative path with this origin. Absolute URLs pass
    /// through untouched.
    pub fn resolve(&self, path_or_url: &str) -> String {
        if is_absolute(path_or_url) {
            path_or_url.to_string()
        } else if path_or_url.starts_with('/') {
            format!("{}{}", self.0, path_or_url)
        } else {
            format!("{}/{}", self.0, path_or_url)
        }
    }

    pub fn types_url(&self) -> String {
        format!("{}/api/img/types", self.0)
    }

    pub fn status_url(&self) -> String {
        format!("{}/api", self.0)
    }

    pub fn count_url(&self, category: &Category) -> String {
        format!("{}/api/img/{}/count", self.0, segment(category))
    }

    /// URL of the random-image endpoint for `mode`, with the optional
    /// orientation filter. Never includes a cache-buster.
    pub fn random_image_url(
        &self,
        mode: ResponseMode,
        category: &Category,
        orientation: Option<Orientation>,
    ) -> String {
        let category = segment(category);
        let base = match mode {
            ResponseMode::Direct => format!("{}/random_image/{}", self.0, category),
            ResponseMode::Json => format!("{}/random_image/j/{}", self.0, category),
            ResponseMode::Redirect => format!("{}/random_image/g/{}", self.0, category),
        };
        match orientation {
            Some(o) => append_query(&base, "orientation", &o.to_string()),
            None => base,
        }
    }
}

/// Append the `t=<millis>` cache-busting parameter.
pub fn with_cache_buster(url: &str, millis: i64) -> String {
    append_query(url, "t", &millis.to_string())
}

fn segment(category: &Category) -> String {
    utf8_percent_encode(category.as_str(), PATH_SEGMENT).to_string()
}

fn append_query(url: &str, key: &str, value: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{key}={value}")
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
