/// Pages, tabs, panels and navigation items.
///
/// Each page variant owns a fixed set of tabs, and every tab maps to exactly
/// one content panel. The mapping is by identifier, never by position.
use std::fmt;
use std::str::FromStr;

/// The two pages the dashboard can show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageVariant {
    #[default]
    Dashboard,
    Help,
}

impl PageVariant {
    /// Tabs shown on this page, in display order.
    pub fn tabs(self) -> &'static [Tab] {
        match self {
            Self::Dashboard => &[Tab::Control, Tab::Docs, Tab::Stats],
            Self::Help => &[Tab::Guide, Tab::Notes, Tab::Faq],
        }
    }

    /// Tab that is active right after the page is (re)loaded.
    pub fn default_tab(self) -> Tab {
        self.tabs()[0]
    }

    pub fn route(self) -> Route {
        match self {
            Self::Dashboard => Route::Home,
            Self::Help => Route::Help,
        }
    }
}

/// A selectable tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Control,
    Docs,
    Stats,
    Guide,
    Notes,
    Faq,
}

impl Tab {
    pub fn page(self) -> PageVariant {
        match self {
            Self::Control | Self::Docs | Self::Stats => PageVariant::Dashboard,
            Self::Guide | Self::Notes | Self::Faq => PageVariant::Help,
        }
    }

    pub fn panel(self) -> Panel {
        match self {
            Self::Control => Panel::ApiConsole,
            Self::Docs => Panel::Documentation,
            Self::Stats => Panel::Statistics,
            Self::Guide => Panel::Guide,
            Self::Notes => Panel::Notes,
            Self::Faq => Panel::Faq,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Control => "Control",
            Self::Docs => "Docs",
            Self::Stats => "Stats",
            Self::Guide => "Guide",
            Self::Notes => "Notes",
            Self::Faq => "FAQ",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "control" => Ok(Self::Control),
            "docs" | "documentation" => Ok(Self::Docs),
            "stats" | "statistics" => Ok(Self::Stats),
            "guide" => Ok(Self::Guide),
            "notes" => Ok(Self::Notes),
            "faq" => Ok(Self::Faq),
            other => Err(format!("unknown tab '{other}'")),
        }
    }
}

/// A content panel. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    ApiConsole,
    Documentation,
    Statistics,
    Guide,
    Notes,
    Faq,
}

/// Sidebar navigation entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavItem {
    #[default]
    Images,
    Help,
}

impl NavItem {
    pub fn route(self) -> Route {
        match self {
            Self::Images => Route::Home,
            Self::Help => Route::Help,
        }
    }
}

impl FromStr for NavItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "images" | "image" | "home" => Ok(Self::Images),
            "help" => Ok(Self::Help),
            other => Err(format!("unknown navigation item '{other}'")),
        }
    }
}

/// Client-visible routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Help,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Help => "/help",
        }
    }

    pub fn page(self) -> PageVariant {
        match self {
            Self::Home => PageVariant::Dashboard,
            Self::Help => PageVariant::Help,
        }
    }
}
