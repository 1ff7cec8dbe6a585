/// Transient UI state. Lives for one page load; nothing is persisted.
use std::fmt;

use crate::api::{Category, Orientation, ResponseMode};

use super::tabs::{NavItem, PageVariant, Tab};

/// Banner severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
    /// Auto-hides after the configured delay.
    Info,
}

impl fmt::Display for BannerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// The status banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub visible: bool,
}

/// Everything the dashboard remembers between events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub page: PageVariant,
    pub active_tab: Option<Tab>,
    pub active_nav: NavItem,
    /// Options of the category selector, in backend order.
    pub categories: Vec<Category>,
    /// Always a member of `categories` when set.
    pub selected_category: Option<Category>,
    pub selected_mode: ResponseMode,
    pub orientation: Option<Orientation>,
    pub spinner: bool,
    pub banner: Option<Banner>,
    pub image_src: Option<String>,
    pub image_visible: bool,
}

impl UiState {
    /// Fresh state for `page`, as after a full navigation.
    pub fn for_page(page: PageVariant, mode: ResponseMode) -> Self {
        Self {
            page,
            active_tab: Some(page.default_tab()),
            active_nav: match page {
                PageVariant::Dashboard => NavItem::Images,
                PageVariant::Help => NavItem::Help,
            },
            selected_mode: mode,
            ..Self::default()
        }
    }

    pub fn banner_visible(&self) -> bool {
        self.banner.as_ref().is_some_and(|b| b.visible)
    }
}
