//! UI side of the dashboard.
//!
//! Components render through the [`UiPort`] trait instead of touching any
//! concrete output, so the terminal renderer in [`terminal`] and the
//! recording doubles used in tests are interchangeable. [`UiManager`] owns
//! the transient [`UiState`] and keeps it in step with the port.

pub mod image;
pub mod manager;
pub mod state;
pub mod tabs;
pub mod terminal;
pub mod timer;
pub mod view;

pub use image::{ImageLoad, ImageLoadResult, LoadedImage};
pub use manager::UiManager;
pub use state::{Banner, BannerKind, UiState};
pub use tabs::{NavItem, PageVariant, Panel, Route, Tab};
pub use view::{
    ResultView, StatisticsView, StatusView, TypeStatOutcome, TypeStatRow, TypeStatsView,
};

use crate::api::Category;

/// Output surface of the dashboard.
pub trait UiPort {
    /// Replace the category selector's options; `selected` is one of them.
    fn set_category_options(&mut self, options: &[Category], selected: Option<&Category>);

    /// Point the image element at `src` and start loading it. The returned
    /// handle resolves with the load/error outcome.
    fn set_image_source(&mut self, src: &str) -> ImageLoad;

    /// Toggle between the image and its placeholder.
    fn set_image_visible(&mut self, visible: bool);

    fn set_result_content(&mut self, content: &ResultView);

    fn set_spinner(&mut self, visible: bool);

    /// `None` hides the banner.
    fn set_banner(&mut self, banner: Option<&Banner>);

    /// Show `panel` (and only it) with `tab` marked active.
    fn set_active_panel(&mut self, page: PageVariant, tab: Tab, panel: Panel);

    fn set_service_status(&mut self, view: &StatusView);

    fn set_type_stats(&mut self, view: &TypeStatsView);

    fn set_statistics(&mut self, view: &StatisticsView);

    /// Full navigation to `route`, triggered from `item`.
    fn navigate(&mut self, route: Route, item: NavItem);
}
