//! The dashboard controller.
//!
//! [`Dashboard`] ties an [`ImageApi`] to a [`UiManager`] and implements the
//! three data flows in their own files:
//!
//! - [`catalog`]: load the category list into the selector
//! - [`status`]: service status, per-type counts, and the statistics tab
//! - [`fetcher`]: fetch and present a random image in one of three modes
//!
//! Every operation is best-effort: failures end up on screen (banner or an
//! inline fragment) and in the diagnostic log, never as an `Err` to the
//! caller.

pub mod catalog;
pub mod fetcher;
pub mod inflight;
pub mod status;

use std::time::Duration;

use crate::api::{ImageApi, Orientation, ResponseMode};
use crate::diagnostics::Diagnostics;
use crate::ui::{BannerKind, NavItem, Route, Tab, UiManager, UiPort};

pub use fetcher::{FetchOutcome, FetchProgress, PendingFetch};
use inflight::InFlight;

/// Default bound on how long a fetch waits for its image to load.
pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Dashboard<A: ImageApi, P: UiPort> {
    api: A,
    ui: UiManager<P>,
    diag: Diagnostics,
    in_flight: InFlight,
    image_timeout: Duration,
}

impl<A: ImageApi, P: UiPort> Dashboard<A, P> {
    pub fn new(api: A, ui: UiManager<P>, diag: Diagnostics) -> Self {
        Self {
            api,
            ui,
            diag,
            in_flight: InFlight::default(),
            image_timeout: DEFAULT_IMAGE_TIMEOUT,
        }
    }

    pub fn with_image_timeout(mut self, timeout: Duration) -> Self {
        self.image_timeout = timeout;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn ui(&self) -> &UiManager<P> {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiManager<P> {
        &mut self.ui
    }

    /// Page load: render the initial page, then load the catalog (which in
    /// turn loads the status panel).
    pub fn start(&mut self) {
        self.ui.init();
        self.load_categories();
    }

    /// Fire due timers; call whenever the event loop wakes up.
    pub fn tick(&mut self) -> bool {
        self.ui.poll_timers()
    }

    // -- Selection --

    /// Select a category by name. Unknown names are reported and rejected.
    pub fn select_category(&mut self, name: &str) -> bool {
        if self.ui.select_category(name).is_some() {
            return true;
        }
        self.ui
            .show_status(BannerKind::Error, format!("Unknown image type '{name}'"));
        false
    }

    /// Select the response mode from user input.
    pub fn select_mode(&mut self, input: &str) -> bool {
        match input.parse::<ResponseMode>() {
            Ok(mode) => {
                self.ui.select_mode(mode);
                true
            }
            Err(e) => {
                self.diag.warn("select_mode", &e);
                self.ui.show_status(BannerKind::Error, "Invalid API type");
                false
            }
        }
    }

    pub fn set_orientation(&mut self, orientation: Option<Orientation>) {
        self.ui.set_orientation(orientation);
    }

    // -- Tabs / navigation --

    /// Activate a tab of the current page. Opening the statistics tab also
    /// (re)loads its content.
    pub fn switch_tab(&mut self, tab: Tab) -> bool {
        if !self.ui.switch_tab(tab) {
            self.diag.info(
                "switch_tab",
                format!("tab {tab} is not on the {:?} page", self.ui.state().page),
            );
            return false;
        }
        if tab == Tab::Stats {
            self.load_statistics();
        }
        true
    }

    /// Full navigation. Landing on the dashboard page reloads the catalog.
    pub fn navigate(&mut self, item: NavItem) -> Route {
        let route = self.ui.navigate(item);
        // Anything still in flight belongs to the previous page.
        self.in_flight = InFlight::default();
        if route == Route::Home {
            self.load_categories();
        }
        route
    }
}
