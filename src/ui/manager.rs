use std::time::{Duration, Instant};

use crate::api::{Category, Orientation, ResponseMode};

use super::image::ImageLoad;
use super::state::{Banner, BannerKind, UiState};
use super::tabs::{NavItem, PageVariant, Route, Tab};
use super::timer::{BannerTimer, Clock, SystemClock};
use super::view::{ResultView, StatisticsView, StatusView, TypeStatsView};
use super::UiPort;

/// Owns [`UiState`] and mirrors every change into the [`UiPort`].
///
/// Components never touch the port directly for state it tracks (spinner,
/// banner, selector, image, tabs); they go through the manager so the state
/// and what is on screen cannot drift apart.
pub struct UiManager<P: UiPort> {
    port: P,
    state: UiState,
    timer: BannerTimer,
    clock: Box<dyn Clock>,
    banner_duration: Duration,
    default_mode: ResponseMode,
}

impl<P: UiPort> UiManager<P> {
    pub fn new(port: P, banner_duration: Duration, default_mode: ResponseMode) -> Self {
        Self {
            port,
            state: UiState::for_page(PageVariant::Dashboard, default_mode),
            timer: BannerTimer::default(),
            clock: Box::new(SystemClock),
            banner_duration,
            default_mode,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Render the initial state of the current page.
    pub fn init(&mut self) {
        self.port.set_spinner(false);
        self.port.set_banner(None);
        if let Some(tab) = self.state.active_tab {
            self.port.set_active_panel(self.state.page, tab, tab.panel());
        }
    }

    // -- Spinner / banner --

    pub fn set_spinner(&mut self, visible: bool) {
        self.state.spinner = visible;
        self.port.set_spinner(visible);
    }

    /// Show a banner. Any pending auto-hide from an earlier banner is
    /// cancelled; `info` banners schedule their own.
    pub fn show_status(&mut self, kind: BannerKind, message: impl Into<String>) {
        self.timer.cancel();
        let banner = Banner {
            kind,
            message: message.into(),
            visible: true,
        };
        self.port.set_banner(Some(&banner));
        self.state.banner = Some(banner);

        if kind == BannerKind::Info {
            self.timer.schedule(self.clock.now(), self.banner_duration);
        }
    }

    pub fn hide_banner(&mut self) {
        self.timer.cancel();
        if let Some(banner) = self.state.banner.as_mut() {
            banner.visible = false;
        }
        self.port.set_banner(None);
    }

    /// Fire due timers. Returns `true` if a banner was hidden.
    pub fn poll_timers(&mut self) -> bool {
        if !self.timer.poll(self.clock.now()) {
            return false;
        }
        if let Some(banner) = self.state.banner.as_mut() {
            banner.visible = false;
        }
        self.port.set_banner(None);
        true
    }

    /// Current time on the manager's clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Time until the next timer is due, if any.
    pub fn next_timer_in(&self) -> Option<Duration> {
        self.timer.remaining(self.clock.now())
    }

    // -- Tabs / navigation --

    /// Activate `tab` and show its panel. Tabs of the other page are ignored.
    pub fn switch_tab(&mut self, tab: Tab) -> bool {
        if tab.page() != self.state.page {
            return false;
        }
        self.state.active_tab = Some(tab);
        self.port.set_active_panel(self.state.page, tab, tab.panel());
        true
    }

    /// Full navigation: marks `item` active and replaces all transient state
    /// with a fresh page.
    pub fn navigate(&mut self, item: NavItem) -> Route {
        let route = item.route();
        self.timer.cancel();
        self.state = UiState::for_page(route.page(), self.default_mode);
        self.state.active_nav = item;
        self.port.navigate(route, item);
        self.init();
        route
    }

    // -- Selector --

    /// Replace the selector options. The previous selection survives if it
    /// is still offered, otherwise the first option is selected.
    pub fn replace_categories(&mut self, categories: Vec<Category>) {
        let keep = self
            .state
            .selected_category
            .as_ref()
            .filter(|c| categories.contains(c))
            .cloned();
        self.state.selected_category = keep.or_else(|| categories.first().cloned());
        self.state.categories = categories;
        self.port.set_category_options(
            &self.state.categories,
            self.state.selected_category.as_ref(),
        );
    }

    /// Select a category by name. Only names from the current option set are
    /// accepted.
    pub fn select_category(&mut self, name: &str) -> Option<&Category> {
        let category = self
            .state
            .categories
            .iter()
            .find(|c| c.as_str() == name)?
            .clone();
        self.state.selected_category = Some(category);
        self.port.set_category_options(
            &self.state.categories,
            self.state.selected_category.as_ref(),
        );
        self.state.selected_category.as_ref()
    }

    pub fn select_mode(&mut self, mode: ResponseMode) {
        self.state.selected_mode = mode;
    }

    pub fn set_orientation(&mut self, orientation: Option<Orientation>) {
        self.state.orientation = orientation;
    }

    // -- Image / panels --

    pub fn set_image_source(&mut self, src: &str) -> ImageLoad {
        self.state.image_src = Some(src.to_string());
        self.port.set_image_source(src)
    }

    /// Hide the placeholder and show the image.
    pub fn show_image(&mut self) {
        self.state.image_visible = true;
        self.port.set_image_visible(true);
    }

    pub fn set_result(&mut self, view: &ResultView) {
        self.port.set_result_content(view);
    }

    pub fn set_service_status(&mut self, view: &StatusView) {
        self.port.set_service_status(view);
    }

    pub fn set_type_stats(&mut self, view: &TypeStatsView) {
        self.port.set_type_stats(view);
    }

    pub fn set_statistics(&mut self, view: &StatisticsView) {
        self.port.set_statistics(view);
    }
}
