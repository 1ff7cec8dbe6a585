//! Shared test doubles: a recording `UiPort` and a canned `ImageApi`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use anyhow::{Result, anyhow};

use imgdash::api::{
    Category, CategoryCount, ImageApi, JsonImage, Orientation, Origin, ResponseMode,
    ServiceStatus, TypeCatalog,
};
use imgdash::dashboard::Dashboard;
use imgdash::diagnostics::Diagnostics;
use imgdash::ui::image::ImageLoadCompleter;
use imgdash::ui::timer::ManualClock;
use imgdash::ui::{
    Banner, ImageLoad, ImageLoadResult, LoadedImage, NavItem, PageVariant, Panel, ResultView,
    Route, StatisticsView, StatusView, Tab, TypeStatsView, UiManager, UiPort,
};

pub const ORIGIN: &str = "http://dash.test";

// ---------------------------------------------------------------------------
// Recording port
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Options(Vec<String>, Option<String>),
    ImageSource(String),
    ImageVisible(bool),
    Result(ResultView),
    Spinner(bool),
    Banner(Option<Banner>),
    Panel(PageVariant, Tab, Panel),
    Status(StatusView),
    TypeStats(TypeStatsView),
    Statistics(StatisticsView),
    Navigate(Route, NavItem),
}

/// Records every port call. Image loads resolve immediately as loaded unless
/// a failure is queued or loads are held for manual completion.
#[derive(Debug, Default)]
pub struct RecordingPort {
    pub events: Vec<Event>,
    queued_loads: VecDeque<ImageLoadResult>,
    hold_loads: bool,
    pub held: Vec<ImageLoadCompleter>,
}

impl RecordingPort {
    pub fn fail_next_load(&mut self, reason: &str) {
        self.queued_loads
            .push_back(ImageLoadResult::Failed(reason.to_string()));
    }

    /// Keep future loads pending; complete them through `held`.
    pub fn hold_loads(&mut self) {
        self.hold_loads = true;
    }

    pub fn banners(&self) -> Vec<Option<Banner>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Banner(b) => Some(b.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_banner(&self) -> Option<Banner> {
        self.banners().into_iter().last().flatten()
    }

    pub fn image_sources(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::ImageSource(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_result(&self) -> Option<ResultView> {
        self.events.iter().rev().find_map(|e| match e {
            Event::Result(r) => Some(r.clone()),
            _ => None,
        })
    }

    pub fn last_type_stats(&self) -> Option<TypeStatsView> {
        self.events.iter().rev().find_map(|e| match e {
            Event::TypeStats(v) => Some(v.clone()),
            _ => None,
        })
    }

    pub fn last_status(&self) -> Option<StatusView> {
        self.events.iter().rev().find_map(|e| match e {
            Event::Status(v) => Some(v.clone()),
            _ => None,
        })
    }

    pub fn last_statistics(&self) -> Option<StatisticsView> {
        self.events.iter().rev().find_map(|e| match e {
            Event::Statistics(v) => Some(v.clone()),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl UiPort for RecordingPort {
    fn set_category_options(&mut self, options: &[Category], selected: Option<&Category>) {
        self.events.push(Event::Options(
            options.iter().map(|c| c.to_string()).collect(),
            selected.map(|c| c.to_string()),
        ));
    }

    fn set_image_source(&mut self, src: &str) -> ImageLoad {
        self.events.push(Event::ImageSource(src.to_string()));
        if self.hold_loads {
            let (completer, load) = ImageLoad::channel();
            self.held.push(completer);
            return load;
        }
        let result = self.queued_loads.pop_front().unwrap_or_else(|| {
            ImageLoadResult::Loaded(LoadedImage {
                url: src.to_string(),
                content_type: Some("image/jpeg".to_string()),
                bytes: 4,
                saved_to: None,
            })
        });
        ImageLoad::ready(result)
    }

    fn set_image_visible(&mut self, visible: bool) {
        self.events.push(Event::ImageVisible(visible));
    }

    fn set_result_content(&mut self, content: &ResultView) {
        self.events.push(Event::Result(content.clone()));
    }

    fn set_spinner(&mut self, visible: bool) {
        self.events.push(Event::Spinner(visible));
    }

    fn set_banner(&mut self, banner: Option<&Banner>) {
        self.events.push(Event::Banner(banner.cloned()));
    }

    fn set_active_panel(&mut self, page: PageVariant, tab: Tab, panel: Panel) {
        self.events.push(Event::Panel(page, tab, panel));
    }

    fn set_service_status(&mut self, view: &StatusView) {
        self.events.push(Event::Status(view.clone()));
    }

    fn set_type_stats(&mut self, view: &TypeStatsView) {
        self.events.push(Event::TypeStats(view.clone()));
    }

    fn set_statistics(&mut self, view: &StatisticsView) {
        self.events.push(Event::Statistics(view.clone()));
    }

    fn navigate(&mut self, route: Route, item: NavItem) {
        self.events.push(Event::Navigate(route, item));
    }
}

// ---------------------------------------------------------------------------
// Stub API
// ---------------------------------------------------------------------------

/// Canned backend. `None` / missing entries make the call fail. Every call
/// is logged as the path it would have requested.
#[derive(Debug)]
pub struct StubApi {
    origin: Origin,
    pub types: RefCell<Option<Vec<String>>>,
    pub status: RefCell<Option<serde_json::Value>>,
    pub counts: RefCell<HashMap<String, CategoryCount>>,
    pub json_image: RefCell<Option<JsonImage>>,
    pub requests: RefCell<Vec<String>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self {
            origin: Origin::new(ORIGIN),
            types: RefCell::new(None),
            status: RefCell::new(None),
            counts: RefCell::new(HashMap::new()),
            json_image: RefCell::new(None),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_types(self, types: &[&str]) -> Self {
        *self.types.borrow_mut() = Some(types.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn with_status(self, status: serde_json::Value) -> Self {
        *self.status.borrow_mut() = Some(status);
        self
    }

    pub fn with_count(self, category: &str, count: CategoryCount) -> Self {
        self.counts.borrow_mut().insert(category.to_string(), count);
        self
    }

    pub fn with_json_image(self, image: JsonImage) -> Self {
        *self.json_image.borrow_mut() = Some(image);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    fn log(&self, url: String) {
        let path = url.strip_prefix(ORIGIN).unwrap_or(&url).to_string();
        self.requests.borrow_mut().push(path);
    }
}

impl ImageApi for StubApi {
    fn origin(&self) -> &Origin {
        &self.origin
    }

    fn fetch_types(&self) -> Result<TypeCatalog> {
        self.log(self.origin.types_url());
        let types = self
            .types
            .borrow()
            .clone()
            .ok_or_else(|| anyhow!("connection refused"))?;
        Ok(TypeCatalog {
            count: Some(types.len() as u64),
            types: types.into_iter().map(Category::new).collect(),
        })
    }

    fn fetch_status(&self) -> Result<ServiceStatus> {
        self.log(self.origin.status_url());
        self.status
            .borrow()
            .clone()
            .map(ServiceStatus::from_value)
            .ok_or_else(|| anyhow!("connection refused"))
    }

    fn fetch_count(&self, category: &Category) -> Result<CategoryCount> {
        self.log(self.origin.count_url(category));
        self.counts
            .borrow()
            .get(category.as_str())
            .copied()
            .ok_or_else(|| anyhow!("HTTP 404 for {category}"))
    }

    fn fetch_json_image(
        &self,
        category: &Category,
        orientation: Option<Orientation>,
    ) -> Result<JsonImage> {
        self.log(
            self.origin
                .random_image_url(ResponseMode::Json, category, orientation),
        );
        self.json_image
            .borrow()
            .clone()
            .ok_or_else(|| anyhow!("invalid JSON"))
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub type TestDashboard = Dashboard<StubApi, RecordingPort>;

pub fn dashboard(api: StubApi) -> (TestDashboard, ManualClock) {
    dashboard_with_port(api, RecordingPort::default())
}

pub fn dashboard_with_port(api: StubApi, port: RecordingPort) -> (TestDashboard, ManualClock) {
    let clock = ManualClock::new();
    let ui = UiManager::new(port, Duration::from_secs(3), ResponseMode::Direct)
        .with_clock(clock.clone());
    let dashboard = Dashboard::new(api, ui, Diagnostics::disabled())
        .with_image_timeout(Duration::from_millis(200));
    (dashboard, clock)
}

pub fn count(total: Option<u64>, horizontal: Option<u64>, vertical: Option<u64>) -> CategoryCount {
    CategoryCount {
        total_count: total,
        horizontal_count: horizontal,
        vertical_count: vertical,
    }
}

pub fn nature_json_image() -> JsonImage {
    serde_json::from_value(serde_json::json!({
        "path": "/img/x.jpg",
        "direct_url": "/random_image/nature/x",
        "redirect_url": "/random_image/g/nature",
    }))
    .unwrap()
}
