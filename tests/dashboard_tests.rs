//! End-to-end behaviour of the dashboard against a canned backend and a
//! recording port.

mod common;

use std::time::Duration;

use common::{Event, RecordingPort, StubApi, count, dashboard, dashboard_with_port};
use imgdash::api::{Category, Orientation};
use imgdash::dashboard::FetchOutcome;
use imgdash::ui::{
    BannerKind, ImageLoadResult, LoadedImage, NavItem, PageVariant, Panel, ResultView, Route,
    StatisticsView, StatusView, Tab, TypeStatOutcome,
};

fn status_json() -> serde_json::Value {
    serde_json::json!({
        "status": "running",
        "version": "1.4.0",
        "start_time": "2026-10-01 08:00:00",
    })
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[test]
fn catalog_replaces_options_in_backend_order() {
    let (mut dash, _) = dashboard(StubApi::new().with_types(&["nature", "anime"]));
    assert!(dash.load_categories());

    let state = dash.ui().state();
    assert_eq!(
        state.categories,
        vec![Category::new("nature"), Category::new("anime")]
    );
    assert_eq!(state.selected_category, Some(Category::new("nature")));

    let port = dash.ui().port();
    assert!(port.events.contains(&Event::Options(
        vec!["nature".to_string(), "anime".to_string()],
        Some("nature".to_string()),
    )));
}

#[test]
fn catalog_success_loads_status_and_counts() {
    let api = StubApi::new()
        .with_types(&["nature"])
        .with_status(status_json())
        .with_count("nature", count(Some(5), Some(3), Some(2)));
    let (mut dash, _) = dashboard(api);
    dash.load_categories();

    assert_eq!(
        dash.api().requests(),
        vec!["/api/img/types", "/api", "/api/img/nature/count"]
    );
    match dash.ui().port().last_status() {
        Some(StatusView::Loaded {
            status, version, ..
        }) => {
            assert_eq!(status, "running");
            assert_eq!(version, "1.4.0");
        }
        other => panic!("unexpected status view: {other:?}"),
    }
}

#[test]
fn catalog_reload_keeps_the_previous_selection_when_still_offered() {
    let (mut dash, _) = dashboard(StubApi::new().with_types(&["nature", "anime"]));
    dash.load_categories();
    assert!(dash.select_category("anime"));

    *dash.api().types.borrow_mut() = Some(vec!["city".to_string(), "anime".to_string()]);
    dash.load_categories();
    assert_eq!(
        dash.ui().state().selected_category,
        Some(Category::new("anime"))
    );

    *dash.api().types.borrow_mut() = Some(vec!["city".to_string()]);
    dash.load_categories();
    assert_eq!(
        dash.ui().state().selected_category,
        Some(Category::new("city"))
    );
}

#[test]
fn catalog_failure_leaves_selector_untouched_and_skips_status() {
    let (mut dash, _) = dashboard(StubApi::new().with_types(&["nature"]));
    dash.load_categories();
    let options_before = dash
        .ui()
        .port()
        .count(|e| matches!(e, Event::Options(..)));

    *dash.api().types.borrow_mut() = None;
    dash.api().requests.borrow_mut().clear();
    assert!(!dash.load_categories());

    assert_eq!(dash.api().requests(), vec!["/api/img/types"]);
    assert_eq!(dash.ui().state().categories, vec![Category::new("nature")]);
    let port = dash.ui().port();
    assert_eq!(
        port.count(|e| matches!(e, Event::Options(..))),
        options_before
    );
    let banner = port.last_banner().expect("error banner");
    assert_eq!(banner.kind, BannerKind::Error);
}

#[test]
fn empty_catalog_leaves_nothing_selected() {
    let (mut dash, _) = dashboard(StubApi::new().with_types(&[]));
    assert!(dash.load_categories());
    assert_eq!(dash.ui().state().selected_category, None);
    assert_eq!(dash.fetch_random_image(), FetchOutcome::Rejected);
}

#[test]
fn start_renders_default_tab_before_loading() {
    let (mut dash, _) = dashboard(StubApi::new().with_types(&["nature"]));
    dash.start();

    let port = dash.ui().port();
    assert_eq!(
        port.events.first(),
        Some(&Event::Spinner(false)),
        "spinner starts hidden"
    );
    assert!(port.events.contains(&Event::Panel(
        PageVariant::Dashboard,
        Tab::Control,
        Panel::ApiConsole
    )));
}

// ---------------------------------------------------------------------------
// Status panel and statistics
// ---------------------------------------------------------------------------

#[test]
fn status_failure_renders_placeholder() {
    let (mut dash, _) = dashboard(StubApi::new());
    dash.load_service_status();
    assert_eq!(
        dash.ui().port().last_status(),
        Some(StatusView::Unavailable)
    );
}

#[test]
fn count_without_orientation_data_omits_sub_lines() {
    let api = StubApi::new()
        .with_types(&["nature"])
        .with_count("nature", count(Some(42), None, Some(0)));
    let (mut dash, _) = dashboard(api);
    dash.load_categories();

    let view = dash.ui().port().last_type_stats().expect("type stats");
    assert_eq!(view.rows.len(), 1);
    assert_eq!(
        view.rows[0].outcome,
        TypeStatOutcome::Counted {
            total: 42,
            horizontal: None,
            vertical: None,
        }
    );
}

#[test]
fn one_failed_count_marks_only_its_row() {
    let api = StubApi::new()
        .with_types(&["nature", "anime", "city"])
        .with_count("nature", count(Some(1), None, None))
        .with_count("city", count(None, None, None));
    let (mut dash, _) = dashboard(api);
    dash.load_categories();

    let rows = dash.ui().port().last_type_stats().expect("type stats").rows;
    assert_eq!(rows.len(), 3);
    assert!(matches!(
        rows[0].outcome,
        TypeStatOutcome::Counted { total: 1, .. }
    ));
    assert_eq!(rows[1].outcome, TypeStatOutcome::Failed);
    assert!(matches!(
        rows[2].outcome,
        TypeStatOutcome::Counted { total: 0, .. }
    ));
}

#[test]
fn statistics_tab_loads_summary_and_rows() {
    let api = StubApi::new()
        .with_types(&["nature", "anime"])
        .with_status(status_json())
        .with_count("nature", count(Some(10), Some(6), Some(4)));
    let (mut dash, _) = dashboard(api);
    assert!(dash.switch_tab(Tab::Stats));

    match dash.ui().port().last_statistics() {
        Some(StatisticsView::Loaded {
            version,
            start_time,
            type_count,
            rows,
        }) => {
            assert_eq!(version, "1.4.0");
            assert_eq!(start_time, "2026-10-01 08:00:00");
            assert_eq!(type_count, 2);
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[1].outcome, TypeStatOutcome::Failed);
        }
        other => panic!("unexpected statistics view: {other:?}"),
    }
}

#[test]
fn statistics_fail_as_a_whole_when_status_is_down() {
    let (mut dash, _) = dashboard(StubApi::new().with_types(&["nature"]));
    dash.load_statistics();
    assert!(matches!(
        dash.ui().port().last_statistics(),
        Some(StatisticsView::Unavailable(_))
    ));
    assert_eq!(dash.api().requests(), vec!["/api"]);
}

#[test]
fn statistics_show_loading_placeholder_first() {
    let (mut dash, _) = dashboard(StubApi::new().with_types(&[]).with_status(status_json()));
    dash.load_statistics();

    let views: Vec<&StatisticsView> = dash
        .ui()
        .port()
        .events
        .iter()
        .filter_map(|e| match e {
            Event::Statistics(v) => Some(v),
            _ => None,
        })
        .collect();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0], &StatisticsView::Loading);
    assert!(matches!(views[1], StatisticsView::Loaded { .. }));
}

#[test]
fn statistics_missing_fields_fall_back_to_na() {
    let api = StubApi::new()
        .with_types(&[])
        .with_status(serde_json::json!({ "message": "hi" }));
    let (mut dash, _) = dashboard(api);
    dash.load_statistics();
    match dash.ui().port().last_statistics() {
        Some(StatisticsView::Loaded {
            version,
            start_time,
            type_count,
            rows,
        }) => {
            assert_eq!(version, "N/A");
            assert_eq!(start_time, "N/A");
            assert_eq!(type_count, 0);
            assert!(rows.is_empty());
        }
        other => panic!("unexpected statistics view: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

#[test]
fn fetch_without_category_issues_no_request() {
    let (mut dash, _) = dashboard(StubApi::new());
    assert_eq!(dash.fetch_random_image(), FetchOutcome::Rejected);

    assert!(dash.api().requests().is_empty());
    let port = dash.ui().port();
    assert!(port.image_sources().is_empty());
    let banner = port.last_banner().expect("banner");
    assert_eq!(banner.kind, BannerKind::Error);
    assert_eq!(banner.message, "Please select an image type");
}

#[test]
fn direct_fetch_adds_cache_buster_to_source_only() {
    let (mut dash, _) = dashboard(StubApi::new().with_types(&["nature"]));
    dash.load_categories();
    assert_eq!(dash.fetch_random_image(), FetchOutcome::Succeeded);

    let port = dash.ui().port();
    let src = port.image_sources().pop().expect("image source");
    let Some(ResultView::Direct { link }) = port.last_result() else {
        panic!("expected a direct result");
    };
    assert_eq!(link, "http://dash.test/random_image/nature");
    assert_ne!(src, link);
    assert!(src.starts_with(&format!("{link}?t=")));
    let (base, millis) = src.rsplit_once("?t=").expect("cache-buster");
    assert_eq!(base, link);
    assert!(millis.parse::<i64>().is_ok());

    assert!(dash.ui().state().image_visible);
    assert!(!dash.ui().state().spinner);
    let banner = port.last_banner().expect("banner");
    assert_eq!(banner.kind, BannerKind::Success);
    assert_eq!(banner.message, "Image loaded");
}

#[test]
fn direct_fetch_with_orientation_keeps_filter_before_cache_buster() {
    let (mut dash, _) = dashboard(StubApi::new().with_types(&["nature"]));
    dash.load_categories();
    dash.set_orientation(Some(Orientation::Vertical));
    dash.fetch_random_image();

    let src = dash.ui().port().image_sources().pop().expect("image source");
    assert!(src.starts_with("http://dash.test/random_image/nature?orientation=vertical&t="));
}

#[test]
fn redirect_fetch_uses_the_link_as_source() {
    let (mut dash, _) = dashboard(StubApi::new().with_types(&["nature"]));
    dash.load_categories();
    assert!(dash.select_mode("redirect"));
    assert_eq!(dash.fetch_random_image(), FetchOutcome::Succeeded);

    let port = dash.ui().port();
    let src = port.image_sources().pop().expect("image source");
    assert_eq!(src, "http://dash.test/random_image/g/nature");
    assert_eq!(
        port.last_result(),
        Some(ResultView::Redirect { link: src })
    );
}

#[test]
fn json_fetch_renders_payload_and_prefixed_links() {
    let api = StubApi::new()
        .with_types(&["nature"])
        .with_json_image(common::nature_json_image());
    let (mut dash, _) = dashboard(api);
    dash.load_categories();
    dash.select_mode("json");
    assert_eq!(dash.fetch_random_image(), FetchOutcome::Succeeded);

    assert!(
        dash.api()
            .requests()
            .contains(&"/random_image/j/nature".to_string())
    );
    let port = dash.ui().port();
    assert_eq!(port.image_sources(), vec!["/img/x.jpg"]);
    match port.last_result() {
        Some(ResultView::Json {
            raw,
            direct_link,
            redirect_link,
        }) => {
            assert!(raw.contains("/img/x.jpg"));
            assert_eq!(direct_link, "http://dash.test/random_image/nature/x");
            assert_eq!(redirect_link, "http://dash.test/random_image/g/nature");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    let banner = port.last_banner().expect("banner");
    assert_eq!(banner.kind, BannerKind::Success);
    assert_eq!(banner.message, "JSON data loaded");
    assert!(dash.ui().state().image_visible);
}

#[test]
fn json_fetch_failure_reports_error_and_skips_image() {
    let (mut dash, _) = dashboard(StubApi::new().with_types(&["nature"]));
    dash.load_categories();
    dash.select_mode("j");
    assert_eq!(dash.fetch_random_image(), FetchOutcome::Failed);

    let port = dash.ui().port();
    assert!(port.image_sources().is_empty());
    assert!(matches!(port.last_result(), Some(ResultView::Error(_))));
    assert_eq!(
        port.last_banner().map(|b| b.message),
        Some("Failed to fetch random image".to_string())
    );
    assert!(!dash.ui().state().spinner);
}

#[test]
fn json_image_load_failure_keeps_success_banner() {
    let api = StubApi::new()
        .with_types(&["nature"])
        .with_json_image(common::nature_json_image());
    let mut port = RecordingPort::default();
    port.fail_next_load("404");
    let (mut dash, _) = dashboard_with_port(api, port);
    dash.load_categories();
    dash.select_mode("json");

    assert_eq!(dash.fetch_random_image(), FetchOutcome::Succeeded);
    assert!(!dash.ui().state().image_visible);
    assert_eq!(
        dash.ui().port().last_banner().map(|b| b.message),
        Some("JSON data loaded".to_string())
    );
}

#[test]
fn direct_image_failure_hides_spinner_and_reports() {
    let mut port = RecordingPort::default();
    port.fail_next_load("connection reset");
    let (mut dash, _) = dashboard_with_port(StubApi::new().with_types(&["nature"]), port);
    dash.load_categories();

    assert_eq!(dash.fetch_random_image(), FetchOutcome::Failed);
    assert!(!dash.ui().state().spinner);
    assert!(!dash.ui().state().image_visible);
    let banner = dash.ui().port().last_banner().expect("banner");
    assert_eq!(banner.kind, BannerKind::Error);
    assert_eq!(banner.message, "Image failed to load");
}

#[test]
fn image_that_never_loads_times_out_as_failure() {
    let mut port = RecordingPort::default();
    port.hold_loads();
    let (mut dash, _) = dashboard_with_port(StubApi::new().with_types(&["nature"]), port);
    dash.load_categories();
    assert_eq!(dash.fetch_random_image(), FetchOutcome::Failed);
}

#[test]
fn invalid_mode_is_reported_and_keeps_previous_mode() {
    let (mut dash, _) = dashboard(StubApi::new().with_types(&["nature"]));
    dash.load_categories();
    assert!(!dash.select_mode("binary"));
    assert_eq!(
        dash.ui().port().last_banner().map(|b| b.message),
        Some("Invalid API type".to_string())
    );
    assert_eq!(
        dash.ui().state().selected_mode,
        imgdash::api::ResponseMode::Direct
    );
}

#[test]
fn unknown_category_is_rejected() {
    let (mut dash, _) = dashboard(StubApi::new().with_types(&["nature"]));
    dash.load_categories();
    assert!(!dash.select_category("cats"));
    assert_eq!(
        dash.ui().state().selected_category,
        Some(Category::new("nature"))
    );
}

#[test]
fn newer_fetch_supersedes_older_one() {
    let mut port = RecordingPort::default();
    port.hold_loads();
    let (mut dash, _) = dashboard_with_port(StubApi::new().with_types(&["nature"]), port);
    dash.load_categories();

    let first = dash.start_fetch().expect("first fetch starts");
    let second = dash.start_fetch().expect("second fetch starts");

    let loaded = ImageLoadResult::Loaded(LoadedImage {
        url: "http://dash.test/img/b.jpg".to_string(),
        content_type: Some("image/jpeg".to_string()),
        bytes: 3,
        saved_to: None,
    });
    for completer in std::mem::take(&mut dash.ui_mut().port_mut().held) {
        completer.complete(loaded.clone());
    }

    let events_before = dash.ui().port().events.len();
    assert_eq!(dash.finish_fetch(first), FetchOutcome::Superseded);
    assert_eq!(dash.ui().port().events.len(), events_before);

    assert_eq!(dash.finish_fetch(second), FetchOutcome::Succeeded);
    assert!(dash.ui().state().image_visible);
}

// ---------------------------------------------------------------------------
// Banners
// ---------------------------------------------------------------------------

#[test]
fn info_banner_hides_after_delay() {
    let mut port = RecordingPort::default();
    port.hold_loads();
    let (mut dash, clock) = dashboard_with_port(StubApi::new().with_types(&["nature"]), port);
    dash.load_categories();

    // Leave the fetch pending so the "Requesting…" banner stays up.
    let _pending = dash.start_fetch().expect("fetch starts");
    assert!(dash.ui().state().banner_visible());

    clock.advance(Duration::from_millis(2999));
    assert!(!dash.tick());
    assert!(dash.ui().state().banner_visible());

    clock.advance(Duration::from_millis(1));
    assert!(dash.tick());
    assert!(!dash.ui().state().banner_visible());
    assert_eq!(dash.ui().port().banners().last(), Some(&None));
}

#[test]
fn success_banner_cancels_pending_hide() {
    let (mut dash, clock) = dashboard(StubApi::new().with_types(&["nature"]));
    dash.load_categories();
    assert_eq!(dash.fetch_random_image(), FetchOutcome::Succeeded);

    clock.advance(Duration::from_secs(10));
    assert!(!dash.tick());
    assert!(dash.ui().state().banner_visible());
    assert_eq!(
        dash.ui().port().last_banner().map(|b| b.message),
        Some("Image loaded".to_string())
    );
}

// ---------------------------------------------------------------------------
// Tabs and navigation
// ---------------------------------------------------------------------------

#[test]
fn tab_from_other_page_is_ignored() {
    let (mut dash, _) = dashboard(StubApi::new());
    assert!(!dash.switch_tab(Tab::Faq));
    assert_eq!(dash.ui().state().active_tab, Some(Tab::Control));
}

#[test]
fn navigating_to_help_resets_state_and_blocks_fetch() {
    let (mut dash, _) = dashboard(StubApi::new().with_types(&["nature"]));
    dash.load_categories();

    assert_eq!(dash.navigate(NavItem::Help), Route::Help);
    let state = dash.ui().state();
    assert_eq!(state.page, PageVariant::Help);
    assert_eq!(state.active_tab, Some(Tab::Guide));
    assert_eq!(state.active_nav, NavItem::Help);
    assert!(state.categories.is_empty());

    assert!(dash.switch_tab(Tab::Faq));
    assert!(
        dash.ui()
            .port()
            .events
            .contains(&Event::Panel(PageVariant::Help, Tab::Faq, Panel::Faq))
    );

    dash.api().requests.borrow_mut().clear();
    assert_eq!(dash.fetch_random_image(), FetchOutcome::Rejected);
    assert!(dash.api().requests().is_empty());
}

#[test]
fn navigating_home_reloads_the_catalog() {
    let (mut dash, _) = dashboard(StubApi::new().with_types(&["nature"]));
    dash.navigate(NavItem::Help);
    dash.api().requests.borrow_mut().clear();

    assert_eq!(dash.navigate(NavItem::Images), Route::Home);
    assert_eq!(dash.api().requests().first().map(String::as_str), Some("/api/img/types"));
    assert_eq!(dash.ui().state().categories, vec![Category::new("nature")]);
    assert!(
        dash.ui()
            .port()
            .events
            .contains(&Event::Navigate(Route::Home, NavItem::Images))
    );
}
