//! Terminal renderer for the dashboard.
//!
//! Every `UiPort` call prints the affected fragment immediately; the
//! formatting lives in free functions that return lines so it can be tested
//! without capturing stdout. Image sources are downloaded on a helper thread
//! with `ureq` (redirects followed), optionally written to a directory.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use colored::Colorize;

use crate::api::{Category, Origin};

use super::image::{ImageLoad, ImageLoadResult, LoadedImage};
use super::state::{Banner, BannerKind};
use super::tabs::{NavItem, PageVariant, Panel, Route, Tab};
use super::view::{
    ResultView, StatisticsView, StatusView, TypeStatOutcome, TypeStatRow, TypeStatsView,
};
use super::UiPort;

/// Upper bound on a downloaded image. Larger bodies fail the load.
pub const MAX_IMAGE_BYTES: u64 = 50 * 1024 * 1024;

/// [`UiPort`] that prints to stdout.
#[derive(Debug, Clone)]
pub struct TerminalPort {
    origin: Origin,
    timeout: Duration,
    save_dir: Option<PathBuf>,
}

impl TerminalPort {
    pub fn new(origin: Origin, timeout: Duration, save_dir: Option<PathBuf>) -> Self {
        Self {
            origin,
            timeout,
            save_dir,
        }
    }
}

impl UiPort for TerminalPort {
    fn set_category_options(&mut self, options: &[Category], selected: Option<&Category>) {
        println!("{}", render_categories(options, selected));
    }

    fn set_image_source(&mut self, src: &str) -> ImageLoad {
        let url = self.origin.resolve(src);
        let timeout = self.timeout;
        let save_dir = self.save_dir.clone();
        println!("  {} {}", "image:".dimmed(), url);
        ImageLoad::spawn(move || load_image(&url, timeout, save_dir.as_deref()))
    }

    fn set_image_visible(&mut self, visible: bool) {
        if !visible {
            println!("  {}", "[no image]".dimmed());
        }
    }

    fn set_result_content(&mut self, content: &ResultView) {
        for line in render_result(content) {
            println!("{line}");
        }
    }

    fn set_spinner(&mut self, visible: bool) {
        if visible {
            println!("  {}", "loading…".dimmed());
        }
    }

    fn set_banner(&mut self, banner: Option<&Banner>) {
        if let Some(banner) = banner {
            println!("{}", render_banner(banner));
        }
    }

    fn set_active_panel(&mut self, page: PageVariant, tab: Tab, _panel: Panel) {
        println!("{}", render_tabs(page, tab));
    }

    fn set_service_status(&mut self, view: &StatusView) {
        for line in render_status(view) {
            println!("{line}");
        }
    }

    fn set_type_stats(&mut self, view: &TypeStatsView) {
        println!("{}", "Images per type".bold().cyan());
        for row in &view.rows {
            for line in render_stat_row(row) {
                println!("{line}");
            }
        }
    }

    fn set_statistics(&mut self, view: &StatisticsView) {
        for line in render_statistics(view) {
            println!("{line}");
        }
    }

    fn navigate(&mut self, route: Route, _item: NavItem) {
        println!();
        println!("{} {}", "→".bold(), route.path().bold());
    }
}

// ---------------------------------------------------------------------------
// Image loading
// ---------------------------------------------------------------------------

/// Download `url` the way an image element would: follow redirects, and
/// treat anything that is not an `image/*` response as a load error.
fn load_image(url: &str, timeout: Duration, save_dir: Option<&Path>) -> ImageLoadResult {
    let resp = match ureq::get(url).timeout(timeout).call() {
        Ok(resp) => resp,
        Err(e) => return ImageLoadResult::Failed(e.to_string()),
    };

    let final_url = resp.get_url().to_string();
    let content_type = resp.header("Content-Type").map(str::to_string);
    if let Some(ct) = &content_type
        && !ct.starts_with("image/")
    {
        return ImageLoadResult::Failed(format!("not an image ({ct})"));
    }

    let mut bytes = Vec::new();
    if let Err(e) = resp
        .into_reader()
        .take(MAX_IMAGE_BYTES + 1)
        .read_to_end(&mut bytes)
    {
        return ImageLoadResult::Failed(format!("failed reading image body: {e}"));
    }
    if bytes.len() as u64 > MAX_IMAGE_BYTES {
        return ImageLoadResult::Failed(format!(
            "image exceeds {MAX_IMAGE_BYTES} bytes"
        ));
    }

    let saved_to = match save_dir {
        Some(dir) => match save_image(dir, &final_url, &bytes) {
            Ok(path) => Some(path),
            Err(e) => return ImageLoadResult::Failed(format!("failed to save image: {e}")),
        },
        None => None,
    };

    ImageLoadResult::Loaded(LoadedImage {
        url: final_url,
        content_type,
        bytes: bytes.len(),
        saved_to,
    })
}

fn save_image(dir: &Path, url: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name_for(url));
    fs::write(&path, bytes)?;
    Ok(path)
}

/// Last path segment of `url`, or a timestamped fallback.
pub fn file_name_for(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.rsplit('/').next() {
        Some(name) if name.contains('.') && !name.starts_with('.') => name.to_string(),
        _ => format!("image-{}", chrono::Utc::now().timestamp_millis()),
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

pub fn render_categories(options: &[Category], selected: Option<&Category>) -> String {
    if options.is_empty() {
        return format!("  {} {}", "Types:".bold(), "(none)".dimmed());
    }
    let names: Vec<String> = options
        .iter()
        .map(|c| {
            if Some(c) == selected {
                format!("[{}]", c).bold().to_string()
            } else {
                c.to_string()
            }
        })
        .collect();
    format!("  {} {}", "Types:".bold(), names.join("  "))
}

pub fn render_banner(banner: &Banner) -> String {
    let tag = match banner.kind {
        BannerKind::Success => "✓".green().bold(),
        BannerKind::Error => "✗".red().bold(),
        BannerKind::Info => "•".blue().bold(),
    };
    format!("{} {}", tag, banner.message)
}

pub fn render_tabs(page: PageVariant, active: Tab) -> String {
    let tabs: Vec<String> = page
        .tabs()
        .iter()
        .map(|&t| {
            if t == active {
                format!("[{}]", t.label()).bold().cyan().to_string()
            } else {
                t.label().dimmed().to_string()
            }
        })
        .collect();
    format!("{}  {}", page.route().path().dimmed(), tabs.join(" "))
}

pub fn render_status(view: &StatusView) -> Vec<String> {
    match view {
        StatusView::Loaded {
            status,
            version,
            raw,
        } => {
            let mut lines = vec![
                "Service Status".bold().cyan().to_string(),
                format!("  {} {}", "Status: ".bold(), status),
                format!("  {} {}", "Version:".bold(), version),
            ];
            lines.extend(raw.lines().map(|l| format!("  {}", l.dimmed())));
            lines
        }
        StatusView::Unavailable => vec!["Unable to fetch service status".red().to_string()],
    }
}

pub fn render_stat_row(row: &TypeStatRow) -> Vec<String> {
    match row.outcome {
        TypeStatOutcome::Counted {
            total,
            horizontal,
            vertical,
        } => {
            let mut lines = vec![format!("  {:<16} {:>6}", row.category, total)];
            if let Some(h) = horizontal {
                lines.push(format!("    {} {}", "horizontal:".dimmed(), h));
            }
            if let Some(v) = vertical {
                lines.push(format!("    {} {}", "vertical:".dimmed(), v));
            }
            lines
        }
        TypeStatOutcome::Failed => vec![format!(
            "  {:<16} {}",
            row.category,
            "count unavailable".red()
        )],
    }
}

pub fn render_statistics(view: &StatisticsView) -> Vec<String> {
    match view {
        StatisticsView::Loading => vec!["Loading statistics…".dimmed().to_string()],
        StatisticsView::Loaded {
            version,
            start_time,
            type_count,
            rows,
        } => {
            let mut lines = vec![
                "Statistics".bold().cyan().to_string(),
                "=".repeat(40),
                format!("  {} {}", "Version:    ".bold(), version),
                format!("  {} {}", "Started:    ".bold(), start_time),
                format!("  {} {}", "Image types:".bold(), type_count),
                String::new(),
            ];
            for row in rows {
                lines.extend(render_stat_row(row));
            }
            lines
        }
        StatisticsView::Unavailable(reason) => {
            vec![format!("{} {}", "Unable to load statistics:".red(), reason)]
        }
    }
}

pub fn render_result(view: &ResultView) -> Vec<String> {
    match view {
        ResultView::Direct { link } => vec![format!("  Direct image: {}", link.underline())],
        ResultView::Redirect { link } => vec![format!("  Redirects to: {}", link.underline())],
        ResultView::Json {
            raw,
            direct_link,
            redirect_link,
        } => {
            let mut lines: Vec<String> = raw.lines().map(|l| format!("  {l}")).collect();
            lines.push(format!("  Direct URL:   {}", direct_link.underline()));
            lines.push(format!("  Redirect URL: {}", redirect_link.underline()));
            lines
        }
        ResultView::Error(message) => vec![format!("  {} {}", "Error:".red().bold(), message)],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
