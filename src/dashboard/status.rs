use crate::api::{Category, ImageApi};
use crate::ui::view::NOT_AVAILABLE;
use crate::ui::{StatisticsView, StatusView, TypeStatRow, TypeStatsView, UiPort};

use super::Dashboard;

impl<A: ImageApi, P: UiPort> Dashboard<A, P> {
    /// Fetch `/api` and render the summary plus the raw payload. A failure
    /// leaves an inline placeholder in the panel.
    pub fn load_service_status(&mut self) {
        let view = match self.api.fetch_status() {
            Ok(status) => StatusView::from_status(&status),
            Err(e) => {
                self.diag.error("load_service_status", format!("{e:#}"));
                StatusView::Unavailable
            }
        };
        self.ui.set_service_status(&view);
    }

    /// Query the count of every category currently in the selector, one
    /// after the other. A failed lookup marks its own row and the rest
    /// still run.
    pub fn load_type_stats(&mut self) {
        let categories = self.ui.state().categories.clone();
        let rows = self.count_rows("load_type_stats", categories);
        self.ui.set_type_stats(&TypeStatsView { rows });
    }

    /// Populate the statistics tab: service version and start time, the
    /// number of categories, then one row per category. Only the status and
    /// catalog requests can fail the panel as a whole.
    pub fn load_statistics(&mut self) {
        self.ui.set_statistics(&StatisticsView::Loading);
        let summary = self
            .api
            .fetch_status()
            .and_then(|status| Ok((status, self.api.fetch_types()?)));

        let (status, catalog) = match summary {
            Ok(pair) => pair,
            Err(e) => {
                self.diag.error("load_statistics", format!("{e:#}"));
                self.ui
                    .set_statistics(&StatisticsView::Unavailable(e.to_string()));
                return;
            }
        };

        let type_count = catalog.count.unwrap_or(catalog.types.len() as u64);
        let rows = self.count_rows("load_statistics", catalog.types);
        self.ui.set_statistics(&StatisticsView::Loaded {
            version: status.version().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            start_time: status
                .start_time()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            type_count,
            rows,
        });
    }

    fn count_rows(&self, operation: &str, categories: Vec<Category>) -> Vec<TypeStatRow> {
        categories
            .into_iter()
            .map(|category| match self.api.fetch_count(&category) {
                Ok(count) => TypeStatRow::counted(category, &count),
                Err(e) => {
                    self.diag
                        .warn(operation, format!("count for {category} failed: {e:#}"));
                    TypeStatRow::failed(category)
                }
            })
            .collect()
    }
}
