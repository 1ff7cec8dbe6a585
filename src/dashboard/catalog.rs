use crate::api::ImageApi;
use crate::ui::{BannerKind, UiPort};

use super::Dashboard;

impl<A: ImageApi, P: UiPort> Dashboard<A, P> {
    /// Load the category list into the selector.
    ///
    /// On success the selector is replaced wholesale, in backend order, and
    /// the status panel loads follow. On failure the previous options stay
    /// untouched and nothing else is loaded. Safe to call repeatedly.
    pub fn load_categories(&mut self) -> bool {
        if !self.sync_catalog() {
            return false;
        }
        self.load_service_status();
        self.load_type_stats();
        true
    }

    /// The selector half of [`load_categories`](Self::load_categories),
    /// without the status panel loads.
    pub fn sync_catalog(&mut self) -> bool {
        let catalog = match self.api.fetch_types() {
            Ok(catalog) => catalog,
            Err(e) => {
                self.diag.error("load_categories", format!("{e:#}"));
                self.ui.show_status(
                    BannerKind::Error,
                    "Failed to load image types, is the backend running?",
                );
                return false;
            }
        };

        self.diag.info(
            "load_categories",
            format!("{} image types", catalog.types.len()),
        );
        self.ui.replace_categories(catalog.types);
        true
    }
}
