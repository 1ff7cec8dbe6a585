use std::time::Instant;

use chrono::Utc;

use crate::api::endpoints::with_cache_buster;
use crate::api::{ImageApi, ResponseMode};
use crate::ui::{BannerKind, ImageLoad, ImageLoadResult, PageVariant, ResultView, UiPort};

use super::inflight::FetchTicket;
use super::Dashboard;

/// How a fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A precondition failed; no request was issued.
    Rejected,
    /// The request, the JSON body, or the image load failed.
    Failed,
    Succeeded,
    /// A newer fetch started first; this one's result was dropped.
    Superseded,
}

/// A fetch whose image is still loading.
#[derive(Debug)]
pub struct PendingFetch {
    ticket: FetchTicket,
    mode: ResponseMode,
    load: ImageLoad,
    deadline: Instant,
}

/// Result of a non-blocking check on a [`PendingFetch`].
#[derive(Debug)]
pub enum FetchProgress {
    Done(FetchOutcome),
    Pending(PendingFetch),
}

impl<A: ImageApi, P: UiPort> Dashboard<A, P> {
    /// Fetch a random image of the selected category in the selected mode
    /// and wait for it to load.
    pub fn fetch_random_image(&mut self) -> FetchOutcome {
        match self.start_fetch() {
            Ok(pending) => self.finish_fetch(pending),
            Err(outcome) => outcome,
        }
    }

    /// Issue the request for the current selection and assign the image
    /// source. Returns the pending load, or the outcome if the fetch ended
    /// before any image load started.
    ///
    /// In `json` mode success is declared here, as soon as the payload is
    /// in and the source assigned; the image load that follows only toggles
    /// the image's visibility. `direct` and `redirect` report success or
    /// failure from [`finish_fetch`](Self::finish_fetch) once the image
    /// itself has loaded.
    pub fn start_fetch(&mut self) -> Result<PendingFetch, FetchOutcome> {
        if self.ui.state().page != PageVariant::Dashboard {
            self.diag
                .info("fetch_random_image", "not on the dashboard page, ignored");
            return Err(FetchOutcome::Rejected);
        }

        let Some(category) = self.ui.state().selected_category.clone() else {
            self.ui
                .show_status(BannerKind::Error, "Please select an image type");
            return Err(FetchOutcome::Rejected);
        };
        let mode = self.ui.state().selected_mode;
        let orientation = self.ui.state().orientation;

        let ticket = self.in_flight.begin();
        self.ui.set_spinner(true);
        self.ui.show_status(BannerKind::Info, "Requesting…");

        let origin = self.api.origin().clone();
        let link = origin.random_image_url(mode, &category, orientation);

        let load = match mode {
            ResponseMode::Direct => {
                let src = with_cache_buster(&link, Utc::now().timestamp_millis());
                let load = self.ui.set_image_source(&src);
                self.ui.set_result(&ResultView::Direct { link });
                load
            }
            ResponseMode::Redirect => {
                let load = self.ui.set_image_source(&link);
                self.ui.set_result(&ResultView::Redirect { link });
                load
            }
            ResponseMode::Json => {
                let image = match self.api.fetch_json_image(&category, orientation) {
                    Ok(image) => image,
                    Err(e) => {
                        self.diag.error("fetch_random_image", format!("{e:#}"));
                        self.in_flight.finish(ticket);
                        self.ui
                            .show_status(BannerKind::Error, "Failed to fetch random image");
                        self.ui.set_result(&ResultView::Error(e.to_string()));
                        self.ui.set_spinner(false);
                        return Err(FetchOutcome::Failed);
                    }
                };

                let load = self.ui.set_image_source(&image.path);
                self.ui.set_result(&ResultView::Json {
                    raw: image.pretty(),
                    direct_link: origin.resolve(&image.direct_url),
                    redirect_link: origin.resolve(&image.redirect_url),
                });
                self.ui
                    .show_status(BannerKind::Success, "JSON data loaded");
                self.ui.set_spinner(false);
                load
            }
        };

        Ok(PendingFetch {
            ticket,
            mode,
            load,
            deadline: self.ui.now() + self.image_timeout,
        })
    }

    /// Wait for the image of `pending` and apply the result, unless a newer
    /// fetch has started since, in which case nothing on screen changes.
    pub fn finish_fetch(&mut self, pending: PendingFetch) -> FetchOutcome {
        if !self.in_flight.is_current(pending.ticket) {
            return self.supersede();
        }

        let remaining = pending.deadline.saturating_duration_since(self.ui.now());
        let result = pending.load.wait(remaining);
        self.complete_fetch(pending.ticket, pending.mode, result)
    }

    /// Check on `pending` without blocking. A superseded fetch ends at once;
    /// a load still running past its deadline fails as timed out.
    pub fn poll_fetch(&mut self, pending: PendingFetch) -> FetchProgress {
        if !self.in_flight.is_current(pending.ticket) {
            return FetchProgress::Done(self.supersede());
        }

        let result = match pending.load.try_result() {
            Some(result) => result,
            None if self.ui.now() >= pending.deadline => {
                ImageLoadResult::Failed("image load timed out".to_string())
            }
            None => return FetchProgress::Pending(pending),
        };
        FetchProgress::Done(self.complete_fetch(pending.ticket, pending.mode, result))
    }

    fn supersede(&self) -> FetchOutcome {
        self.diag
            .info("fetch_random_image", "superseded by a newer fetch");
        FetchOutcome::Superseded
    }

    fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        mode: ResponseMode,
        result: ImageLoadResult,
    ) -> FetchOutcome {
        self.in_flight.finish(ticket);

        match (mode, result) {
            (ResponseMode::Json, ImageLoadResult::Loaded(_)) => {
                self.ui.show_image();
                FetchOutcome::Succeeded
            }
            (ResponseMode::Json, ImageLoadResult::Failed(reason)) => {
                // Success was already reported for the JSON payload.
                self.diag.warn("fetch_random_image", reason);
                FetchOutcome::Succeeded
            }
            (_, ImageLoadResult::Loaded(loaded)) => {
                self.diag.info("fetch_random_image", loaded.describe());
                self.ui.show_image();
                self.ui.show_status(BannerKind::Success, "Image loaded");
                self.ui.set_spinner(false);
                FetchOutcome::Succeeded
            }
            (_, ImageLoadResult::Failed(reason)) => {
                self.diag.error("fetch_random_image", reason);
                self.ui.set_spinner(false);
                self.ui
                    .show_status(BannerKind::Error, "Image failed to load");
                FetchOutcome::Failed
            }
        }
    }
}
