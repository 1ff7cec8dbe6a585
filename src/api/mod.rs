/// Client side of the random-image API.
///
/// [`ImageApi`] is the seam the dashboard depends on; [`HttpApi`] is the
/// production implementation and tests substitute their own.
pub mod client;
pub mod endpoints;
pub mod types;

use anyhow::Result;

pub use client::HttpApi;
pub use endpoints::Origin;
pub use types::{
    Category, CategoryCount, JsonImage, Orientation, ResponseMode, ServiceStatus, TypeCatalog,
};

/// The JSON endpoints the dashboard reads.
///
/// Binary and redirect endpoints are not fetched through this trait: their
/// URLs are handed to the image sink of the [`crate::ui::UiPort`], which
/// loads them the way an `<img>` element would.
pub trait ImageApi {
    /// Origin every endpoint URL is built against.
    fn origin(&self) -> &Origin;

    /// `GET /api/img/types`
    fn fetch_types(&self) -> Result<TypeCatalog>;

    /// `GET /api`
    fn fetch_status(&self) -> Result<ServiceStatus>;

    /// `GET /api/img/{type}/count`
    fn fetch_count(&self, category: &Category) -> Result<CategoryCount>;

    /// `GET /random_image/j/{type}`
    fn fetch_json_image(
        &self,
        category: &Category,
        orientation: Option<Orientation>,
    ) -> Result<JsonImage>;
}
