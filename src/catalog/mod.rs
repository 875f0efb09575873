use async_trait::async_trait;

use crate::error::Result;
use crate::models::{RawCatalogResource, RawItem};

mod http;
pub mod url;

pub use http::HttpCatalog;

/// Read access to the remote book catalog.
///
/// Implementations issue exactly one request per call and let every failure
/// escape to the caller.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search_books(&self, query: &str) -> Result<RawCatalogResource>;

    async fn fetch_book_by_id(&self, id: &str) -> Result<RawItem>;
}

#[async_trait]
impl<C> Catalog for std::sync::Arc<C>
where
    C: Catalog + ?Sized,
{
    async fn search_books(&self, query: &str) -> Result<RawCatalogResource> {
        (**self).search_books(query).await
    }

    async fn fetch_book_by_id(&self, id: &str) -> Result<RawItem> {
        (**self).fetch_book_by_id(id).await
    }
}
