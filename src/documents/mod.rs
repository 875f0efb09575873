//! The hosted user-document store, seen through an injected capability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Book, UserDocument};

mod library;
mod memory;

pub use library::{recent_searches, Library};
pub use memory::MemoryDocuments;

#[async_trait]
pub trait UserDocuments: Send + Sync {
    /// `Ok(None)` when no document exists for `user_id`.
    async fn user(&self, user_id: &str) -> Result<Option<UserDocument>>;

    /// Book documents whose `bookID` is in `ids`. Unknown ids are skipped.
    ///
    /// Callers keep `ids` within the store's per-query limit.
    async fn books_by_ids(&self, ids: &[String]) -> Result<Vec<Book>>;

    async fn update_search_history(&self, user_id: &str, history: Vec<String>) -> Result<()>;
}

#[async_trait]
impl<D> UserDocuments for std::sync::Arc<D>
where
    D: UserDocuments + ?Sized,
{
    async fn user(&self, user_id: &str) -> Result<Option<UserDocument>> {
        (**self).user(user_id).await
    }

    async fn books_by_ids(&self, ids: &[String]) -> Result<Vec<Book>> {
        (**self).books_by_ids(ids).await
    }

    async fn update_search_history(&self, user_id: &str, history: Vec<String>) -> Result<()> {
        (**self).update_search_history(user_id, history).await
    }
}
