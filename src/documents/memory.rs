use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::UserDocuments;
use crate::config::DEFAULT_LOOKUP_CHUNK;
use crate::error::{Error, Result};
use crate::models::{Book, UserDocument};

/// In-process document store.
///
/// Rejects lookups of more than `max_ids` ids, the way the hosted store does.
pub struct MemoryDocuments {
    users: Mutex<HashMap<String, UserDocument>>,
    books: Mutex<HashMap<String, Book>>,
    max_ids: usize,
    lookups: AtomicUsize,
}

impl Default for MemoryDocuments {
    fn default() -> Self {
        MemoryDocuments::with_max_ids(DEFAULT_LOOKUP_CHUNK)
    }
}

impl MemoryDocuments {
    pub fn with_max_ids(max_ids: usize) -> MemoryDocuments {
        MemoryDocuments {
            users: Mutex::new(HashMap::new()),
            books: Mutex::new(HashMap::new()),
            max_ids,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn insert_user(&self, user: UserDocument) -> Result<()> {
        lock(&self.users)?.insert(user.user_id.clone(), user);
        Ok(())
    }

    pub fn insert_book(&self, book: Book) -> Result<()> {
        lock(&self.books)?.insert(book.book_id.clone(), book);
        Ok(())
    }

    /// Number of `books_by_ids` calls served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserDocuments for MemoryDocuments {
    async fn user(&self, user_id: &str) -> Result<Option<UserDocument>> {
        Ok(lock(&self.users)?.get(user_id).cloned())
    }

    async fn books_by_ids(&self, ids: &[String]) -> Result<Vec<Book>> {
        if ids.is_empty() || ids.len() > self.max_ids {
            return Err(Error::msg(format!(
                "lookup takes 1 to {} ids, got {}",
                self.max_ids,
                ids.len()
            )));
        }

        self.lookups.fetch_add(1, Ordering::SeqCst);
        let books = lock(&self.books)?;

        Ok(ids.iter().filter_map(|id| books.get(id).cloned()).collect())
    }

    async fn update_search_history(&self, user_id: &str, history: Vec<String>) -> Result<()> {
        let mut users = lock(&self.users)?;

        match users.get_mut(user_id) {
            Some(user) => {
                user.search_history = history.into_iter().map(Value::String).collect();
                Ok(())
            }
            None => Err(Error::NotFound(format!("no document for user {}", user_id))),
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>> {
    m.lock()
        .map_err(|_| Error::msg("document store lock poisoned"))
}
