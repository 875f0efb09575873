use log::{trace, warn};

use super::UserDocuments;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Book, ResultEnvelope, Review, UserDocument, READING_NOW_SHELF};
use crate::stage::{self, Stage};

/// Shelves, favourites, reviews and search history of a user.
pub struct Library<D> {
    documents: D,
    chunk_size: usize,
}

impl<D: UserDocuments> Library<D> {
    pub fn new(documents: D, config: &Config) -> Library<D> {
        Library {
            documents,
            chunk_size: config.lookup_chunk_size.max(1),
        }
    }

    pub async fn reading_list(&self, user_id: &str) -> ResultEnvelope<Vec<Book>> {
        self.shelf_books(user_id, READING_NOW_SHELF).await
    }

    /// Books on the named shelf.
    ///
    /// A missing or empty shelf reports an error alongside an empty list.
    pub async fn shelf_books(&self, user_id: &str, shelf: &str) -> ResultEnvelope<Vec<Book>> {
        trace!("Library::shelf_books({}, {})", user_id, shelf);

        let user = match self.user(user_id).await {
            Ok(user) => user,
            Err(err) => return failed(user_id, err),
        };

        let ids = match user.shelf(shelf) {
            Some(found) if !found.book_ids.is_empty() => found.book_ids.clone(),
            _ => {
                let message = if shelf == READING_NOW_SHELF {
                    "Reading list is empty".to_string()
                } else {
                    format!("{} is empty", shelf)
                };

                return ResultEnvelope {
                    data: Some(Vec::new()),
                    loading: Some(false),
                    error: Some(Error::NotFound(message)),
                };
            }
        };

        self.lookup(user_id, &ids).await
    }

    pub async fn favourite_books(&self, user_id: &str) -> ResultEnvelope<Vec<Book>> {
        let user = match self.user(user_id).await {
            Ok(user) => user,
            Err(err) => return failed(user_id, err),
        };

        if user.favourites.is_empty() {
            return ResultEnvelope::with_data(Vec::new());
        }

        self.lookup(user_id, &user.favourites).await
    }

    pub async fn reviews(&self, user_id: &str) -> ResultEnvelope<Vec<Review>> {
        self.user(user_id).await.map(|user| user.reviews).into()
    }

    /// Stored queries, oldest first. Lookup failures read as no history.
    pub async fn search_history(&self, user_id: &str) -> Vec<String> {
        match self.documents.user(user_id).await {
            Ok(Some(user)) => user.search_queries(),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("{}: can't read search history: {}", user_id, err);
                Vec::new()
            }
        }
    }

    /// Appends `query` to the user's stored history.
    pub async fn record_search(&self, user_id: &str, query: &str) -> Result<()> {
        trace!("Library::record_search({}, {})", user_id, query);

        let mut history = self.user(user_id).await?.search_queries();
        history.push(query.to_string());

        self.documents.update_search_history(user_id, history).await
    }

    async fn user(&self, user_id: &str) -> Result<UserDocument> {
        if user_id.is_empty() {
            return Err(Error::msg("User ID is null or empty"));
        }

        self.documents
            .user(user_id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))
    }

    async fn lookup(&self, user_id: &str, ids: &[String]) -> ResultEnvelope<Vec<Book>> {
        let mut books = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(self.chunk_size) {
            match self.documents.books_by_ids(chunk).await {
                Ok(found) => books.extend(found),
                Err(err) => return failed(user_id, err),
            }
        }

        stage::update(user_id, Stage::FetchedBooks(books.len()));
        ResultEnvelope::with_data(books)
    }
}

fn failed<T>(user_id: &str, err: Error) -> ResultEnvelope<T> {
    stage::update(user_id, Stage::Fail(&err));
    ResultEnvelope::with_error(err)
}

/// The last `n` queries, newest first, each shown once.
pub fn recent_searches(history: &[String], n: usize) -> Vec<String> {
    let start = history.len().saturating_sub(n);

    let mut recent: Vec<String> = Vec::new();
    for query in &history[start..] {
        if !recent.contains(query) {
            recent.push(query.clone());
        }
    }

    recent.reverse();
    recent
}
