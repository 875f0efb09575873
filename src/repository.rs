use log::trace;

use crate::catalog::Catalog;
use crate::converter;
use crate::models::{Book, ResultEnvelope};
use crate::stage::{self, Stage};

/// Catalog access for the UI layer.
///
/// Every outcome, including failures, comes back as a [`ResultEnvelope`].
pub struct BookRepository<C> {
    catalog: C,
}

impl<C: Catalog> BookRepository<C> {
    pub fn new(catalog: C) -> BookRepository<C> {
        BookRepository { catalog }
    }

    pub async fn get_books(&self, query: &str) -> ResultEnvelope<Vec<Book>> {
        trace!("BookRepository::get_books({})", query);

        match self.catalog.search_books(query).await {
            Ok(resource) => {
                let books = converter::convert_list(&resource);
                stage::update(query, Stage::FetchedBooks(books.len()));
                ResultEnvelope::with_data(books)
            }
            Err(err) => {
                stage::update(query, Stage::Fail(&err));
                ResultEnvelope::with_error(err)
            }
        }
    }

    pub async fn get_book_info(&self, id: &str) -> ResultEnvelope<Book> {
        trace!("BookRepository::get_book_info({})", id);

        match self.catalog.fetch_book_by_id(id).await {
            Ok(item) => {
                stage::update(id, Stage::FetchedBook);
                ResultEnvelope::with_data(converter::convert_one(&item))
            }
            Err(err) => {
                stage::update(id, Stage::Fail(&err));
                ResultEnvelope::with_error(err)
            }
        }
    }
}
