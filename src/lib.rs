pub mod catalog;
pub mod config;
pub mod converter;
pub mod documents;
pub mod error;
pub mod models;
pub mod prefs;
pub mod repository;
pub mod search;
pub mod stage;

pub use crate::catalog::{Catalog, HttpCatalog};
pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::models::{Book, ResultEnvelope};
pub use crate::repository::BookRepository;
pub use crate::search::{SearchController, SearchState, SearchView};
