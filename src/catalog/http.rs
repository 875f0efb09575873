use async_trait::async_trait;
use log::{debug, trace};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use super::{url, Catalog};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{RawCatalogResource, RawItem};

/// # Books API client
/// No authentication is needed for volume search or lookup.
pub struct HttpCatalog {
    client: reqwest::Client,
    base: Url,
}

impl HttpCatalog {
    pub fn new(config: &Config) -> Result<HttpCatalog> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(HttpCatalog {
            client,
            base: url::base(&config.catalog_url)?,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        debug!("{} -> {}", url, status);

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("{} was not found", url.path())));
        }

        if !status.is_success() {
            return Err(Error::Network(format!("{} returned {}", url, status)));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn search_books(&self, query: &str) -> Result<RawCatalogResource> {
        trace!("HttpCatalog::search_books({})", query);
        self.get_json(url::volumes(&self.base, query)).await
    }

    async fn fetch_book_by_id(&self, id: &str) -> Result<RawItem> {
        trace!("HttpCatalog::fetch_book_by_id({})", id);
        self.get_json(url::volume(&self.base, id)).await
    }
}
