use std::env;
use std::path::PathBuf;
use std::time::Duration;

use log::warn;

pub const DEFAULT_CATALOG_URL: &str = "https://www.googleapis.com/books/v1";

/// The hosted document store rejects `in` queries with more than ten values.
pub const DEFAULT_LOOKUP_CHUNK: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub lookup_chunk_size: usize,
    pub prefs_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("bookshelf/{}", env!("CARGO_PKG_VERSION")),
            lookup_chunk_size: DEFAULT_LOOKUP_CHUNK,
            prefs_dir: env::temp_dir().join("bookshelf"),
        }
    }
}

impl Config {
    /// `Config::default()` overridden by any `BOOKSHELF_*` variables that are set.
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_env() -> Config {
        let mut config = Config::default();

        if let Ok(url) = env::var("BOOKSHELF_CATALOG_URL") {
            config.catalog_url = url;
        }

        if let Ok(secs) = env::var("BOOKSHELF_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(err) => warn!("ignoring BOOKSHELF_TIMEOUT_SECS={}: {}", secs, err),
            }
        }

        if let Ok(chunk) = env::var("BOOKSHELF_LOOKUP_CHUNK") {
            match chunk.parse::<usize>() {
                Ok(n) if n > 0 => config.lookup_chunk_size = n,
                _ => warn!("ignoring BOOKSHELF_LOOKUP_CHUNK={}", chunk),
            }
        }

        if let Ok(dir) = env::var("BOOKSHELF_PREFS_DIR") {
            config.prefs_dir = PathBuf::from(dir);
        }

        config
    }

    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Config {
        self.catalog_url = url.into();
        self
    }

    /// A chunk size of zero is treated as one.
    pub fn with_lookup_chunk_size(mut self, n: usize) -> Config {
        self.lookup_chunk_size = n.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, DEFAULT_CATALOG_URL, DEFAULT_LOOKUP_CHUNK};

    #[test]
    fn default_points_at_books_api() -> anyhow::Result<()> {
        let config = Config::default();

        assert_eq!(DEFAULT_CATALOG_URL, config.catalog_url);
        assert_eq!(DEFAULT_LOOKUP_CHUNK, config.lookup_chunk_size);

        Ok(())
    }

    #[test]
    fn zero_chunk_size_is_clamped() -> anyhow::Result<()> {
        let config = Config::default().with_lookup_chunk_size(0);

        assert_eq!(1, config.lookup_chunk_size);

        Ok(())
    }
}
