use reqwest::Url;

use crate::error::{Error, Result};

pub fn base(catalog_url: &str) -> Result<Url> {
    let url = Url::parse(catalog_url)
        .map_err(|err| Error::msg(format!("invalid catalog url {}: {}", catalog_url, err)))?;

    if url.cannot_be_a_base() {
        return Err(Error::msg(format!(
            "catalog url {} cannot be a base",
            catalog_url
        )));
    }

    Ok(url)
}

/// `{base}/volumes?q={query}`
pub fn volumes(base: &Url, query: &str) -> Url {
    let mut url = with_segments(base, &["volumes"]);
    url.query_pairs_mut().append_pair("q", query);
    url
}

/// `{base}/volumes/{id}`, with `id` escaped as a single path segment.
pub fn volume(base: &Url, id: &str) -> Url {
    with_segments(base, &["volumes", id])
}

fn with_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    url.set_query(None);

    // `base` is checked by `base()` to be a base url
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }

    url
}
