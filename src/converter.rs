//! Raw catalog resources to [`Book`]s.
//!
//! Both functions are total: every missing field maps to its empty value.

use crate::models::{
    Book, ImageLinks, IndustryIdentifier, RawCatalogResource, RawImageLinks,
    RawIndustryIdentifier, RawItem, VolumeInfo,
};

pub fn convert_list(resource: &RawCatalogResource) -> Vec<Book> {
    resource
        .items
        .iter()
        .flatten()
        .flatten()
        .map(convert_one)
        .collect()
}

pub fn convert_one(item: &RawItem) -> Book {
    let empty = VolumeInfo::default();
    let v = item.volume_info.as_ref().unwrap_or(&empty);

    Book {
        book_id: text(&item.id),
        title: text(&v.title),
        subtitle: text(&v.subtitle),
        authors: present(&v.authors),
        publisher: text(&v.publisher),
        published_date: text(&v.published_date),
        description: text(&v.description),
        industry_identifiers: v
            .industry_identifiers
            .iter()
            .flatten()
            .flatten()
            .map(identifier)
            .collect(),
        page_count: v.page_count.unwrap_or(0),
        categories: present(&v.categories),
        average_rating: v.average_rating.unwrap_or(0.0),
        ratings_count: v.ratings_count.unwrap_or(0),
        image_links: image_links(v.image_links.as_ref()),
        language: text(&v.language),
        search_info: item
            .search_info
            .as_ref()
            .and_then(|s| s.text_snippet.clone())
            .unwrap_or_default(),
    }
}

fn text(s: &Option<String>) -> String {
    s.clone().unwrap_or_default()
}

/// Non-null elements of an optional list.
fn present(list: &Option<Vec<Option<String>>>) -> Vec<String> {
    list.iter().flatten().flatten().cloned().collect()
}

fn identifier(raw: &RawIndustryIdentifier) -> IndustryIdentifier {
    IndustryIdentifier {
        kind: text(&raw.kind),
        identifier: text(&raw.identifier),
    }
}

fn image_links(raw: Option<&RawImageLinks>) -> ImageLinks {
    match raw {
        Some(raw) => ImageLinks {
            thumbnail: text(&raw.thumbnail),
            small_thumbnail: text(&raw.small_thumbnail),
        },
        None => ImageLinks::default(),
    }
}
