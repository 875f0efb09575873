//! Wire shapes of the books API.
//!
//! The service omits fields liberally, so every field is optional and every
//! list may contain `null` entries. Unknown fields are ignored.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCatalogResource {
    pub kind: Option<String>,
    pub total_items: Option<i64>,
    pub items: Option<Vec<Option<RawItem>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    pub id: Option<String>,
    pub kind: Option<String>,
    pub etag: Option<String>,
    pub self_link: Option<String>,
    pub access_info: Option<AccessInfo>,
    pub sale_info: Option<SaleInfo>,
    pub search_info: Option<SearchInfo>,
    pub volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub authors: Option<Vec<Option<String>>>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub industry_identifiers: Option<Vec<Option<RawIndustryIdentifier>>>,
    pub reading_modes: Option<ReadingModes>,
    pub page_count: Option<i64>,
    pub print_type: Option<String>,
    pub categories: Option<Vec<Option<String>>>,
    pub average_rating: Option<f64>,
    pub ratings_count: Option<i64>,
    pub maturity_rating: Option<String>,
    pub allow_anon_logging: Option<bool>,
    pub content_version: Option<String>,
    #[serde(alias = "penalizationSummary")]
    pub panelization_summary: Option<PanelizationSummary>,
    pub image_links: Option<RawImageLinks>,
    pub language: Option<String>,
    pub preview_link: Option<String>,
    pub info_link: Option<String>,
    pub canonical_volume_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawIndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReadingModes {
    pub text: Option<bool>,
    pub image: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelizationSummary {
    pub contains_epub_bubbles: Option<bool>,
    pub contains_image_bubbles: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessInfo {
    pub country: Option<String>,
    pub viewability: Option<String>,
    pub embeddable: Option<bool>,
    pub public_domain: Option<bool>,
    pub text_to_speech_permission: Option<String>,
    pub epub: Option<Availability>,
    pub pdf: Option<Availability>,
    pub web_reader_link: Option<String>,
    pub access_view_status: Option<String>,
    pub quote_sharing_allowed: Option<bool>,
}

/// Download availability of one format (`epub` or `pdf`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub is_available: Option<bool>,
    pub acs_token_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleInfo {
    pub country: Option<String>,
    pub saleability: Option<String>,
    pub is_ebook: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInfo {
    pub text_snippet: Option<String>,
}
