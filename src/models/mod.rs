mod book;
mod envelope;
mod raw;
mod user;

pub use book::{Book, ImageLinks, IndustryIdentifier};
pub use envelope::ResultEnvelope;
pub use raw::{
    AccessInfo, Availability, PanelizationSummary, RawCatalogResource, RawImageLinks,
    RawIndustryIdentifier, RawItem, ReadingModes, SaleInfo, SearchInfo, VolumeInfo,
};
pub use user::{Review, Shelf, UserDocument, READING_NOW_SHELF};
