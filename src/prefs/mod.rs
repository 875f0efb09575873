//! Small local key-value stores, one file per store.

mod file;
mod profile_image;
mod session;

pub use file::{KeyWatch, PreferenceFile};
pub use profile_image::ProfileImageStore;
pub use session::SessionStore;
