use std::path::Path;

use crate::error::Result;

use super::{KeyWatch, PreferenceFile};

pub const NAMESPACE: &str = "profileImage";
pub const USER_IMAGE: &str = "user_image";

/// Path or URI of the user's chosen profile image. Empty when none was picked.
pub struct ProfileImageStore {
    file: PreferenceFile,
}

impl ProfileImageStore {
    pub async fn open(dir: impl AsRef<Path>) -> Result<ProfileImageStore> {
        Ok(ProfileImageStore {
            file: PreferenceFile::open(dir, NAMESPACE).await?,
        })
    }

    pub fn image_path(&self) -> KeyWatch<String> {
        self.file.watch(USER_IMAGE, String::new())
    }

    pub async fn save_image_path(&self, uri: &str) -> Result<()> {
        self.file.set(USER_IMAGE, uri).await
    }
}
