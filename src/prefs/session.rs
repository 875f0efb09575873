use std::path::Path;

use crate::error::Result;

use super::{KeyWatch, PreferenceFile};

pub const NAMESPACE: &str = "session";
pub const IS_FIRST_TIME_LAUNCH: &str = "is_first_time_launch";

pub struct SessionStore {
    file: PreferenceFile,
}

impl SessionStore {
    pub async fn open(dir: impl AsRef<Path>) -> Result<SessionStore> {
        Ok(SessionStore {
            file: PreferenceFile::open(dir, NAMESPACE).await?,
        })
    }

    /// `true` until the app records a launch.
    pub fn is_first_time(&self) -> KeyWatch<bool> {
        self.file.watch(IS_FIRST_TIME_LAUNCH, true)
    }

    pub async fn set_first_time_launch(&self, is_first: bool) -> Result<()> {
        self.file.set(IS_FIRST_TIME_LAUNCH, is_first).await
    }

    pub async fn mark_launched(&self) -> Result<()> {
        self.set_first_time_launch(false).await
    }
}

#[cfg(test)]
mod tests {
    use super::SessionStore;
    use crate::prefs::ProfileImageStore;

    #[tokio::test]
    async fn first_launch_by_default() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = SessionStore::open(dir.path()).await?;

        assert_eq!(true, store.is_first_time().get());

        Ok(())
    }

    #[tokio::test]
    async fn mark_launched_is_idempotent() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = SessionStore::open(dir.path()).await?;
        let mut first = store.is_first_time();

        store.mark_launched().await?;
        store.mark_launched().await?;

        assert_eq!(Some(false), first.changed().await);
        assert_eq!(false, SessionStore::open(dir.path()).await?.is_first_time().get());

        Ok(())
    }

    #[tokio::test]
    async fn independent_of_profile_image() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let session = SessionStore::open(dir.path()).await?;
        let image = ProfileImageStore::open(dir.path()).await?;

        image.save_image_path("file:///avatar.png").await?;

        assert_eq!(true, session.is_first_time().get());

        session.mark_launched().await?;
        assert_eq!("file:///avatar.png", image.image_path().get());

        Ok(())
    }
}
