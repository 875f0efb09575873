use std::path::{Path, PathBuf};

use log::{debug, trace, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::error::Result;

type Values = Map<String, Value>;

/// One namespaced preference file, `<dir>/<namespace>.json`.
///
/// The whole map is kept in memory and published on a watch channel after
/// every write. Writes go through a temp file and a rename.
pub struct PreferenceFile {
    path: PathBuf,
    values: watch::Sender<Values>,
    write: Mutex<()>,
}

impl PreferenceFile {
    pub async fn open(dir: impl AsRef<Path>, namespace: &str) -> Result<PreferenceFile> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;

        let path = dir.join(format!("{}.json", namespace));
        let values = read(&path).await;
        debug!("opened {} with {} keys", path.display(), values.len());

        let (values, _) = watch::channel(values);

        Ok(PreferenceFile {
            path,
            values,
            write: Mutex::new(()),
        })
    }

    /// `None` when the key is unset or holds a value of another type.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        decode(&self.values.borrow(), key)
    }

    /// Last write wins. Writing the stored value again is a no-op.
    pub async fn set<T: Serialize>(&self, key: &str, value: T) -> Result<()> {
        trace!("PreferenceFile::set({}, {})", self.path.display(), key);
        let value = serde_json::to_value(value)?;

        self.update(|values| {
            if values.get(key) == Some(&value) {
                return false;
            }
            values.insert(key.to_string(), value);
            true
        })
        .await
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        self.update(|values| values.remove(key).is_some()).await
    }

    /// Reactive read of `key`, falling back to `default`.
    ///
    /// Spawns the observer, so it must be called from within a tokio runtime.
    pub fn watch<T>(&self, key: &str, default: T) -> KeyWatch<T>
    where
        T: DeserializeOwned + PartialEq + Clone + Send + Sync + 'static,
    {
        let mut source = self.values.subscribe();
        let initial = decode(&source.borrow_and_update(), key).unwrap_or_else(|| default.clone());
        let (tx, rx) = watch::channel(initial);

        let key = key.to_string();
        let task = tokio::spawn(async move {
            while source.changed().await.is_ok() {
                let value = {
                    let values = source.borrow_and_update();
                    decode(&values, &key).unwrap_or_else(|| default.clone())
                };

                tx.send_if_modified(|current| {
                    if *current == value {
                        return false;
                    }
                    *current = value;
                    true
                });
            }
        });

        KeyWatch { rx, task }
    }

    async fn update(&self, edit: impl FnOnce(&mut Values) -> bool) -> Result<()> {
        let _guard = self.write.lock().await;

        let mut values = self.values.borrow().clone();
        if !edit(&mut values) {
            return Ok(());
        }

        let data = serde_json::to_vec_pretty(&values)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, data).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        self.values.send_replace(values);
        debug!("wrote {}", self.path.display());

        Ok(())
    }
}

/// The current value of one preference key, followed by its changes.
///
/// Observation stops when the `KeyWatch` is dropped.
pub struct KeyWatch<T> {
    rx: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T: Clone> KeyWatch<T> {
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Waits for the next distinct value. `None` once the file is gone.
    pub async fn changed(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

impl<T> Drop for KeyWatch<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn decode<T: DeserializeOwned>(values: &Values, key: &str) -> Option<T> {
    let value = values.get(key)?;

    match serde_json::from_value(value.clone()) {
        Ok(v) => Some(v),
        Err(err) => {
            warn!("preference {} has unexpected shape: {}", key, err);
            None
        }
    }
}

// Missing or unreadable files read as empty.
async fn read(path: &Path) -> Values {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Values::new(),
        Err(err) => {
            warn!("can't read {}: {}", path.display(), err);
            return Values::new();
        }
    };

    if text.trim().is_empty() {
        return Values::new();
    }

    match serde_json::from_str::<Values>(&text) {
        Ok(values) => values,
        Err(err) => {
            warn!("ignoring corrupt {}: {}", path.display(), err);
            Values::new()
        }
    }
}
