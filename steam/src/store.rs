//! Flat JSON persistence: the item name id cache and the last run's snapshot.
use crate::item::{EnrichedItem, ItemNameId};
use crate::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

const ID_CACHE_DIR: &str = "items";
const SNAPSHOT_DIR: &str = "data";

/// Market hash name to item name id. Entries are never invalidated.
pub type IdCache = BTreeMap<String, ItemNameId>;

#[derive(Clone, Debug)]
pub struct SnapshotStore {
    id_cache_path: PathBuf,
    snapshot_path: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: impl AsRef<Path>, app_id: u32) -> Self {
        let data_dir = data_dir.as_ref();
        let file_name = format!("{app_id}.json");

        Self {
            id_cache_path: data_dir.join(ID_CACHE_DIR).join(&file_name),
            snapshot_path: data_dir.join(SNAPSHOT_DIR).join(file_name),
        }
    }

    pub fn id_cache_path(&self) -> &Path {
        &self.id_cache_path
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub async fn load_id_cache(&self) -> IdCache {
        load_or_default(&self.id_cache_path).await
    }

    pub async fn save_id_cache(&self, cache: &IdCache) -> Result<()> {
        save(&self.id_cache_path, cache).await
    }

    pub async fn load_snapshot(&self) -> Vec<EnrichedItem> {
        load_or_default(&self.snapshot_path).await
    }

    pub async fn save_snapshot(&self, items: &[EnrichedItem]) -> Result<()> {
        save(&self.snapshot_path, items).await
    }
}

/// A missing or unreadable document is a cold start, not an error.
async fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let text = match fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("{} does not exist yet, starting empty", path.display());
            return T::default();
        }
        Err(e) => {
            log::warn!("Failed to read {}: {e}. Starting empty", path.display());
            return T::default();
        }
    };

    serde_json::from_str(&text).unwrap_or_else(|e| {
        log::warn!("{} is corrupt: {e}. Starting empty", path.display());
        T::default()
    })
}

/// Writes next to the target and renames over it, so readers never see a half written file.
async fn save<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).await?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_string_pretty(value)?).await?;
    fs::rename(&tmp, path).await?;

    log::debug!("Saved {}", path.display());
    Ok(())
}
