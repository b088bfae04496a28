use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use taskspace_shared::{KeyValueStorage, StorageError};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

const STORAGE_FILE_NAME: &str = "storage.json";

/// File-backed key-value storage: one JSON object of string values,
/// rewritten atomically on every write.
#[derive(Debug)]
pub struct FileStorage {
    pub data_dir: PathBuf,
    pub storage_path: PathBuf,
}

impl FileStorage {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let storage_path = data_dir.join(STORAGE_FILE_NAME);
        if !storage_path.exists() {
            fs::write(&storage_path, "{}")
                .with_context(|| format!("failed to create {}", storage_path.display()))?;
        }

        info!(
            data_dir = %data_dir.display(),
            storage = %storage_path.display(),
            "opened datastore"
        );

        Ok(Self {
            data_dir,
            storage_path,
        })
    }

    fn read_raw(&self) -> anyhow::Result<String> {
        debug!(file = %self.storage_path.display(), "reading storage file");
        match fs::read_to_string(&self.storage_path) {
            Ok(raw) => Ok(raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(err) => {
                Err(err).with_context(|| format!("failed reading {}", self.storage_path.display()))
            }
        }
    }

    fn parse_items(&self, raw: &str) -> anyhow::Result<BTreeMap<String, String>> {
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(raw)
            .with_context(|| format!("failed parsing {}", self.storage_path.display()))
    }

    #[tracing::instrument(skip(self))]
    fn load_items(&self) -> anyhow::Result<BTreeMap<String, String>> {
        let raw = self.read_raw()?;
        self.parse_items(&raw)
    }

    #[tracing::instrument(skip(self, items))]
    fn save_items_atomic(&self, items: &BTreeMap<String, String>) -> anyhow::Result<()> {
        debug!(
            file = %self.storage_path.display(),
            count = items.len(),
            "saving storage items atomically"
        );

        let dir = self.storage_path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut temp, items)?;
        writeln!(temp)?;
        temp.flush()?;

        temp.persist(&self.storage_path).map_err(|err| {
            anyhow!(
                "failed to persist {}: {}",
                self.storage_path.display(),
                err
            )
        })?;

        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self
            .load_items()
            .map_err(|err| StorageError::Unavailable(format!("{err:#}")))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let raw = self
            .read_raw()
            .map_err(|err| StorageError::Unavailable(format!("{err:#}")))?;
        // Only a file that reads but does not parse is replaced.
        let mut items = match self.parse_items(&raw) {
            Ok(items) => items,
            Err(err) => {
                warn!(
                    file = %self.storage_path.display(),
                    error = %format!("{err:#}"),
                    "replacing unparseable storage file"
                );
                BTreeMap::new()
            }
        };
        items.insert(key.to_string(), value.to_string());
        self.save_items_atomic(&items)
            .map_err(|err| StorageError::Write(format!("{err:#}")))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self
            .load_items()
            .map_err(|err| StorageError::Unavailable(format!("{err:#}")))?;
        if items.remove(key).is_some() {
            self.save_items_atomic(&items)
                .map_err(|err| StorageError::Write(format!("{err:#}")))?;
        }
        Ok(())
    }
}
