use std::cell::RefCell;
use std::collections::BTreeMap;

use indexmap::IndexMap;
use tracing::{
  debug,
  error,
  warn
};

use crate::error::StorageError;
use crate::model::Workspace;
use crate::store::WorkspaceStore;

/// Key holding the whole workspace
/// collection.
pub const WORKSPACES_STORAGE_KEY: &str =
  "workspaces";

/// A string-keyed store of string
/// values, shaped after the browser's
/// `localStorage`.
pub trait KeyValueStorage {
  fn get_item(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>;

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError>;

  fn remove_item(
    &self,
    key: &str
  ) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
  items: RefCell<BTreeMap<String, String>>
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

impl KeyValueStorage for MemoryStorage {
  fn get_item(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    Ok(self.items.borrow().get(key).cloned())
  }

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    self
      .items
      .borrow_mut()
      .insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove_item(
    &self,
    key: &str
  ) -> Result<(), StorageError> {
    self.items.borrow_mut().remove(key);
    Ok(())
  }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage
  for &S
{
  fn get_item(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    (**self).get_item(key)
  }

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    (**self).set_item(key, value)
  }

  fn remove_item(
    &self,
    key: &str
  ) -> Result<(), StorageError> {
    (**self).remove_item(key)
  }
}

pub fn encode(
  store: &WorkspaceStore
) -> Result<String, StorageError> {
  Ok(serde_json::to_string(
    store.workspaces_map()
  )?)
}

/// Decodes a persisted blob. Selection is
/// not part of the blob.
pub fn decode(
  raw: &str
) -> Result<WorkspaceStore, serde_json::Error>
{
  let workspaces: IndexMap<
    String,
    Workspace
  > = serde_json::from_str(raw)?;
  Ok(WorkspaceStore::from_workspaces(
    workspaces
  ))
}

/// Writes the whole store. Failures are
/// logged and swallowed.
#[tracing::instrument(skip_all)]
pub fn save<S: KeyValueStorage + ?Sized>(
  storage: &S,
  store: &WorkspaceStore
) {
  let result = encode(store).and_then(
    |json| {
      storage.set_item(
        WORKSPACES_STORAGE_KEY,
        &json
      )
    }
  );

  match result {
    | Ok(()) => {
      debug!(
        workspaces = store.len(),
        "persisted workspaces"
      );
    }
    | Err(err) => {
      warn!(
        error = %err,
        "failed persisting workspaces; \
         continuing in memory"
      );
    }
  }
}

/// Reads the store back. Absent,
/// unreadable or malformed data yields
/// an empty store.
#[tracing::instrument(skip_all)]
pub fn load<S: KeyValueStorage + ?Sized>(
  storage: &S
) -> WorkspaceStore {
  let raw = match storage
    .get_item(WORKSPACES_STORAGE_KEY)
  {
    | Ok(Some(raw)) => raw,
    | Ok(None) => {
      debug!(
        "no persisted workspaces"
      );
      return WorkspaceStore::new();
    }
    | Err(err) => {
      warn!(
        error = %err,
        "storage unavailable; starting \
         empty"
      );
      return WorkspaceStore::new();
    }
  };

  match decode(&raw) {
    | Ok(store) => {
      debug!(
        workspaces = store.len(),
        "loaded workspaces"
      );
      store
    }
    | Err(err) => {
      error!(
        error = %err,
        "failed parsing workspaces from \
         storage"
      );
      WorkspaceStore::new()
    }
  }
}
