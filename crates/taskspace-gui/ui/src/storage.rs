use taskspace_shared::{
  KeyValueStorage,
  StorageError
};
use wasm_bindgen::JsValue;

/// `window.localStorage`, looked up on
/// every call so a storage that goes
/// away mid-session only fails that call.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn local_storage()
-> Result<web_sys::Storage, StorageError> {
  web_sys::window()
    .and_then(|window| {
      window
        .local_storage()
        .ok()
        .flatten()
    })
    .ok_or_else(|| {
      StorageError::Unavailable(
        "localStorage is not available"
          .to_string()
      )
    })
}

fn js_error(value: JsValue) -> String {
  value
    .as_string()
    .unwrap_or_else(|| format!("{value:?}"))
}

impl KeyValueStorage for BrowserStorage {
  fn get_item(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    local_storage()?
      .get_item(key)
      .map_err(|err| {
        StorageError::Unavailable(
          js_error(err)
        )
      })
  }

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    local_storage()?
      .set_item(key, value)
      .map_err(|err| {
        StorageError::Write(js_error(err))
      })
  }

  fn remove_item(
    &self,
    key: &str
  ) -> Result<(), StorageError> {
    local_storage()?
      .remove_item(key)
      .map_err(|err| {
        StorageError::Write(js_error(err))
      })
  }
}
