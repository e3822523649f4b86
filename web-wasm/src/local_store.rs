//! localStorage のキーバリューストア

use design_feedback_common::store::KeyValueStore;
use design_feedback_common::{Error, Result};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// `window.localStorage` をそのまま使うストア
pub struct LocalStorageStore {
    storage: Storage,
}

fn js_error(action: &str, e: JsValue) -> Error {
    let detail = e
        .as_string()
        .or_else(|| js_sys::JSON::stringify(&e).ok().and_then(|s| s.as_string()))
        .unwrap_or_else(|| format!("{:?}", e));
    Error::Storage(format!("localStorage {} failed: {}", action, detail))
}

impl LocalStorageStore {
    pub fn new() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| Error::Storage("window is not available".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| js_error("access", e))?
            .ok_or_else(|| Error::Storage("localStorage is not available".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(|e| js_error("read", e))
    }

    // 容量超過（QuotaExceededError）はここでエラーになる
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(|e| js_error("write", e))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(|e| js_error("delete", e))
    }

    fn keys(&self) -> Result<Vec<String>> {
        let len = self.storage.length().map_err(|e| js_error("list", e))?;
        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Some(key) = self.storage.key(i).map_err(|e| js_error("list", e))? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
