//! キーバリューストア抽象
//!
//! ブラウザの localStorage 相当（文字列キー → 文字列値、同期、トランザクションなし）。
//! コレクションは常に丸ごと読み込み・丸ごと書き戻す。

use crate::error::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;

/// 永続化先のキーバリューストア
///
/// 書き込み系は `&mut self`。複数ライター間の排他は行わない（後勝ち）。
pub trait KeyValueStore {
    /// 値を取得（キーが無ければ `None`）
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// 値を丸ごと置き換える
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// キーを削除（存在しなくてもエラーにしない）
    fn remove(&mut self, key: &str) -> Result<()>;

    /// 保存済みキー一覧
    fn keys(&self) -> Result<Vec<String>>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }
}

/// メモリ上のストア（テスト・一時利用）
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `set` が呼ばれた回数
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes += 1;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// コレクション全体を読み込む
///
/// キーが無い・空文字の場合は空のVec。
pub fn load_collection<T, S>(store: &S, key: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let items: Vec<T> = match store.get(key)? {
        Some(data) if !data.trim().is_empty() => serde_json::from_str(&data).map_err(|e| {
            tracing::warn!(key, error = %e, "persisted collection could not be parsed");
            e
        })?,
        _ => Vec::new(),
    };
    tracing::debug!(key, count = items.len(), "loaded collection");
    Ok(items)
}

/// コレクション全体を書き戻す
pub fn save_collection<T, S>(store: &mut S, key: &str, items: &[T]) -> Result<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let data = serde_json::to_string(items)?;
    store.set(key, &data)?;
    tracing::debug!(key, count = items.len(), "saved collection");
    Ok(())
}
