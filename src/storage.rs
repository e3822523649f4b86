//! ファイル保存のキーバリューストア
//!
//! キーごとに `<data_dir>/<key>.json` を1ファイル持つ。
//! 書き込みは一時ファイル経由でリネームするため、失敗時は元の内容が残る。

use design_feedback_common::design::DESIGNS_KEY;
use design_feedback_common::feedback::FEEDBACK_KEY;
use design_feedback_common::store::KeyValueStore;
use design_feedback_common::{DesignStore, Error, FeedbackStore, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const FILE_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// ディレクトリは最初の書き込み時に作成する
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// キーに対応するファイルパス
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, FILE_EXTENSION)))
    }
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::Storage(format!("Invalid storage key: {:?}", key)))
    }
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> Error {
    let msg = match e.kind() {
        ErrorKind::PermissionDenied => format!("Permission denied: cannot {} {:?}", action, path),
        ErrorKind::NotFound => format!("Cannot {} {:?}: parent path does not exist", action, path),
        _ => format!("Failed to {} {:?}: {}", action, path, e),
    };
    Error::Storage(msg)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read", &path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| io_error("create directory", &self.dir, e))?;

        let tmp_path = path.with_extension(format!("{}.tmp", FILE_EXTENSION));
        fs::write(&tmp_path, value).map_err(|e| io_error("write", &tmp_path, e))?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            fs::remove_file(&tmp_path).ok();
            return Err(io_error("replace", &path, e));
        }

        tracing::debug!(path = %path.display(), bytes = value.len(), "store written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("delete", &path, e)),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("list", &self.dir, e)),
        };

        let mut keys: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .filter(|p| p.extension().is_some_and(|ext| ext == FILE_EXTENSION))
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().to_string()))
            .filter(|k| validate_key(k).is_ok())
            .collect();
        keys.sort();

        Ok(keys)
    }
}

/// デザインのストアを開く
pub fn design_store(dir: &Path) -> DesignStore<FileStore> {
    DesignStore::new(FileStore::new(dir))
}

/// 単独フィードバックのストアを開く
pub fn feedback_store(dir: &Path) -> FeedbackStore<FileStore> {
    FeedbackStore::new(FileStore::new(dir))
}

/// 保存データの概要
#[derive(Debug, Clone, PartialEq)]
pub struct StorageInfo {
    pub dir: PathBuf,
    pub keys: Vec<String>,
    pub designs: usize,
    pub design_feedback: usize,
    pub standalone_feedback: usize,
    pub bytes: u64,
}

/// 保存データの件数とサイズを集計
pub fn storage_info(dir: &Path) -> Result<StorageInfo> {
    let designs = design_store(dir).get_all()?;
    let standalone = feedback_store(dir).get_all()?;
    let store = FileStore::new(dir);
    let keys = store.keys()?;

    let mut bytes = 0;
    for key in &keys {
        if let Ok(meta) = fs::metadata(store.path_for(key)?) {
            bytes += meta.len();
        }
    }

    Ok(StorageInfo {
        dir: dir.to_path_buf(),
        keys,
        design_feedback: designs.iter().map(|d| d.feedback.len()).sum(),
        designs: designs.len(),
        standalone_feedback: standalone.len(),
        bytes,
    })
}

/// 両コレクションを削除（何か削除したら `true`）
pub fn clear_storage(dir: &Path) -> Result<bool> {
    let mut store = FileStore::new(dir);
    let existing = store.keys()?;
    let mut removed = false;

    for key in [DESIGNS_KEY, FEEDBACK_KEY] {
        if existing.iter().any(|k| k == key) {
            store.remove(key)?;
            removed = true;
        }
    }

    tracing::info!(dir = %dir.display(), removed, "storage cleared");
    Ok(removed)
}
