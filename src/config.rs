use crate::error::{AppError, Result};
use design_feedback_common::SortOrder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// データ保存先を上書きする環境変数
pub const DATA_DIR_ENV: &str = "DESIGN_FEEDBACK_DATA_DIR";

const APP_DIR_NAME: &str = "design-feedback";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// データ保存先（未設定ならOS標準のデータディレクトリ）
    pub data_dir: Option<PathBuf>,
    /// 一覧・詳細の既定の並び順
    pub default_sort: SortOrder,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// 指定パスから読み込み（無ければ既定値）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %path.display(), "config loaded");
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join(APP_DIR_NAME).join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            data_dir: None,
            default_sort: SortOrder::Newest,
        }
    }

    /// 実際に使うデータ保存先
    ///
    /// 環境変数 → 設定ファイル → OS標準の順。
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        dirs::data_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .ok_or_else(|| AppError::Config("データディレクトリが見つかりません".into()))
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.data_dir = Some(dir);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_returns_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.data_dir.is_none());
        assert_eq!(config.default_sort, SortOrder::Newest);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/designs")),
            default_sort: SortOrder::Highest,
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.data_dir, Some(PathBuf::from("/tmp/designs")));
        assert_eq!(loaded.default_sort, SortOrder::Highest);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"default_sort":"oldest"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.data_dir.is_none());
        assert_eq!(config.default_sort, SortOrder::Oldest);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ invalid }").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(AppError::JsonParse(_))));
    }
}
