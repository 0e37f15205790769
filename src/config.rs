use crate::error::{LookupError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// データセットパスを上書きする環境変数
pub const DATASET_ENV: &str = "RESULTS_LOOKUP_DATASET";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset_path: Option<PathBuf>,
    /// 擬似購読確認の待ち時間
    pub verify_delay_ms: u64,
    pub verify_timeout_secs: u64,
    pub celebration_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: None,
            verify_delay_ms: results_lookup_common::VERIFY_DELAY.as_millis() as u64,
            verify_timeout_secs: 10,
            celebration_secs: results_lookup_common::CELEBRATION_WINDOW.as_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LookupError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("results-lookup").join("config.json"))
    }

    /// データセットのパスを決定
    ///
    /// 優先順: 引数 → 環境変数 → 設定ファイル。いずれもなければNone（組み込みデータを使用）
    pub fn resolve_dataset_path(&self, cli_path: Option<PathBuf>) -> Option<PathBuf> {
        cli_path
            .or_else(|| std::env::var_os(DATASET_ENV).map(PathBuf::from))
            .or_else(|| self.dataset_path.clone())
    }

    pub fn set_dataset_path(&mut self, path: PathBuf) -> Result<()> {
        if !path.exists() {
            return Err(LookupError::DatasetNotFound(path.display().to_string()));
        }
        self.dataset_path = Some(path);
        self.save()
    }

    pub fn verify_delay(&self) -> Duration {
        Duration::from_millis(self.verify_delay_ms)
    }

    pub fn verify_timeout(&self) -> Duration {
        Duration::from_secs(self.verify_timeout_secs)
    }

    pub fn celebration_window(&self) -> Duration {
        Duration::from_secs(self.celebration_secs)
    }
}
