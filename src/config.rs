use crate::error::{Result, SurveyCliError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "sign-survey";

/// 編集中フォームのファイル名
pub const FORM_FILE: &str = "form.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 保存済みレコードとフォームファイルの置き場所
    pub data_dir: Option<PathBuf>,
    /// JSON出力先（省略時はカレント）
    pub export_dir: Option<PathBuf>,
    /// 新規フォームの調査者名
    pub default_surveyor: Option<String>,
    /// メール下書きの宛先
    pub email_recipient: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SurveyCliError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join(APP_DIR).join("config.json"))
    }

    /// 保存先ディレクトリ（設定 → OSのデータディレクトリ の順）
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir()
            .ok_or_else(|| SurveyCliError::Config("data directory not found".into()))?;
        Ok(base.join(APP_DIR))
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// 編集中フォームの既定パス
    pub fn form_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(FORM_FILE))
    }
}
