//! ファイルを使った保存先・出力先
//!
//! - FileStore: キーごとに `<key>.json` を1つ置く KeyValueStore
//! - DirectorySink: 出力JSONをディレクトリに書く FileSink
//! - フォームファイル（編集中の入力値）の読み書き

use crate::error::{Result, SurveyCliError};
use sign_survey_common::{Error as CommonError, FileSink, KeyValueStore, SurveyForm};
use std::fs;
use std::path::{Path, PathBuf};

/// ディレクトリ上のキー・値ストア
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// キーに対応するファイルパス
    pub fn item_path(&self, key: &str) -> sign_survey_common::Result<PathBuf> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(CommonError::Storage(format!("invalid key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> sign_survey_common::Result<Option<String>> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set_item(&mut self, key: &str, value: &str) -> sign_survey_common::Result<()> {
        let path = self.item_path(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, value)?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> sign_survey_common::Result<bool> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }
}

/// 出力先ディレクトリ
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSink for DirectorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> sign_survey_common::Result<String> {
        if filename.contains(['/', '\\']) {
            return Err(CommonError::Export(format!("invalid file name: {}", filename)));
        }
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        // 同名ファイルは上書き（後勝ち）
        fs::write(&path, bytes)?;
        Ok(path.display().to_string())
    }
}

/// フォームファイルを読む。なければ空のフォーム
pub fn load_form(path: &Path) -> Result<SurveyForm> {
    if !path.exists() {
        return Ok(SurveyForm::default());
    }
    let content = fs::read_to_string(path)?;
    let form: SurveyForm = serde_json::from_str(&content)?;
    Ok(form)
}

pub fn save_form(path: &Path, form: &SurveyForm) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(form)?;
    fs::write(path, content)?;
    Ok(())
}

/// 写真以外のフォーム項目名（JSONキー）
pub fn form_field_names() -> Vec<String> {
    match serde_json::to_value(SurveyForm::default()) {
        Ok(serde_json::Value::Object(map)) => map
            .into_iter()
            .filter(|(_, v)| v.is_string())
            .map(|(k, _)| k)
            .collect(),
        _ => Vec::new(),
    }
}

/// 項目名を指定して値を書き換えたフォームを返す
pub fn set_field(form: &SurveyForm, field: &str, value: &str) -> Result<SurveyForm> {
    let mut json = serde_json::to_value(form)?;
    let slot = json
        .get_mut(field)
        .filter(|v| v.is_string())
        .ok_or_else(|| SurveyCliError::UnknownField(field.to_string()))?;
    *slot = serde_json::Value::String(value.to_string());
    Ok(serde_json::from_value(json)?)
}
