//! 写真ファイルの選択
//!
//! 画像本体は読まず、ファイル名・サイズ・種類・更新時刻だけを取る。

use crate::error::{Result, SurveyCliError};
use sign_survey_common::SelectedFile;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use walkdir::WalkDir;

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("heic", "image/heic"),
    ("webp", "image/webp"),
];

/// 拡張子からMIMEタイプを判定
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// UNIXエポックからのミリ秒（範囲外は0）
fn epoch_millis(time: SystemTime) -> i64 {
    time.duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_millis()).ok())
        .unwrap_or_default()
}

/// パスから選択ファイル情報を作る
pub fn select_photo(path: &Path) -> Result<SelectedFile> {
    if !path.is_file() {
        return Err(SurveyCliError::FileNotFound(path.display().to_string()));
    }
    let mime_type = mime_type_for(path)
        .ok_or_else(|| SurveyCliError::NotAPhoto(path.display().to_string()))?;

    let meta = std::fs::metadata(path)?;
    let last_modified = meta.modified().map(epoch_millis).unwrap_or_default();

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(SelectedFile {
        name,
        size: meta.len(),
        mime_type: mime_type.to_string(),
        last_modified,
        path: Some(path.to_path_buf()),
    })
}

/// フォルダ直下の写真を列挙（ファイル名順）
pub fn list_photos(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(SurveyCliError::FileNotFound(folder.display().to_string()));
    }

    let mut photos: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && mime_type_for(p).is_some())
        .collect();

    photos.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(photos)
}
