//! 旧形式レコードの移行
//!
//! 保存済みJSONのバージョンタグを見て現行の `SurveySnapshot` へ変換する。
//! - `schemaVersion: "2.0"`: そのまま読み込む
//! - `version: "V1.4"`: 旧フォームの形（`timestamp`, `measurements` など）から組み替える

use crate::error::{Error, Result};
use crate::types::{
    Address, Conditions, Contact, PhotoMeta, Photos, SurveySnapshot, Zones, SCHEMA_VERSION,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// 旧フォームのバージョンタグ
pub const LEGACY_VERSION: &str = "V1.4";

/// 保存済みJSONを現行スナップショットへ変換
pub fn migrate(value: Value) -> Result<SurveySnapshot> {
    if let Some(version) = value.get("schemaVersion").and_then(Value::as_str) {
        if version == SCHEMA_VERSION {
            return Ok(serde_json::from_value(value)?);
        }
        return Err(Error::UnsupportedSchema(version.to_string()));
    }

    match value.get("version").and_then(Value::as_str) {
        Some(LEGACY_VERSION) => {
            let legacy: LegacyV14 = serde_json::from_value(value)?;
            Ok(legacy.into_snapshot())
        }
        Some(other) => Err(Error::UnsupportedSchema(other.to_string())),
        None => Err(Error::UnsupportedSchema("バージョンタグがありません".into())),
    }
}

/// JSON文字列から読み込んで移行
pub fn migrate_str(json: &str) -> Result<SurveySnapshot> {
    let value: Value = serde_json::from_str(json)?;
    migrate(value)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyV14 {
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    site_name: String,
    #[serde(default)]
    contact: Contact,
    #[serde(default)]
    surveyor: String,
    #[serde(default)]
    address: Address,
    // 旧形式も permitStatus + permitDetails なので現行の読み込みで足りる
    #[serde(default)]
    conditions: Conditions,
    #[serde(default)]
    zones: Zones,
    #[serde(default)]
    measurements: LegacyMeasurements,
    #[serde(default)]
    photos: LegacyPhotos,
    #[serde(default)]
    notes: String,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct LegacyMeasurements {
    width_in: Option<f64>,
    height_in: Option<f64>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LegacyPhotos {
    wide: Option<LegacyPhoto>,
    straight: Option<LegacyPhoto>,
    mount: Option<LegacyPhoto>,
}

/// ブラウザの File から取った {name, size, type, lastModified}
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyPhoto {
    #[serde(default)]
    name: String,
    #[serde(default)]
    size: u64,
    #[serde(default, rename = "type")]
    mime_type: String,
    #[serde(default)]
    last_modified: i64,
}

impl From<LegacyPhoto> for PhotoMeta {
    fn from(photo: LegacyPhoto) -> Self {
        PhotoMeta {
            filename: photo.name,
            byte_size: photo.size,
            mime_type: photo.mime_type,
            modified_at: photo.last_modified,
        }
    }
}

impl LegacyV14 {
    fn into_snapshot(self) -> SurveySnapshot {
        let captured_at = self.timestamp.unwrap_or_else(Utc::now);
        let mut snapshot = SurveySnapshot::blank(captured_at);

        // 旧形式は保存時にしか書かれないので収集時刻＝保存時刻
        snapshot.saved_at = Some(captured_at);
        snapshot.site_name = self.site_name;
        snapshot.surveyor_name = self.surveyor;
        snapshot.contact = self.contact;
        snapshot.address = Address {
            state: self.address.state.to_uppercase(),
            ..self.address
        };
        snapshot.conditions = self.conditions;
        snapshot.zones = self.zones;
        snapshot.width_in = self.measurements.width_in.filter(|v| v.is_finite());
        snapshot.height_in = self.measurements.height_in.filter(|v| v.is_finite());
        snapshot.photos = Photos {
            wide: self.photos.wide.map(PhotoMeta::from),
            straight: self.photos.straight.map(PhotoMeta::from),
            mount: self.photos.mount.map(PhotoMeta::from),
        };
        snapshot.notes = self.notes;
        snapshot
    }
}
