//! 調査スナップショットの型定義
//!
//! CLIと共通ライブラリで共有される型:
//! - SurveySnapshot: フォーム1回分の確定値（不変、修正は新しいスナップショットで行う）
//! - PermitState / SignKind / Surface / Illumination: 選択値で中身が決まるタグ付き共用体
//! - PhotoMeta: 写真のメタデータ（画像本体は保持しない）
//!
//! JSON上は従来のフォーム出力と同じ形（`permitStatus` + `permitDetails` など）を保ち、
//! 読み込み時にタグ付き共用体へ正規化する。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 現行スキーマのバージョンタグ
pub const SCHEMA_VERSION: &str = "2.0";

pub const SEASONS: &[&str] = &["Spring", "Summer", "Fall", "Winter"];
pub const PERMIT_STATUSES: &[&str] = &["Unknown", "No", "Yes"];
pub const SIGN_TYPES: &[&str] = &["Ground", "Wall", "Window", "Awning", "Other"];
pub const MOUNTINGS: &[&str] = &["Posts", "Monument base", "Brackets", "Flush", "Raceway"];
pub const SURFACES: &[&str] = &["Brick", "Block", "Stucco", "Siding", "Wood", "Metal", "Glass", "Other"];
pub const ILLUMINATION: &[&str] = &["Yes", "No"];
pub const POWER_VISIBLE: &[&str] = &["Yes", "No", "Unknown"];

/// 調査スナップショット
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySnapshot {
    pub schema_version: String,

    /// 収集時刻
    pub captured_at: DateTime<Utc>,

    /// 保存操作で付与
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,

    /// 出力操作で付与
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub site_name: String,

    #[serde(default)]
    pub surveyor_name: String,

    #[serde(default)]
    pub contact: Contact,

    #[serde(default)]
    pub address: Address,

    #[serde(default)]
    pub conditions: Conditions,

    #[serde(default)]
    pub zones: Zones,

    #[serde(flatten)]
    pub sign: SignDetails,

    #[serde(default)]
    pub width_in: Option<f64>,

    #[serde(default)]
    pub height_in: Option<f64>,

    #[serde(default)]
    pub electrical: Electrical,

    #[serde(default)]
    pub photos: Photos,

    #[serde(default)]
    pub notes: String,
}

impl SurveySnapshot {
    /// 空のスナップショット
    pub fn blank(captured_at: DateTime<Utc>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            captured_at,
            saved_at: None,
            exported_at: None,
            site_name: String::new(),
            surveyor_name: String::new(),
            contact: Contact::default(),
            address: Address::default(),
            conditions: Conditions::default(),
            zones: Zones::default(),
            sign: SignDetails::default(),
            width_in: None,
            height_in: None,
            electrical: Electrical::default(),
            photos: Photos::default(),
            notes: String::new(),
        }
    }

    /// 2スペースインデントのJSON
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub city: String,
    /// 大文字に正規化済み
    pub state: String,
    pub zip: String,
}

impl Address {
    pub fn is_complete(&self) -> bool {
        !self.street.is_empty() && !self.city.is_empty() && !self.state.is_empty() && !self.zip.is_empty()
    }
}

/// 計測ゾーン（自由記述）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zones {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
}

// ============================================
// 現地条件・許可
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PermitDetails {
    pub municipality: String,
    pub permit_number: String,
    pub permit_notes: String,
}

/// 許可状況。`Yes` のときだけ詳細を持つ
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PermitState {
    #[default]
    Unselected,
    Unknown,
    No,
    Yes(PermitDetails),
}

impl PermitState {
    /// 選択値から組み立てる。未知の値は未選択扱い
    pub fn from_selection(status: &str, details: impl FnOnce() -> PermitDetails) -> Self {
        match status {
            "Unknown" => PermitState::Unknown,
            "No" => PermitState::No,
            "Yes" => PermitState::Yes(details()),
            _ => PermitState::Unselected,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PermitState::Unselected => "",
            PermitState::Unknown => "Unknown",
            PermitState::No => "No",
            PermitState::Yes(_) => "Yes",
        }
    }

    pub fn details(&self) -> Option<&PermitDetails> {
        match self {
            PermitState::Yes(details) => Some(details),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConditionsWire", into = "ConditionsWire")]
pub struct Conditions {
    pub season: String,
    pub permit: PermitState,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConditionsWire {
    #[serde(default)]
    season: String,
    #[serde(default)]
    permit_status: String,
    #[serde(default)]
    permit_details: Option<PermitDetails>,
}

impl From<ConditionsWire> for Conditions {
    fn from(wire: ConditionsWire) -> Self {
        let details = wire.permit_details;
        Self {
            season: wire.season,
            permit: PermitState::from_selection(&wire.permit_status, || details.unwrap_or_default()),
        }
    }
}

impl From<Conditions> for ConditionsWire {
    fn from(conditions: Conditions) -> Self {
        let permit_status = conditions.permit.as_str().to_string();
        let permit_details = match conditions.permit {
            PermitState::Yes(details) => Some(details),
            _ => None,
        };
        Self {
            season: conditions.season,
            permit_status,
            permit_details,
        }
    }
}

// ============================================
// 看板種別・取付
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroundMeasurements {
    pub bottom_to_grade_in: Option<f64>,
    pub post_spacing_in: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WallMeasurements {
    pub mount_height_ft: Option<f64>,
}

/// 看板種別。地面設置・壁面設置はそれぞれ専用の計測値を持つ
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SignKind {
    #[default]
    Unselected,
    Ground(GroundMeasurements),
    Wall(WallMeasurements),
    Other { other_type: String },
    /// 追加計測のない一覧上の種別（Window など）
    Listed(String),
}

impl SignKind {
    pub fn as_str(&self) -> &str {
        match self {
            SignKind::Unselected => "",
            SignKind::Ground(_) => "Ground",
            SignKind::Wall(_) => "Wall",
            SignKind::Other { .. } => "Other",
            SignKind::Listed(name) => name,
        }
    }

    pub fn ground(&self) -> Option<&GroundMeasurements> {
        match self {
            SignKind::Ground(g) => Some(g),
            _ => None,
        }
    }

    pub fn wall(&self) -> Option<&WallMeasurements> {
        match self {
            SignKind::Wall(w) => Some(w),
            _ => None,
        }
    }

    pub fn other_type(&self) -> Option<&str> {
        match self {
            SignKind::Other { other_type } => Some(other_type),
            _ => None,
        }
    }
}

/// 取付面。`Other` のときは自由記述を持つ
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Surface {
    #[default]
    Unselected,
    Listed(String),
    Other(String),
}

impl Surface {
    pub fn from_selection(surface: &str, other: impl FnOnce() -> String) -> Self {
        match surface {
            "" => Surface::Unselected,
            "Other" => Surface::Other(other()),
            listed => Surface::Listed(listed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Surface::Unselected => "",
            Surface::Listed(name) => name,
            Surface::Other(_) => "Other",
        }
    }

    pub fn other_text(&self) -> Option<&str> {
        match self {
            Surface::Other(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SignWire", into = "SignWire")]
pub struct SignDetails {
    pub kind: SignKind,
    pub mounting: String,
    pub surface: Surface,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignWire {
    #[serde(default)]
    sign_type: String,
    #[serde(default)]
    other_type: Option<String>,
    #[serde(default)]
    ground_measurements: Option<GroundMeasurements>,
    #[serde(default)]
    wall_measurements: Option<WallMeasurements>,
    #[serde(default)]
    mounting: String,
    #[serde(default)]
    surface: String,
    #[serde(default)]
    surface_other: Option<String>,
}

impl From<SignWire> for SignDetails {
    fn from(wire: SignWire) -> Self {
        // 選択中の種別に対応するブロックだけを残す
        let kind = match wire.sign_type.as_str() {
            "" => SignKind::Unselected,
            "Ground" => SignKind::Ground(wire.ground_measurements.unwrap_or_default()),
            "Wall" => SignKind::Wall(wire.wall_measurements.unwrap_or_default()),
            "Other" => SignKind::Other {
                other_type: wire.other_type.unwrap_or_default(),
            },
            listed => SignKind::Listed(listed.to_string()),
        };
        let surface_other = wire.surface_other;
        Self {
            kind,
            mounting: wire.mounting,
            surface: Surface::from_selection(&wire.surface, || surface_other.unwrap_or_default()),
        }
    }
}

impl From<SignDetails> for SignWire {
    fn from(sign: SignDetails) -> Self {
        let sign_type = sign.kind.as_str().to_string();
        let surface = sign.surface.as_str().to_string();
        let surface_other = sign.surface.other_text().map(str::to_string);
        let (other_type, ground_measurements, wall_measurements) = match sign.kind {
            SignKind::Ground(g) => (None, Some(g), None),
            SignKind::Wall(w) => (None, None, Some(w)),
            SignKind::Other { other_type } => (Some(other_type), None, None),
            SignKind::Unselected | SignKind::Listed(_) => (None, None, None),
        };
        Self {
            sign_type,
            other_type,
            ground_measurements,
            wall_measurements,
            mounting: sign.mounting,
            surface,
            surface_other,
        }
    }
}

// ============================================
// 電気・照明
// ============================================

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Illumination {
    #[default]
    Unselected,
    No,
    Yes { power_visible: String },
}

impl Illumination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Illumination::Unselected => "",
            Illumination::No => "No",
            Illumination::Yes { .. } => "Yes",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ElectricalWire", into = "ElectricalWire")]
pub struct Electrical {
    pub illumination: Illumination,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ElectricalWire {
    #[serde(default)]
    illuminated: String,
    #[serde(default)]
    power_visible: Option<String>,
}

impl From<ElectricalWire> for Electrical {
    fn from(wire: ElectricalWire) -> Self {
        let illumination = match wire.illuminated.as_str() {
            "Yes" => Illumination::Yes {
                power_visible: wire.power_visible.unwrap_or_default(),
            },
            "No" => Illumination::No,
            _ => Illumination::Unselected,
        };
        Self { illumination }
    }
}

impl From<Electrical> for ElectricalWire {
    fn from(electrical: Electrical) -> Self {
        let illuminated = electrical.illumination.as_str().to_string();
        let power_visible = match electrical.illumination {
            Illumination::Yes { power_visible } => Some(power_visible),
            _ => None,
        };
        Self {
            illuminated,
            power_visible,
        }
    }
}

// ============================================
// 写真
// ============================================

/// 写真のメタデータ（画像本体は保存しない）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoMeta {
    pub filename: String,
    pub byte_size: u64,
    #[serde(default)]
    pub mime_type: String,
    /// 最終更新（UNIXエポックからのミリ秒）
    #[serde(default)]
    pub modified_at: i64,
}

/// 写真の枠
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSlot {
    Wide,
    Straight,
    Mount,
}

impl PhotoSlot {
    pub const ALL: [PhotoSlot; 3] = [PhotoSlot::Wide, PhotoSlot::Straight, PhotoSlot::Mount];

    pub fn label(&self) -> &'static str {
        match self {
            PhotoSlot::Wide => "Wide",
            PhotoSlot::Straight => "Straight-on",
            PhotoSlot::Mount => "Mount detail",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photos {
    pub wide: Option<PhotoMeta>,
    pub straight: Option<PhotoMeta>,
    pub mount: Option<PhotoMeta>,
}

impl Photos {
    pub fn get(&self, slot: PhotoSlot) -> Option<&PhotoMeta> {
        match slot {
            PhotoSlot::Wide => self.wide.as_ref(),
            PhotoSlot::Straight => self.straight.as_ref(),
            PhotoSlot::Mount => self.mount.as_ref(),
        }
    }

    pub fn all_present(&self) -> bool {
        PhotoSlot::ALL.iter().all(|&slot| self.get(slot).is_some())
    }
}
