//! フォーム状態とスナップショット生成
//!
//! 画面部品との対応付けは表示層の仕事。ここでは入力欄の生の値を
//! 1つの構造体で持ち、そこから不変の `SurveySnapshot` を作る。

use crate::types::{
    Address, Conditions, Contact, Electrical, GroundMeasurements, Illumination, PermitDetails,
    PermitState, PhotoMeta, PhotoSlot, Photos, SignDetails, SignKind, Surface, SurveySnapshot,
    WallMeasurements, Zones, SCHEMA_VERSION,
};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ファイル選択欄で選ばれたファイル
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    #[serde(default)]
    pub mime_type: String,
    /// 最終更新（ミリ秒）
    #[serde(default)]
    pub last_modified: i64,
    /// ローカルパス（表示用、スナップショットには含めない）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl SelectedFile {
    fn to_meta(&self) -> PhotoMeta {
        PhotoMeta {
            filename: self.name.clone(),
            byte_size: self.size,
            mime_type: self.mime_type.clone(),
            modified_at: self.last_modified,
        }
    }
}

/// 入力欄の現在値
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurveyForm {
    pub site_name: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub surveyor: String,

    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,

    pub season: String,
    pub permit_status: String,
    pub municipality: String,
    pub permit_number: String,
    pub permit_notes: String,

    pub zone_a: String,
    pub zone_b: String,
    pub zone_c: String,

    pub sign_type: String,
    pub other_type: String,
    pub bottom_to_grade_in: String,
    pub post_spacing_in: String,
    pub mount_height_ft: String,

    pub mounting: String,
    pub surface: String,
    pub surface_other: String,

    pub illuminated: String,
    pub power_visible: String,

    pub width_in: String,
    pub height_in: String,

    pub photo_wide: Option<SelectedFile>,
    pub photo_straight: Option<SelectedFile>,
    pub photo_mount: Option<SelectedFile>,

    pub notes: String,
}

impl SurveyForm {
    /// 現在時刻でスナップショットを作る
    pub fn snapshot(&self) -> SurveySnapshot {
        build(self, Utc::now())
    }

    /// 写真欄への参照
    pub fn photo_mut(&mut self, slot: PhotoSlot) -> &mut Option<SelectedFile> {
        match slot {
            PhotoSlot::Wide => &mut self.photo_wide,
            PhotoSlot::Straight => &mut self.photo_straight,
            PhotoSlot::Mount => &mut self.photo_mount,
        }
    }

    /// 保存済みスナップショットからフォームを復元
    ///
    /// 写真欄は復元できない（ファイル選択はセッション限り）ので空になる。
    pub fn from_snapshot(snapshot: &SurveySnapshot) -> Self {
        let permit = snapshot.conditions.permit.details().cloned().unwrap_or_default();
        let ground = snapshot.sign.kind.ground().cloned().unwrap_or_default();
        let wall = snapshot.sign.kind.wall().cloned().unwrap_or_default();
        let power_visible = match &snapshot.electrical.illumination {
            Illumination::Yes { power_visible } => power_visible.clone(),
            _ => String::new(),
        };

        Self {
            site_name: snapshot.site_name.clone(),
            contact_name: snapshot.contact.name.clone(),
            contact_phone: snapshot.contact.phone.clone(),
            surveyor: snapshot.surveyor_name.clone(),

            street: snapshot.address.street.clone(),
            city: snapshot.address.city.clone(),
            state: snapshot.address.state.clone(),
            zip: snapshot.address.zip.clone(),

            season: snapshot.conditions.season.clone(),
            permit_status: snapshot.conditions.permit.as_str().to_string(),
            municipality: permit.municipality,
            permit_number: permit.permit_number,
            permit_notes: permit.permit_notes,

            zone_a: snapshot.zones.a.clone(),
            zone_b: snapshot.zones.b.clone(),
            zone_c: snapshot.zones.c.clone(),

            sign_type: snapshot.sign.kind.as_str().to_string(),
            other_type: snapshot.sign.kind.other_type().unwrap_or_default().to_string(),
            bottom_to_grade_in: format_optional(ground.bottom_to_grade_in),
            post_spacing_in: format_optional(ground.post_spacing_in),
            mount_height_ft: format_optional(wall.mount_height_ft),

            mounting: snapshot.sign.mounting.clone(),
            surface: snapshot.sign.surface.as_str().to_string(),
            surface_other: snapshot.sign.surface.other_text().unwrap_or_default().to_string(),

            illuminated: snapshot.electrical.illumination.as_str().to_string(),
            power_visible,

            width_in: format_optional(snapshot.width_in),
            height_in: format_optional(snapshot.height_in),

            photo_wide: None,
            photo_straight: None,
            photo_mount: None,

            notes: snapshot.notes.clone(),
        }
    }
}

/// フォームの値をスナップショットへ写像する
///
/// - 文字列は前後の空白を除去（空欄は空文字列のまま）
/// - 数値は空欄・数値以外・非有限値を `None` にする
/// - 条件付きブロックは支配する選択値が一致するときだけ作る
pub fn build(form: &SurveyForm, captured_at: DateTime<Utc>) -> SurveySnapshot {
    let permit = PermitState::from_selection(form.permit_status.trim(), || PermitDetails {
        municipality: form.municipality.trim().to_string(),
        permit_number: form.permit_number.trim().to_string(),
        permit_notes: form.permit_notes.trim().to_string(),
    });

    let kind = match form.sign_type.trim() {
        "" => SignKind::Unselected,
        "Ground" => SignKind::Ground(GroundMeasurements {
            bottom_to_grade_in: parse_number(&form.bottom_to_grade_in),
            post_spacing_in: parse_number(&form.post_spacing_in),
        }),
        "Wall" => SignKind::Wall(WallMeasurements {
            mount_height_ft: parse_number(&form.mount_height_ft),
        }),
        "Other" => SignKind::Other {
            other_type: form.other_type.trim().to_string(),
        },
        listed => SignKind::Listed(listed.to_string()),
    };

    let illumination = match form.illuminated.trim() {
        "Yes" => Illumination::Yes {
            power_visible: form.power_visible.trim().to_string(),
        },
        "No" => Illumination::No,
        _ => Illumination::Unselected,
    };

    SurveySnapshot {
        schema_version: SCHEMA_VERSION.to_string(),
        captured_at,
        saved_at: None,
        exported_at: None,

        site_name: form.site_name.trim().to_string(),
        surveyor_name: form.surveyor.trim().to_string(),
        contact: Contact {
            name: form.contact_name.trim().to_string(),
            phone: form.contact_phone.trim().to_string(),
        },
        address: Address {
            street: form.street.trim().to_string(),
            city: form.city.trim().to_string(),
            state: form.state.trim().to_uppercase(),
            zip: form.zip.trim().to_string(),
        },
        conditions: Conditions {
            season: form.season.trim().to_string(),
            permit,
        },
        zones: Zones {
            a: form.zone_a.trim().to_string(),
            b: form.zone_b.trim().to_string(),
            c: form.zone_c.trim().to_string(),
        },
        sign: SignDetails {
            kind,
            mounting: form.mounting.trim().to_string(),
            surface: Surface::from_selection(form.surface.trim(), || form.surface_other.trim().to_string()),
        },
        width_in: parse_number(&form.width_in),
        height_in: parse_number(&form.height_in),
        electrical: Electrical { illumination },
        photos: Photos {
            wide: form.photo_wide.as_ref().map(SelectedFile::to_meta),
            straight: form.photo_straight.as_ref().map(SelectedFile::to_meta),
            mount: form.photo_mount.as_ref().map(SelectedFile::to_meta),
        },
        notes: form.notes.trim().to_string(),
    }
}

/// 数値入力を解釈する。十進表記の有限値のみ受け付ける
pub fn parse_number(input: &str) -> Option<f64> {
    lazy_static::lazy_static! {
        static ref NUMBER_RE: Regex =
            Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap();
    }

    let trimmed = input.trim();
    if !NUMBER_RE.is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 数値を最短表記で文字列化（48.0 → "48"）
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

fn format_optional(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

/// 条件付き入力欄の表示状態
///
/// 選択値だけから毎回計算し、状態は持たない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Visibility {
    pub permit_details: bool,
    pub ground_block: bool,
    pub wall_block: bool,
    pub other_type: bool,
    pub surface_other: bool,
    pub power_visible: bool,
}

impl Visibility {
    pub fn of(form: &SurveyForm) -> Self {
        let sign_type = form.sign_type.trim();
        Self {
            permit_details: form.permit_status.trim() == "Yes",
            ground_block: sign_type == "Ground",
            wall_block: sign_type == "Wall",
            other_type: sign_type == "Other",
            surface_other: form.surface.trim() == "Other",
            power_visible: form.illuminated.trim() == "Yes",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 12, 9, minute, 0).unwrap()
    }

    fn photo(name: &str) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            size: 2048,
            mime_type: "image/jpeg".to_string(),
            last_modified: 1_700_000_000_000,
            path: Some(PathBuf::from(format!("/tmp/{}", name))),
        }
    }

    fn ground_form() -> SurveyForm {
        SurveyForm {
            site_name: "  Acme Deli ".into(),
            contact_name: "Jane".into(),
            surveyor: "Bob".into(),
            street: "1 Main St".into(),
            city: "Columbus".into(),
            state: " oh ".into(),
            zip: "43004".into(),
            season: "Summer".into(),
            permit_status: "No".into(),
            municipality: "Leftover".into(),
            sign_type: "Ground".into(),
            bottom_to_grade_in: "6".into(),
            post_spacing_in: "36".into(),
            mount_height_ft: "10".into(),
            width_in: "48".into(),
            height_in: "24".into(),
            photo_wide: Some(photo("wide.jpg")),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("48"), Some(48.0));
        assert_eq!(parse_number(" 6.5 "), Some(6.5));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("-2"), Some(-2.0));
        assert_eq!(parse_number("1e2"), Some(100.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("12in"), None);
        assert_eq!(parse_number("1e999"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(48.0), "48");
        assert_eq!(format_number(6.5), "6.5");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_build_normalizes_text() {
        let snapshot = build(&ground_form(), at(0));
        assert_eq!(snapshot.site_name, "Acme Deli");
        assert_eq!(snapshot.address.state, "OH");
        assert_eq!(snapshot.contact.phone, "");
        assert_eq!(snapshot.width_in, Some(48.0));
        assert_eq!(snapshot.captured_at, at(0));
    }

    #[test]
    fn test_build_populates_only_selected_blocks() {
        let snapshot = build(&ground_form(), at(0));
        // 許可 No のときは前回の詳細入力を持ち込まない
        assert!(snapshot.conditions.permit.details().is_none());
        assert_eq!(
            snapshot.sign.kind.ground(),
            Some(&GroundMeasurements {
                bottom_to_grade_in: Some(6.0),
                post_spacing_in: Some(36.0),
            })
        );
        assert!(snapshot.sign.kind.wall().is_none());

        let mut form = ground_form();
        form.sign_type = "Wall".into();
        let snapshot = build(&form, at(0));
        assert!(snapshot.sign.kind.ground().is_none());
        assert_eq!(snapshot.sign.kind.wall().unwrap().mount_height_ft, Some(10.0));
    }

    #[test]
    fn test_build_photo_metadata_only() {
        let snapshot = build(&ground_form(), at(0));
        let wide = snapshot.photos.wide.expect("wide写真がない");
        assert_eq!(wide.filename, "wide.jpg");
        assert_eq!(wide.byte_size, 2048);
        assert!(snapshot.photos.straight.is_none());

        let json = serde_json::to_string(&build(&ground_form(), at(0))).unwrap();
        assert!(!json.contains("/tmp/"));
    }

    #[test]
    fn test_build_is_idempotent() {
        let form = ground_form();
        let first = build(&form, at(0));
        let mut second = build(&form, at(1));
        assert_ne!(first, second);
        second.captured_at = first.captured_at;
        assert_eq!(first, second);
        assert_eq!(form, ground_form());
    }

    #[test]
    fn test_build_surface_and_electrical() {
        let mut form = ground_form();
        form.surface = "Other".into();
        form.surface_other = " Vinyl fence ".into();
        form.illuminated = "No".into();
        form.power_visible = "Yes".into();
        let snapshot = build(&form, at(0));
        assert_eq!(snapshot.sign.surface, Surface::Other("Vinyl fence".into()));
        assert_eq!(snapshot.electrical.illumination, Illumination::No);
    }

    #[test]
    fn test_from_snapshot_restores_fields() {
        let mut form = ground_form();
        form.permit_status = "Yes".into();
        form.permit_number = "P-77".into();
        let snapshot = build(&form, at(0));
        let restored = SurveyForm::from_snapshot(&snapshot);

        assert_eq!(restored.site_name, "Acme Deli");
        assert_eq!(restored.state, "OH");
        assert_eq!(restored.permit_number, "P-77");
        assert_eq!(restored.bottom_to_grade_in, "6");
        assert_eq!(restored.width_in, "48");
        // 写真は復元しない
        assert!(restored.photo_wide.is_none());
        // 種別が異なるブロックの値は引き継がれない
        assert_eq!(restored.mount_height_ft, "");

        let mut rebuilt = build(&restored, at(0));
        rebuilt.photos = snapshot.photos.clone();
        assert_eq!(rebuilt, snapshot);
    }

    #[test]
    fn test_photo_mut() {
        let mut form = SurveyForm::default();
        *form.photo_mut(PhotoSlot::Mount) = Some(photo("mount.jpg"));
        assert!(form.photo_mount.is_some());
        assert!(form.photo_wide.is_none());
        form.photo_mut(PhotoSlot::Mount).take();
        assert!(form.photo_mount.is_none());
    }

    #[test]
    fn test_visibility() {
        let mut form = SurveyForm::default();
        assert_eq!(Visibility::of(&form), Visibility::default());

        form.permit_status = "Yes".into();
        form.sign_type = "Other".into();
        form.surface = "Other".into();
        form.illuminated = "Yes".into();
        let visible = Visibility::of(&form);
        assert!(visible.permit_details);
        assert!(visible.other_type);
        assert!(visible.surface_other);
        assert!(visible.power_visible);
        assert!(!visible.ground_block);
        assert!(!visible.wall_block);

        form.sign_type = "Ground".into();
        let visible = Visibility::of(&form);
        assert!(visible.ground_block && !visible.wall_block && !visible.other_type);
        // 同じ入力なら何度計算しても同じ
        assert_eq!(Visibility::of(&form), visible);
    }
}
