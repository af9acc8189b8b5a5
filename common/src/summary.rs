//! サマリー（プレーンテキスト）生成
//!
//! 画面プレビュー・コピー・メール本文で共通のレイアウト。
//! 未入力の値は "-" で表し、下書き（不備あり）でも必ず最後まで出力する。

use crate::form::format_number;
use crate::types::{Illumination, PermitState, PhotoSlot, SignKind, Surface, SurveySnapshot};
use crate::validate::Violation;

const PLACEHOLDER: &str = "-";

fn text(value: &str) -> &str {
    if value.is_empty() {
        PLACEHOLDER
    } else {
        value
    }
}

fn measure(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{} {}", format_number(v), unit),
        None => PLACEHOLDER.to_string(),
    }
}

/// スナップショットをサマリーテキストにする
pub fn render_summary(snapshot: &SurveySnapshot) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("SIGN SITE SURVEY — {}", snapshot.schema_version));
    lines.push(format!("Captured: {}", snapshot.captured_at.to_rfc3339()));
    if let Some(saved_at) = snapshot.saved_at {
        lines.push(format!("Saved: {}", saved_at.to_rfc3339()));
    }
    if let Some(exported_at) = snapshot.exported_at {
        lines.push(format!("Exported: {}", exported_at.to_rfc3339()));
    }
    lines.push(String::new());

    lines.push(format!("Site: {}", text(&snapshot.site_name)));
    lines.push(format!("Contact: {}", text(&snapshot.contact.name)));
    lines.push(format!("Phone: {}", text(&snapshot.contact.phone)));
    lines.push(format!("Surveyor: {}", text(&snapshot.surveyor_name)));
    lines.push(String::new());

    let address = &snapshot.address;
    lines.push("Address:".to_string());
    lines.push(text(&address.street).to_string());
    lines.push(format!(
        "{}, {} {}",
        text(&address.city),
        text(&address.state),
        text(&address.zip)
    ));
    lines.push(String::new());

    let conditions = &snapshot.conditions;
    lines.push(format!("Season Conditions: {}", text(&conditions.season)));
    lines.push(format!("Permit Status: {}", text(conditions.permit.as_str())));
    if let PermitState::Yes(details) = &conditions.permit {
        lines.push(format!("Municipality: {}", text(&details.municipality)));
        lines.push(format!("Permit #: {}", text(&details.permit_number)));
        lines.push(format!("Permit Notes: {}", text(&details.permit_notes)));
    }
    lines.push(String::new());

    lines.push("Zones:".to_string());
    lines.push(format!("A: {}", text(&snapshot.zones.a)));
    lines.push(format!("B: {}", text(&snapshot.zones.b)));
    lines.push(format!("C: {}", text(&snapshot.zones.c)));
    lines.push(String::new());

    let sign = &snapshot.sign;
    lines.push("Sign:".to_string());
    lines.push(format!("Type: {}", text(sign.kind.as_str())));
    match &sign.kind {
        SignKind::Ground(ground) => {
            lines.push(format!("Bottom to grade: {}", measure(ground.bottom_to_grade_in, "in")));
            lines.push(format!("Post spacing: {}", measure(ground.post_spacing_in, "in")));
        }
        SignKind::Wall(wall) => {
            lines.push(format!("Mount height: {}", measure(wall.mount_height_ft, "ft")));
        }
        SignKind::Other { other_type } => {
            lines.push(format!("Other type: {}", text(other_type)));
        }
        SignKind::Unselected | SignKind::Listed(_) => {}
    }
    lines.push(format!("Mounting: {}", text(&sign.mounting)));
    lines.push(format!("Surface: {}", text(sign.surface.as_str())));
    if let Surface::Other(other) = &sign.surface {
        lines.push(format!("Surface (other): {}", text(other)));
    }
    lines.push(String::new());

    let illumination = &snapshot.electrical.illumination;
    lines.push("Electrical:".to_string());
    lines.push(format!("Illuminated: {}", text(illumination.as_str())));
    if let Illumination::Yes { power_visible } = illumination {
        lines.push(format!("Power visible: {}", text(power_visible)));
    }
    lines.push(String::new());

    lines.push("Measurements:".to_string());
    lines.push(format!("Width: {}", measure(snapshot.width_in, "in")));
    lines.push(format!("Height: {}", measure(snapshot.height_in, "in")));
    lines.push(String::new());

    lines.push("Photos:".to_string());
    for slot in PhotoSlot::ALL {
        let status = match snapshot.photos.get(slot) {
            Some(meta) => format!("Attached ({})", text(&meta.filename)),
            None => "Missing".to_string(),
        };
        lines.push(format!("{}: {}", slot.label(), status));
    }
    lines.push(String::new());

    lines.push("Notes:".to_string());
    lines.push(text(&snapshot.notes).to_string());

    lines.join("\n")
}

/// 不備一覧のテキスト。不備がなければ空文字列
pub fn render_violations(violations: &[Violation]) -> String {
    if violations.is_empty() {
        return String::new();
    }

    let mut out = String::from("Fix these items:");
    for violation in violations {
        out.push_str("\n- ");
        out.push_str(&violation.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{build, SurveyForm};
    use crate::types::{PermitDetails, SurveySnapshot};
    use chrono::{TimeZone, Utc};

    fn blank() -> SurveySnapshot {
        SurveySnapshot::blank(Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap())
    }

    #[test]
    fn test_blank_snapshot_renders_placeholders() {
        let summary = render_summary(&blank());
        assert!(summary.starts_with("SIGN SITE SURVEY — 2.0\n"));
        assert!(summary.contains("Site: -\n"));
        assert!(summary.contains("Permit Status: -\n"));
        assert!(summary.contains("Width: -\n"));
        assert!(summary.contains("Wide: Missing"));
        assert!(!summary.contains("Municipality:"));
        assert!(!summary.contains("Bottom to grade:"));
        assert!(!summary.contains("Power visible:"));
        assert!(summary.ends_with("Notes:\n-"));
    }

    #[test]
    fn test_permit_yes_with_blank_details() {
        let mut snapshot = blank();
        snapshot.conditions.permit = PermitState::Yes(PermitDetails::default());
        let summary = render_summary(&snapshot);
        assert!(summary.contains("Permit Status: Yes\nMunicipality: -\nPermit #: -\nPermit Notes: -"));
    }

    #[test]
    fn test_wall_section() {
        let form = SurveyForm {
            sign_type: "Wall".into(),
            mount_height_ft: "12.5".into(),
            illuminated: "Yes".into(),
            power_visible: "No".into(),
            notes: "Rear lot access".into(),
            ..Default::default()
        };
        let summary = render_summary(&build(&form, Utc::now()));
        assert!(summary.contains("Type: Wall\nMount height: 12.5 ft"));
        assert!(summary.contains("Illuminated: Yes\nPower visible: No"));
        assert!(!summary.contains("Post spacing"));
        assert!(summary.ends_with("Notes:\nRear lot access"));
    }

    #[test]
    fn test_saved_line_only_when_saved() {
        let mut snapshot = blank();
        assert!(!render_summary(&snapshot).contains("Saved:"));
        snapshot.saved_at = Some(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap());
        assert!(render_summary(&snapshot).contains("Saved: 2026-03-01T09:00:00+00:00"));
    }

    #[test]
    fn test_render_violations() {
        assert_eq!(render_violations(&[]), "");
        assert_eq!(
            render_violations(&[Violation::SiteName, Violation::Width]),
            "Fix these items:\n- Site / Business Name is required.\n- Width must be > 0."
        );
    }
}
