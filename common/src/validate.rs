//! 入力チェック
//!
//! 不備はすべて集めて返す（途中で打ち切らない）。順序は固定で、
//! 画面上の項目順に並ぶ。空の結果は要求されたモードを満たすことを表す。

use crate::types::{SignKind, Surface, SurveySnapshot};
use thiserror::Error;

/// チェックの厳しさ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// 保存用: 写真3枚も必須
    #[default]
    Strict,
    /// 下書き出力用: 写真の欠落を許す
    Lenient,
}

/// 入力不備
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    #[error("Site / Business Name is required.")]
    SiteName,

    #[error("On-site Contact Name is required.")]
    ContactName,

    #[error("Surveyor is required.")]
    Surveyor,

    #[error("Complete address is required (Street, City, State, ZIP).")]
    Address,

    #[error("Season Conditions is required.")]
    Season,

    #[error("Permit Status is required (Unknown / No / Yes).")]
    PermitStatus,

    #[error("Width must be > 0.")]
    Width,

    #[error("Height must be > 0.")]
    Height,

    #[error("Bottom to grade is required for ground signs (0 or more).")]
    BottomToGrade,

    #[error("Post spacing is required for ground signs (0 or more).")]
    PostSpacing,

    #[error("Mount height is required for wall signs (0 or more).")]
    MountHeight,

    #[error("Describe the sign type when Sign Type is Other.")]
    OtherType,

    #[error("Mounting is required.")]
    Mounting,

    #[error("Surface is required.")]
    Surface,

    #[error("Describe the surface when Surface is Other.")]
    SurfaceOther,

    #[error("Three photos are required (Wide, Straight-on, Mount detail).")]
    Photos,
}

/// スナップショットをチェックし、不備を項目順に返す
pub fn validate(snapshot: &SurveySnapshot, strictness: Strictness) -> Vec<Violation> {
    let mut violations = Vec::new();

    if snapshot.site_name.is_empty() {
        violations.push(Violation::SiteName);
    }
    if snapshot.contact.name.is_empty() {
        violations.push(Violation::ContactName);
    }
    if snapshot.surveyor_name.is_empty() {
        violations.push(Violation::Surveyor);
    }
    if !snapshot.address.is_complete() {
        violations.push(Violation::Address);
    }
    if snapshot.conditions.season.is_empty() {
        violations.push(Violation::Season);
    }
    if snapshot.conditions.permit.as_str().is_empty() {
        violations.push(Violation::PermitStatus);
    }

    if !is_positive(snapshot.width_in) {
        violations.push(Violation::Width);
    }
    if !is_positive(snapshot.height_in) {
        violations.push(Violation::Height);
    }

    match &snapshot.sign.kind {
        SignKind::Ground(ground) => {
            if !is_non_negative(ground.bottom_to_grade_in) {
                violations.push(Violation::BottomToGrade);
            }
            if !is_non_negative(ground.post_spacing_in) {
                violations.push(Violation::PostSpacing);
            }
        }
        SignKind::Wall(wall) => {
            if !is_non_negative(wall.mount_height_ft) {
                violations.push(Violation::MountHeight);
            }
        }
        SignKind::Other { other_type } => {
            if other_type.is_empty() {
                violations.push(Violation::OtherType);
            }
        }
        SignKind::Unselected | SignKind::Listed(_) => {}
    }

    if snapshot.sign.mounting.is_empty() {
        violations.push(Violation::Mounting);
    }
    match &snapshot.sign.surface {
        Surface::Unselected => violations.push(Violation::Surface),
        Surface::Other(text) if text.is_empty() => violations.push(Violation::SurfaceOther),
        _ => {}
    }

    if strictness == Strictness::Strict && !snapshot.photos.all_present() {
        violations.push(Violation::Photos);
    }

    violations
}

fn is_positive(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v > 0.0)
}

fn is_non_negative(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{build, SelectedFile, SurveyForm};
    use chrono::{TimeZone, Utc};

    fn photo(name: &str) -> Option<SelectedFile> {
        Some(SelectedFile {
            name: name.to_string(),
            size: 100,
            mime_type: "image/png".to_string(),
            ..Default::default()
        })
    }

    fn complete_form() -> SurveyForm {
        SurveyForm {
            site_name: "Acme Deli".into(),
            contact_name: "Jane".into(),
            surveyor: "Bob".into(),
            street: "1 Main St".into(),
            city: "Columbus".into(),
            state: "OH".into(),
            zip: "43004".into(),
            season: "Summer".into(),
            permit_status: "No".into(),
            sign_type: "Ground".into(),
            width_in: "48".into(),
            height_in: "24".into(),
            bottom_to_grade_in: "6".into(),
            post_spacing_in: "36".into(),
            mounting: "Posts".into(),
            surface: "Brick".into(),
            photo_wide: photo("a.png"),
            photo_straight: photo("b.png"),
            photo_mount: photo("c.png"),
            ..Default::default()
        }
    }

    fn check(form: &SurveyForm, strictness: Strictness) -> Vec<Violation> {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        validate(&build(form, at), strictness)
    }

    #[test]
    fn test_complete_form_passes() {
        assert!(check(&complete_form(), Strictness::Strict).is_empty());
        assert!(check(&complete_form(), Strictness::Lenient).is_empty());
    }

    #[test]
    fn test_blank_form_reports_everything_in_order() {
        let violations = check(&SurveyForm::default(), Strictness::Strict);
        assert_eq!(
            violations,
            vec![
                Violation::SiteName,
                Violation::ContactName,
                Violation::Surveyor,
                Violation::Address,
                Violation::Season,
                Violation::PermitStatus,
                Violation::Width,
                Violation::Height,
                Violation::Mounting,
                Violation::Surface,
                Violation::Photos,
            ]
        );
    }

    #[test]
    fn test_missing_name_contact_and_zero_width() {
        let mut form = complete_form();
        form.site_name = "   ".into();
        form.contact_name = String::new();
        form.width_in = "0".into();
        let messages: Vec<String> = check(&form, Strictness::Strict)
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Site / Business Name is required.",
                "On-site Contact Name is required.",
                "Width must be > 0.",
            ]
        );
    }

    #[test]
    fn test_partial_address_is_one_violation() {
        let mut form = complete_form();
        form.city = String::new();
        form.zip = String::new();
        assert_eq!(check(&form, Strictness::Strict), vec![Violation::Address]);
    }

    #[test]
    fn test_unparseable_height() {
        let mut form = complete_form();
        form.height_in = "tall".into();
        assert_eq!(check(&form, Strictness::Strict), vec![Violation::Height]);
    }

    #[test]
    fn test_ground_measurements_allow_zero() {
        let mut form = complete_form();
        form.bottom_to_grade_in = "0".into();
        form.post_spacing_in = String::new();
        assert_eq!(check(&form, Strictness::Strict), vec![Violation::PostSpacing]);

        form.bottom_to_grade_in = "-1".into();
        assert_eq!(
            check(&form, Strictness::Strict),
            vec![Violation::BottomToGrade, Violation::PostSpacing]
        );
    }

    #[test]
    fn test_wall_requires_mount_height() {
        let mut form = complete_form();
        form.sign_type = "Wall".into();
        assert_eq!(check(&form, Strictness::Strict), vec![Violation::MountHeight]);

        form.mount_height_ft = "12".into();
        assert!(check(&form, Strictness::Strict).is_empty());
    }

    #[test]
    fn test_other_type_and_surface_other() {
        let mut form = complete_form();
        form.sign_type = "Other".into();
        form.surface = "Other".into();
        assert_eq!(
            check(&form, Strictness::Strict),
            vec![Violation::OtherType, Violation::SurfaceOther]
        );

        form.other_type = "Blade".into();
        form.surface_other = "Timber post".into();
        assert!(check(&form, Strictness::Strict).is_empty());
    }

    #[test]
    fn test_photos_only_in_strict_mode() {
        let mut form = complete_form();
        form.photo_wide = None;
        form.photo_straight = None;
        form.photo_mount = None;
        assert!(check(&form, Strictness::Lenient).is_empty());
        assert_eq!(check(&form, Strictness::Strict), vec![Violation::Photos]);
    }

    #[test]
    fn test_permit_details_not_required() {
        let mut form = complete_form();
        form.permit_status = "Yes".into();
        assert!(check(&form, Strictness::Strict).is_empty());
    }

    #[test]
    fn test_unknown_permit_status_is_missing() {
        let mut form = complete_form();
        form.permit_status = "Maybe".into();
        assert_eq!(check(&form, Strictness::Strict), vec![Violation::PermitStatus]);
    }
}
