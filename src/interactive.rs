//! 対話式フォーム入力
//!
//! 項目を画面と同じ順に尋ねる。条件付きの項目（許可詳細・地面/壁面計測など）は
//! 直前までの選択値から `Visibility` を計算し直して、表示対象のときだけ尋ねる。

use crate::error::{Result, SurveyCliError};
use crate::photos::{list_photos, select_photo};
use dialoguer::{Input, Select};
use sign_survey_common::types::{
    ILLUMINATION, MOUNTINGS, PERMIT_STATUSES, POWER_VISIBLE, SEASONS, SIGN_TYPES, SURFACES,
};
use sign_survey_common::{PhotoSlot, SelectedFile, SurveyForm, Visibility};
use std::path::Path;

const NONE_LABEL: &str = "(not selected)";
const KEEP_LABEL: &str = "(keep current)";
const CLEAR_LABEL: &str = "(no photo)";

/// 選択肢リスト（先頭は未選択）と現在値の位置
pub fn selector_items(options: &[&str], current: &str) -> (Vec<String>, usize) {
    let mut items = vec![NONE_LABEL.to_string()];
    items.extend(options.iter().map(|o| o.to_string()));

    let current = current.trim();
    let index = match options.iter().position(|o| *o == current) {
        Some(pos) => pos + 1,
        None if current.is_empty() => 0,
        None => {
            // 一覧にない値（旧データ）も選べるように残す
            items.push(current.to_string());
            items.len() - 1
        }
    };
    (items, index)
}

/// 選択番号から値に戻す
pub fn selection_value(items: &[String], index: usize) -> String {
    match index {
        0 => String::new(),
        i => items.get(i).cloned().unwrap_or_default(),
    }
}

fn prompt_text(label: &str, current: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(label)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| SurveyCliError::Prompt(e.to_string()))
}

fn prompt_select(label: &str, options: &[&str], current: &str) -> Result<String> {
    let (items, default) = selector_items(options, current);
    let index = Select::new()
        .with_prompt(label)
        .items(&items)
        .default(default)
        .interact()
        .map_err(|e| SurveyCliError::Prompt(e.to_string()))?;
    Ok(selection_value(&items, index))
}

fn prompt_photo(
    slot: PhotoSlot,
    current: Option<SelectedFile>,
    candidates: &[std::path::PathBuf],
) -> Result<Option<SelectedFile>> {
    let mut items = vec![KEEP_LABEL.to_string(), CLEAR_LABEL.to_string()];
    items.extend(
        candidates
            .iter()
            .map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()),
    );

    let label = match &current {
        Some(file) => format!("Photo: {} [{}]", slot.label(), file.name),
        None => format!("Photo: {} [missing]", slot.label()),
    };
    let index = Select::new()
        .with_prompt(label)
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| SurveyCliError::Prompt(e.to_string()))?;

    match index {
        0 => Ok(current),
        1 => Ok(None),
        i => select_photo(&candidates[i - 2]).map(Some),
    }
}

/// フォームを対話式で埋める
pub fn run_interactive_fill(mut form: SurveyForm, photos_dir: Option<&Path>) -> Result<SurveyForm> {
    println!("📝 Sign site survey\n");

    form.site_name = prompt_text("Site / Business Name", &form.site_name)?;
    form.contact_name = prompt_text("On-site Contact Name", &form.contact_name)?;
    form.contact_phone = prompt_text("Contact Phone", &form.contact_phone)?;
    form.surveyor = prompt_text("Surveyor", &form.surveyor)?;

    form.street = prompt_text("Street", &form.street)?;
    form.city = prompt_text("City", &form.city)?;
    form.state = prompt_text("State", &form.state)?;
    form.zip = prompt_text("ZIP", &form.zip)?;

    form.season = prompt_select("Season Conditions", SEASONS, &form.season)?;
    form.permit_status = prompt_select("Permit Status", PERMIT_STATUSES, &form.permit_status)?;
    if Visibility::of(&form).permit_details {
        form.municipality = prompt_text("Municipality", &form.municipality)?;
        form.permit_number = prompt_text("Permit #", &form.permit_number)?;
        form.permit_notes = prompt_text("Permit Notes", &form.permit_notes)?;
    }

    form.zone_a = prompt_text("Zone A", &form.zone_a)?;
    form.zone_b = prompt_text("Zone B", &form.zone_b)?;
    form.zone_c = prompt_text("Zone C", &form.zone_c)?;

    form.sign_type = prompt_select("Sign Type", SIGN_TYPES, &form.sign_type)?;
    let visible = Visibility::of(&form);
    if visible.ground_block {
        form.bottom_to_grade_in = prompt_text("Bottom to grade (in)", &form.bottom_to_grade_in)?;
        form.post_spacing_in = prompt_text("Post spacing (in)", &form.post_spacing_in)?;
    }
    if visible.wall_block {
        form.mount_height_ft = prompt_text("Mount height (ft)", &form.mount_height_ft)?;
    }
    if visible.other_type {
        form.other_type = prompt_text("Other sign type", &form.other_type)?;
    }

    form.mounting = prompt_select("Mounting", MOUNTINGS, &form.mounting)?;
    form.surface = prompt_select("Surface", SURFACES, &form.surface)?;
    if Visibility::of(&form).surface_other {
        form.surface_other = prompt_text("Surface (other)", &form.surface_other)?;
    }

    form.illuminated = prompt_select("Illuminated", ILLUMINATION, &form.illuminated)?;
    if Visibility::of(&form).power_visible {
        form.power_visible = prompt_select("Power visible", POWER_VISIBLE, &form.power_visible)?;
    }

    form.width_in = prompt_text("Width (in)", &form.width_in)?;
    form.height_in = prompt_text("Height (in)", &form.height_in)?;

    if let Some(dir) = photos_dir {
        let candidates = list_photos(dir)?;
        println!("  {} photo(s) in {}", candidates.len(), dir.display());
        form.photo_wide = prompt_photo(PhotoSlot::Wide, form.photo_wide.take(), &candidates)?;
        form.photo_straight = prompt_photo(PhotoSlot::Straight, form.photo_straight.take(), &candidates)?;
        form.photo_mount = prompt_photo(PhotoSlot::Mount, form.photo_mount.take(), &candidates)?;
    }

    form.notes = prompt_text("Notes", &form.notes)?;

    Ok(form)
}
