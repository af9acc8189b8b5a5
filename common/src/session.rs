//! フォーム操作（保存・出力・消去・復元）
//!
//! 各操作は「スナップショット作成 → チェック → サマリー/ゲートウェイ」の順で完結する。
//! 不備があれば書き込みは一切行わず、不備一覧を値で返す。

use crate::error::Result;
use crate::export::{export_filename, FileSink};
use crate::form::{build, SurveyForm};
use crate::store::{KeyValueStore, SurveyStore};
use crate::types::SurveySnapshot;
use crate::validate::{validate, Strictness, Violation};
use chrono::{DateTime, Local, Utc};
use std::fmt;

/// 保存状態の表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    NotSaved,
    Saved,
    SavedRestored,
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStatus::NotSaved => write!(f, "Not saved"),
            SaveStatus::Saved => write!(f, "Saved"),
            SaveStatus::SavedRestored => write!(f, "Saved (restored)"),
        }
    }
}

/// 保存の結果
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(SurveySnapshot),
    Rejected(Vec<Violation>),
}

/// 出力の結果
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Exported {
        snapshot: SurveySnapshot,
        filename: String,
        location: String,
    },
    Rejected(Vec<Violation>),
}

/// 1件のフォームに対する操作
#[derive(Debug)]
pub struct SurveySession<S> {
    store: SurveyStore<S>,
    status: SaveStatus,
}

impl<S: KeyValueStore> SurveySession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: SurveyStore::new(store),
            status: SaveStatus::NotSaved,
        }
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    pub fn store(&self) -> &SurveyStore<S> {
        &self.store
    }

    /// 入力があったら未保存に戻す
    pub fn mark_edited(&mut self) {
        self.status = SaveStatus::NotSaved;
    }

    /// 厳格チェックを通ったときだけ保存する
    pub fn save(&mut self, form: &SurveyForm) -> Result<SaveOutcome> {
        self.save_at(form, Utc::now())
    }

    pub fn save_at(&mut self, form: &SurveyForm, now: DateTime<Utc>) -> Result<SaveOutcome> {
        let mut snapshot = build(form, now);
        let violations = validate(&snapshot, Strictness::Strict);
        if !violations.is_empty() {
            tracing::debug!(count = violations.len(), "save rejected");
            return Ok(SaveOutcome::Rejected(violations));
        }

        snapshot.saved_at = Some(now);
        self.store.put(&snapshot)?;
        self.status = SaveStatus::Saved;
        Ok(SaveOutcome::Saved(snapshot))
    }

    /// 写真の欠落を許すチェックを通ったら出力する
    pub fn export(&mut self, form: &SurveyForm, sink: &mut impl FileSink) -> Result<ExportOutcome> {
        self.export_at(form, sink, Local::now(), Strictness::Lenient)
    }

    /// チェックなしで下書きを出力する
    pub fn export_draft(&mut self, form: &SurveyForm, sink: &mut impl FileSink) -> Result<ExportOutcome> {
        let now = Local::now();
        self.write_export(build(form, now.with_timezone(&Utc)), sink, now)
    }

    pub fn export_at(
        &mut self,
        form: &SurveyForm,
        sink: &mut impl FileSink,
        now: DateTime<Local>,
        strictness: Strictness,
    ) -> Result<ExportOutcome> {
        let snapshot = build(form, now.with_timezone(&Utc));
        let violations = validate(&snapshot, strictness);
        if !violations.is_empty() {
            return Ok(ExportOutcome::Rejected(violations));
        }
        self.write_export(snapshot, sink, now)
    }

    fn write_export(
        &self,
        mut snapshot: SurveySnapshot,
        sink: &mut impl FileSink,
        now: DateTime<Local>,
    ) -> Result<ExportOutcome> {
        snapshot.exported_at = Some(now.with_timezone(&Utc));
        let filename = export_filename(&snapshot.site_name, &now);
        let json = snapshot.to_pretty_json()?;
        let location = sink.save(&filename, json.as_bytes())?;
        tracing::debug!(%filename, %location, "snapshot exported");
        Ok(ExportOutcome::Exported {
            snapshot,
            filename,
            location,
        })
    }

    /// 保存済みレコードを消し、空のフォームを返す
    pub fn clear(&mut self) -> Result<SurveyForm> {
        self.store.clear()?;
        self.status = SaveStatus::NotSaved;
        Ok(SurveyForm::default())
    }

    /// 保存済みレコードからフォームを復元する。読めなければ `None`
    pub fn restore(&mut self) -> Option<(SurveyForm, SurveySnapshot)> {
        let snapshot = self.store.get()?;
        self.status = SaveStatus::SavedRestored;
        Some((SurveyForm::from_snapshot(&snapshot), snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::MemorySink;
    use crate::form::SelectedFile;
    use crate::store::{MemoryStore, STORAGE_KEY};
    use chrono::TimeZone;

    fn photo(name: &str) -> Option<SelectedFile> {
        Some(SelectedFile {
            name: name.to_string(),
            size: 10,
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
            state: "oh".into(),
            zip: "43004".into(),
            season: "Summer".into(),
            permit_status: "No".into(),
            sign_type: "Ground".into(),
            bottom_to_grade_in: "6".into(),
            post_spacing_in: "36".into(),
            mounting: "Posts".into(),
            surface: "Brick".into(),
            width_in: "48".into(),
            height_in: "24".into(),
            photo_wide: photo("w.jpg"),
            photo_straight: photo("s.jpg"),
            photo_mount: photo("m.jpg"),
            ..Default::default()
        }
    }

    fn local(minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 6, 1, 10, minute, 0).unwrap()
    }

    #[test]
    fn test_save_status_text() {
        assert_eq!(SaveStatus::NotSaved.to_string(), "Not saved");
        assert_eq!(SaveStatus::Saved.to_string(), "Saved");
        assert_eq!(SaveStatus::SavedRestored.to_string(), "Saved (restored)");
    }

    #[test]
    fn test_save_complete_form() {
        let mut session = SurveySession::new(MemoryStore::new());
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap();
        let outcome = session.save_at(&complete_form(), now).unwrap();

        let SaveOutcome::Saved(snapshot) = outcome else {
            panic!("保存されていない");
        };
        assert_eq!(snapshot.saved_at, Some(now));
        assert_eq!(session.status(), SaveStatus::Saved);
        assert_eq!(session.store().get(), Some(snapshot));
    }

    #[test]
    fn test_save_rejected_writes_nothing() {
        let mut session = SurveySession::new(MemoryStore::new());
        let mut form = complete_form();
        form.photo_mount = None;

        let outcome = session.save(&form).unwrap();
        assert_eq!(outcome, SaveOutcome::Rejected(vec![Violation::Photos]));
        assert_eq!(session.status(), SaveStatus::NotSaved);
        assert!(session.store().inner().get_item(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_export_allows_missing_photos() {
        let mut session = SurveySession::new(MemoryStore::new());
        let mut sink = MemorySink::default();
        let mut form = complete_form();
        form.photo_wide = None;
        form.photo_straight = None;
        form.photo_mount = None;

        let outcome = session
            .export_at(&form, &mut sink, local(7), Strictness::Lenient)
            .unwrap();
        let ExportOutcome::Exported { snapshot, filename, .. } = outcome else {
            panic!("出力されていない");
        };
        assert_eq!(filename, "sign-survey_acme-deli_20260601_1007.json");
        assert!(snapshot.exported_at.is_some());

        let (name, bytes) = &sink.files[0];
        assert_eq!(name, &filename);
        let written: SurveySnapshot = serde_json::from_slice(bytes).unwrap();
        assert_eq!(written, snapshot);
        // 出力は保存先に影響しない
        assert!(session.store().get().is_none());
    }

    #[test]
    fn test_export_rejects_missing_required_fields() {
        let mut session = SurveySession::new(MemoryStore::new());
        let mut sink = MemorySink::default();
        let mut form = complete_form();
        form.surveyor = String::new();

        let outcome = session
            .export_at(&form, &mut sink, local(0), Strictness::Lenient)
            .unwrap();
        assert_eq!(outcome, ExportOutcome::Rejected(vec![Violation::Surveyor]));
        assert!(sink.files.is_empty());
    }

    #[test]
    fn test_export_draft_skips_checks() {
        let mut session = SurveySession::new(MemoryStore::new());
        let mut sink = MemorySink::default();
        let outcome = session.export_draft(&SurveyForm::default(), &mut sink).unwrap();
        assert!(matches!(outcome, ExportOutcome::Exported { .. }));
        assert!(sink.files[0].0.starts_with("sign-survey_2"));
    }

    #[test]
    fn test_restore_and_clear() {
        let mut session = SurveySession::new(MemoryStore::new());
        assert!(session.restore().is_none());

        session.save(&complete_form()).unwrap();
        let (form, snapshot) = session.restore().expect("復元できない");
        assert_eq!(session.status(), SaveStatus::SavedRestored);
        assert_eq!(form.state, "OH");
        assert!(form.photo_wide.is_none());
        // 復元した記録には写真が残っているが、フォーム側は空
        assert!(snapshot.photos.all_present());

        session.mark_edited();
        assert_eq!(session.status(), SaveStatus::NotSaved);

        let blank = session.clear().unwrap();
        assert_eq!(blank, SurveyForm::default());
        assert!(session.restore().is_none());
    }
}
