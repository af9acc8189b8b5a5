//! Sign Survey Common Library
//!
//! CLIと他の表示層で共有される型とロジック:
//! フォーム状態 → スナップショット → チェック → サマリー / 保存 / 出力

pub mod types;
pub mod error;
pub mod form;
pub mod validate;
pub mod summary;
pub mod migrate;
pub mod store;
pub mod export;
pub mod session;

pub use types::{
    Address, Conditions, Contact, Electrical, GroundMeasurements, Illumination, PermitDetails,
    PermitState, PhotoMeta, PhotoSlot, Photos, SignDetails, SignKind, Surface, SurveySnapshot,
    WallMeasurements, Zones, SCHEMA_VERSION,
};
pub use error::{Error, Result};
pub use form::{build, parse_number, SelectedFile, SurveyForm, Visibility};
pub use validate::{validate, Strictness, Violation};
pub use summary::{render_summary, render_violations};
pub use migrate::{migrate, migrate_str};
pub use store::{KeyValueStore, MemoryStore, SurveyStore, STORAGE_KEY};
pub use export::{export_filename, mailto_link, slugify, FileSink, MemorySink};
pub use session::{ExportOutcome, SaveOutcome, SaveStatus, SurveySession};
