//! 出力ゲートウェイ
//!
//! - JSONファイルの保存先（`FileSink`）
//! - 出力ファイル名 `sign-survey_<slug>_<YYYYMMDD_HHMM>.json`
//! - メール下書き用の `mailto:` リンク

use crate::error::Result;
use crate::summary::render_summary;
use crate::types::SurveySnapshot;
use chrono::{DateTime, TimeZone};
use regex::Regex;
use std::fmt::Display;

pub const FILE_PREFIX: &str = "sign-survey";

/// 出力ファイルの保存先
pub trait FileSink {
    /// 保存して保存場所（パスなど）を返す
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<String>;
}

/// メモリ上の保存先
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub files: Vec<(String, Vec<u8>)>,
}

impl FileSink for MemorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<String> {
        // 同名は後勝ち
        self.files.retain(|(name, _)| name != filename);
        self.files.push((filename.to_string(), bytes.to_vec()));
        Ok(filename.to_string())
    }
}

/// 現場名をファイル名用に変換
///
/// 小文字化し、英数字以外の連続を1つの "-" にまとめ、前後の "-" を落とす。
pub fn slugify(name: &str) -> String {
    lazy_static::lazy_static! {
        static ref NON_ALNUM_RE: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    }

    let lower = name.to_lowercase();
    NON_ALNUM_RE.replace_all(&lower, "-").trim_matches('-').to_string()
}

/// 出力ファイル名。現場名が空なら時刻のみ
pub fn export_filename<Tz>(site_name: &str, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let stamp = at.format("%Y%m%d_%H%M");
    let slug = slugify(site_name);
    if slug.is_empty() {
        format!("{}_{}.json", FILE_PREFIX, stamp)
    } else {
        format!("{}_{}_{}.json", FILE_PREFIX, slug, stamp)
    }
}

/// メール件名
pub fn email_subject(snapshot: &SurveySnapshot) -> String {
    format!("Sign Survey — {}", snapshot.site_name)
}

/// 宛先部分のエンコード（`@` と複数宛先の `,` はそのまま）
fn encode_address(address: &str) -> String {
    urlencoding::encode(address.trim())
        .replace("%40", "@")
        .replace("%2C", ",")
}

/// `mailto:` リンクを作る（本文はサマリー、添付なし）
pub fn mailto_link(snapshot: &SurveySnapshot, recipient: Option<&str>) -> String {
    let to = recipient.map(encode_address).unwrap_or_default();
    format!(
        "mailto:{}?subject={}&body={}",
        to,
        urlencoding::encode(&email_subject(snapshot)),
        urlencoding::encode(&render_summary(snapshot))
    )
}
