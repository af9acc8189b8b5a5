//! エラー型定義
//!
//! 入力不備（必須項目の欠落など）はエラーではなく `Violation` として
//! 値で返す。ここに並ぶのは保存・出力・読込の運用上の失敗のみ。

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Unsupported schema: {0}")]
    UnsupportedSchema(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
