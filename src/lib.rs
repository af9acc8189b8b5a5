//! Sign site survey CLI
//!
//! 共通ライブラリ（sign_survey_common）の操作をファイル保存・対話入力・
//! クリップボードにつなぐ。

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod interactive;
pub mod logging;
pub mod photos;
pub mod storage;
