//! クリップボードへのコピー
//!
//! OSのクリップボードコマンドに標準入力で渡す。どれも使えなければ
//! 手動コピー用にテキストをそのまま返す（失敗扱いにはしない）。

use crate::error::{Result, SurveyCliError};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// コピーの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// 使ったコマンド名
    Copied(&'static str),
    /// 手動でコピーしてもらうテキスト
    Manual(String),
}

#[cfg(target_os = "macos")]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(windows)]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", windows)))]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

pub async fn copy_to_clipboard(text: &str) -> CopyOutcome {
    for &(program, args) in CLIPBOARD_COMMANDS {
        match pipe_to(program, args, text).await {
            Ok(()) => return CopyOutcome::Copied(program),
            Err(e) => tracing::debug!(program, error = %e, "clipboard command unavailable"),
        }
    }
    CopyOutcome::Manual(text.to_string())
}

/// コマンドを起動してテキストを標準入力に流す
pub async fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| SurveyCliError::Clipboard(format!("{}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).await?;
        // drop で閉じて EOF を送る
    }

    let status = child.wait().await?;
    if !status.success() {
        return Err(SurveyCliError::Clipboard(format!(
            "{} failed (code {:?})",
            program,
            status.code()
        )));
    }
    Ok(())
}
