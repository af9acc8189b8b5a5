//! 診断ログの初期化
//!
//! 利用者向けの進捗は println! で出し、こちらは stderr の診断用。

use tracing::Level;

pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // 2回目以降の初期化（テストなど）は無視
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
