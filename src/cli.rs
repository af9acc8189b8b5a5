use clap::{Parser, Subcommand, ValueEnum};
use sign_survey_common::PhotoSlot;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sign-survey")]
#[command(about = "Sign site survey: fill in, check, save and export survey records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 編集中フォームのファイル（デフォルト: データディレクトリ/form.json）
    #[arg(long, global = true)]
    pub form: Option<PathBuf>,

    /// データディレクトリ（設定より優先）
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話式でフォームを入力
    Fill {
        /// 写真を選ぶフォルダ
        #[arg(short, long)]
        photos_dir: Option<PathBuf>,

        /// 空のフォームから始める
        #[arg(long)]
        fresh: bool,
    },

    /// フォームの1項目を設定
    Set {
        /// 項目名（siteName, permitStatus, widthIn ...）
        #[arg(required = true)]
        field: String,

        /// 値（空文字で消去）
        #[arg(default_value = "")]
        value: String,
    },

    /// 写真を添付/解除
    Photo {
        /// 写真の枠
        #[arg(value_enum)]
        slot: SlotArg,

        /// 写真ファイル（省略時は解除）
        path: Option<PathBuf>,
    },

    /// サマリーを表示（チェックなし）
    Preview,

    /// 入力チェック
    Validate {
        /// 写真の欠落を許す
        #[arg(long)]
        lenient: bool,
    },

    /// チェックして保存
    Save,

    /// JSONファイルに出力
    Export {
        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// チェックせずに下書きとして出力
        #[arg(long)]
        draft: bool,
    },

    /// サマリーをクリップボードにコピー
    Copy,

    /// メール下書き用の mailto リンクを表示
    Email {
        /// 宛先（設定より優先）
        #[arg(long)]
        to: Option<String>,
    },

    /// 保存済みレコードをフォームに復元
    Restore,

    /// 保存済みレコードとフォームを消去
    Clear {
        /// 確認しない
        #[arg(short, long)]
        yes: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 新規フォームの調査者名
        #[arg(long)]
        set_surveyor: Option<String>,

        /// メール宛先
        #[arg(long)]
        set_email: Option<String>,

        /// データディレクトリ
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 出力ディレクトリ
        #[arg(long)]
        set_export_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SlotArg {
    Wide,
    Straight,
    Mount,
}

impl From<SlotArg> for PhotoSlot {
    fn from(slot: SlotArg) -> Self {
        match slot {
            SlotArg::Wide => PhotoSlot::Wide,
            SlotArg::Straight => PhotoSlot::Straight,
            SlotArg::Mount => PhotoSlot::Mount,
        }
    }
}
