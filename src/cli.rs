use clap::{Parser, Subcommand};
use design_feedback_common::{resolve_category, SortOrder};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "design-feedback")]
#[command(about = "デザイン投稿・フィードバックギャラリー", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// データ保存先（設定・環境変数より優先）
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// デザインを投稿
    Post {
        /// タイトル
        #[arg(short, long, value_parser = non_empty)]
        title: String,

        /// 画像URL
        #[arg(short, long, value_parser = non_empty)]
        image_url: String,

        /// カテゴリ（`categories` で一覧表示）
        #[arg(short, long, value_parser = known_category)]
        category: String,

        /// デザイナー名（省略時は匿名）
        #[arg(short, long)]
        designer: Option<String>,

        /// 説明
        #[arg(long, default_value = "")]
        description: String,
    },

    /// デザイン一覧
    List {
        /// タイトル・デザイナー・カテゴリ・説明を検索
        #[arg(short, long, default_value = "")]
        query: String,

        /// カテゴリで絞り込み
        #[arg(short, long, value_parser = known_category)]
        category: Option<String>,

        /// 並び順 (newest/oldest/highest/lowest)
        #[arg(short, long)]
        sort: Option<SortOrder>,
    },

    /// デザイン詳細とフィードバック
    Show {
        /// デザインID
        #[arg(required = true)]
        id: String,

        /// フィードバックの並び順 (newest/oldest/highest/lowest)
        #[arg(short, long)]
        sort: Option<SortOrder>,
    },

    /// デザインにフィードバックを追加（省略した項目は対話入力）
    Rate {
        /// デザインID
        #[arg(required = true)]
        design_id: String,

        /// 明瞭さ (1-5)
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=5))]
        clarity: Option<i64>,

        /// 見た目 (1-5)
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=5))]
        visual_appeal: Option<i64>,

        /// ブランド適合 (1-5)
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=5))]
        brand_fit: Option<i64>,

        /// コメント
        #[arg(long, value_parser = non_empty)]
        comment: Option<String>,

        /// 投稿者名（省略時は匿名）
        #[arg(short, long)]
        author: Option<String>,
    },

    /// デザインを削除
    Delete {
        /// デザインID
        #[arg(required = true)]
        id: String,
    },

    /// カテゴリ一覧
    Categories,

    /// 単独フィードバック
    Feedback {
        #[command(subcommand)]
        action: FeedbackAction,
    },

    /// 保存データ管理
    Storage {
        /// 保存データを削除
        #[arg(long)]
        clear: bool,

        /// 保存データ情報を表示
        #[arg(long)]
        info: bool,
    },

    /// 設定を表示/編集
    Config {
        /// データ保存先を設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 既定の並び順を設定
        #[arg(long)]
        set_default_sort: Option<SortOrder>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum FeedbackAction {
    /// フィードバックを送信
    Submit {
        /// デザイン名
        #[arg(short = 'n', long, value_parser = non_empty)]
        design_name: String,

        /// 画像URL
        #[arg(short, long, value_parser = non_empty)]
        image_url: String,

        /// 明瞭さ (1-5)
        #[arg(long, default_value = "3", value_parser = clap::value_parser!(i64).range(1..=5))]
        clarity: i64,

        /// 見た目 (1-5)
        #[arg(long, default_value = "3", value_parser = clap::value_parser!(i64).range(1..=5))]
        visual_appeal: i64,

        /// ブランド適合 (1-5)
        #[arg(long, default_value = "3", value_parser = clap::value_parser!(i64).range(1..=5))]
        brand_fit: i64,

        /// コメント
        #[arg(long, value_parser = non_empty)]
        comment: String,
    },

    /// フィードバック一覧
    List {
        /// 並び順 (newest/oldest/highest/lowest、省略時は設定値)
        #[arg(short, long)]
        sort: Option<SortOrder>,
    },

    /// フィードバックを削除
    Delete {
        /// フィードバックID
        #[arg(required = true)]
        id: String,
    },
}

/// 空白のみの入力を拒否
pub fn non_empty(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("空にはできません".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// 定義済みカテゴリ名に解決（大文字小文字は無視）
pub fn known_category(s: &str) -> Result<String, String> {
    resolve_category(s)
        .map(str::to_string)
        .ok_or_else(|| format!("Unknown category: {}. `categories` で一覧を確認してください", s))
}
