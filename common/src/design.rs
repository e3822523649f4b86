//! デザインギャラリー
//!
//! デザインとそのフィードバックを1つのキー（`designs`）に丸ごと保存する。
//!
//! - 取得は全件読み込み＋線形探索
//! - 更新は全件読み込み → 変更 → 全件書き戻し
//! - フィードバックは追記のみ（編集・個別削除なし）

use crate::error::{Error, Result};
use crate::id::generate_id;
use crate::lenient;
use crate::rating::{round_tenth, Rated, Ratings};
use crate::sort::{sorted_by, SortOrder};
use crate::store::{load_collection, save_collection, KeyValueStore};
use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// デザインの保存キー
pub const DESIGNS_KEY: &str = "designs";

/// デザイナー名が無いときの表示名
pub const ANONYMOUS_DESIGNER: &str = "Anonymous Designer";

/// 投稿者名が無いときの表示名
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// 投稿されたデザイン
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Design {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    /// `None` = 匿名
    #[serde(deserialize_with = "lenient::optional_text")]
    pub designer_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub image_url: String,
    #[serde(deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "lenient::list")]
    pub feedback: Vec<DesignFeedback>,
}

/// デザインへのフィードバック
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignFeedback {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    /// `None` = 匿名
    #[serde(deserialize_with = "lenient::optional_text")]
    pub author_name: Option<String>,
    #[serde(deserialize_with = "lenient::stored_rating")]
    pub clarity: u8,
    #[serde(deserialize_with = "lenient::stored_rating")]
    pub visual_appeal: u8,
    #[serde(deserialize_with = "lenient::stored_rating")]
    pub brand_fit: u8,
    #[serde(deserialize_with = "lenient::text")]
    pub comment: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// デザイン投稿の入力
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewDesign {
    pub title: String,
    pub designer_name: Option<String>,
    pub description: String,
    pub image_url: String,
    pub category: String,
}

/// フィードバックの入力
///
/// 評価は整数・小数・数字文字列で受け取り（小数は切り捨て）、保存時に1〜5へ丸める。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewFeedback {
    pub author_name: Option<String>,
    #[serde(deserialize_with = "lenient::input_rating")]
    pub clarity: i64,
    #[serde(deserialize_with = "lenient::input_rating")]
    pub visual_appeal: i64,
    #[serde(deserialize_with = "lenient::input_rating")]
    pub brand_fit: i64,
    pub comment: String,
}

impl Design {
    /// 表示用デザイナー名
    pub fn designer_display_name(&self) -> &str {
        self.designer_name.as_deref().unwrap_or(ANONYMOUS_DESIGNER)
    }

    /// 全フィードバックの平均
    pub fn average(&self) -> f64 {
        average_of(self)
    }
}

impl DesignFeedback {
    /// 表示用投稿者名
    pub fn author_display_name(&self) -> &str {
        match self.author_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => ANONYMOUS_AUTHOR,
        }
    }

    pub fn average(&self) -> f64 {
        average_of_single_feedback(self)
    }
}

impl Rated for DesignFeedback {
    fn ratings(&self) -> Ratings {
        Ratings {
            clarity: self.clarity,
            visual_appeal: self.visual_appeal,
            brand_fit: self.brand_fit,
        }
    }
}

/// 名前を正規化（前後空白を除去、空なら `None`）
pub fn normalize_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

/// デザインの平均評価
///
/// 各フィードバックの3項目平均を求め、その平均を小数第1位に丸める。
/// フィードバックが無ければ0。
pub fn average_of(design: &Design) -> f64 {
    if design.feedback.is_empty() {
        return 0.0;
    }

    let total: f64 = design.feedback.iter().map(|f| f.ratings().mean()).sum();
    round_tenth(total / design.feedback.len() as f64)
}

/// フィードバック1件の平均評価（小数第1位）
pub fn average_of_single_feedback(feedback: &DesignFeedback) -> f64 {
    feedback.ratings().average()
}

/// フィードバックを並び替えたコピーを返す
///
/// 評価順は丸め前の平均で比較する。
pub fn sort_feedback(feedback: &[DesignFeedback], order: SortOrder) -> Vec<DesignFeedback> {
    sorted_by(feedback, order, |f| f.created_at, |f| f.ratings().mean())
}

/// デザインを並び替えたコピーを返す
///
/// 評価順は `average_of` で比較する。
pub fn sort_designs(designs: &[Design], order: SortOrder) -> Vec<Design> {
    sorted_by(designs, order, |d| d.created_at, average_of)
}

/// デザインの永続化
pub struct DesignStore<S> {
    store: S,
}

impl<S: KeyValueStore> DesignStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<Vec<Design>> {
        load_collection(&self.store, DESIGNS_KEY)
    }

    fn save(&mut self, designs: &[Design]) -> Result<()> {
        save_collection(&mut self.store, DESIGNS_KEY, designs)
    }

    /// 全デザインを取得（未保存なら空）
    pub fn get_all(&self) -> Result<Vec<Design>> {
        self.load()
    }

    /// IDでデザインを取得
    pub fn get_by_id(&self, id: &str) -> Result<Option<Design>> {
        Ok(self.load()?.into_iter().find(|d| d.id == id))
    }

    /// デザインを追加
    pub fn add(&mut self, input: NewDesign) -> Result<Design> {
        let mut designs = self.load()?;

        let design = Design {
            id: generate_id(),
            title: input.title,
            designer_name: normalize_name(input.designer_name.as_deref()),
            description: input.description,
            image_url: input.image_url,
            category: input.category,
            created_at: timestamp::now(),
            feedback: Vec::new(),
        };

        designs.push(design.clone());
        self.save(&designs)?;

        tracing::info!(id = %design.id, title = %design.title, "design posted");
        Ok(design)
    }

    /// デザインにフィードバックを追加
    ///
    /// デザインが存在しなければ `Error::NotFound`（書き込みは行わない）。
    pub fn add_feedback(&mut self, design_id: &str, input: NewFeedback) -> Result<Design> {
        let mut designs = self.load()?;

        let Some(index) = designs.iter().position(|d| d.id == design_id) else {
            tracing::warn!(design_id, "feedback target not found");
            return Err(Error::NotFound(format!("Design with ID {} not found", design_id)));
        };

        let ratings = Ratings::new(input.clarity, input.visual_appeal, input.brand_fit);
        let feedback = DesignFeedback {
            id: generate_id(),
            author_name: normalize_name(input.author_name.as_deref()),
            clarity: ratings.clarity,
            visual_appeal: ratings.visual_appeal,
            brand_fit: ratings.brand_fit,
            comment: input.comment,
            created_at: timestamp::now(),
        };

        designs[index].feedback.push(feedback);
        self.save(&designs)?;

        let design = designs.swap_remove(index);
        tracing::info!(design_id, count = design.feedback.len(), "feedback added");
        Ok(design)
    }

    /// デザインを削除（存在しなくてもエラーにしない）
    pub fn delete(&mut self, id: &str) -> Result<Vec<Design>> {
        let designs = self.load()?;
        let before = designs.len();
        let remaining: Vec<Design> = designs.into_iter().filter(|d| d.id != id).collect();
        self.save(&remaining)?;

        if remaining.len() < before {
            tracing::info!(id, "design deleted");
        }
        Ok(remaining)
    }
}
