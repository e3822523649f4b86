//! 単独フィードバック
//!
//! デザインに紐づかないフラットなフィードバック一覧（キー `designFeedback`）。

use crate::error::Result;
use crate::id::generate_id;
use crate::lenient;
use crate::rating::{Rated, Ratings};
use crate::sort::{sorted_by, SortOrder};
use crate::store::{load_collection, save_collection, KeyValueStore};
use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 単独フィードバックの保存キー
pub const FEEDBACK_KEY: &str = "designFeedback";

/// 単独フィードバック
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Feedback {
    /// 旧形式の数値IDは10進文字列として読み込む
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub design_name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub image_url: String,
    #[serde(deserialize_with = "lenient::stored_rating")]
    pub clarity: u8,
    #[serde(deserialize_with = "lenient::stored_rating")]
    pub visual_appeal: u8,
    #[serde(deserialize_with = "lenient::stored_rating")]
    pub brand_fit: u8,
    #[serde(deserialize_with = "lenient::text")]
    pub comment: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// 単独フィードバックの入力
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewStandaloneFeedback {
    pub design_name: String,
    pub image_url: String,
    #[serde(deserialize_with = "lenient::input_rating")]
    pub clarity: i64,
    #[serde(deserialize_with = "lenient::input_rating")]
    pub visual_appeal: i64,
    #[serde(deserialize_with = "lenient::input_rating")]
    pub brand_fit: i64,
    pub comment: String,
}

impl Rated for Feedback {
    fn ratings(&self) -> Ratings {
        Ratings {
            clarity: self.clarity,
            visual_appeal: self.visual_appeal,
            brand_fit: self.brand_fit,
        }
    }
}

impl Feedback {
    pub fn average(&self) -> f64 {
        average(self)
    }
}

/// 3項目の平均（小数第1位）
pub fn average(item: &Feedback) -> f64 {
    item.ratings().average()
}

/// 並び替えたコピーを返す
pub fn sort_standalone(items: &[Feedback], order: SortOrder) -> Vec<Feedback> {
    sorted_by(items, order, |f| f.timestamp, |f| f.ratings().mean())
}

/// 単独フィードバックの永続化
pub struct FeedbackStore<S> {
    store: S,
}

impl<S: KeyValueStore> FeedbackStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 全件取得（未保存なら空）
    pub fn get_all(&self) -> Result<Vec<Feedback>> {
        load_collection(&self.store, FEEDBACK_KEY)
    }

    /// 追加
    pub fn add(&mut self, input: NewStandaloneFeedback) -> Result<Feedback> {
        let mut items = self.get_all()?;

        let ratings = Ratings::new(input.clarity, input.visual_appeal, input.brand_fit);
        let feedback = Feedback {
            id: generate_id(),
            design_name: input.design_name,
            image_url: input.image_url,
            clarity: ratings.clarity,
            visual_appeal: ratings.visual_appeal,
            brand_fit: ratings.brand_fit,
            comment: input.comment,
            timestamp: timestamp::now(),
        };

        items.push(feedback.clone());
        save_collection(&mut self.store, FEEDBACK_KEY, &items)?;

        tracing::info!(id = %feedback.id, design = %feedback.design_name, "feedback submitted");
        Ok(feedback)
    }

    /// IDで削除し、残りを返す
    pub fn delete(&mut self, id: &str) -> Result<Vec<Feedback>> {
        let remaining: Vec<Feedback> = self
            .get_all()?
            .into_iter()
            .filter(|item| item.id != id)
            .collect();
        save_collection(&mut self.store, FEEDBACK_KEY, &remaining)?;

        tracing::info!(id, remaining = remaining.len(), "feedback deleted");
        Ok(remaining)
    }
}
