//! 評価（明瞭さ・見た目・ブランド適合）の計算
//!
//! デザイン付きフィードバックと単独フィードバックで同じ計算を共有する。

use serde::{Deserialize, Serialize};

/// 評価の下限
pub const MIN_RATING: u8 = 1;
/// 評価の上限
pub const MAX_RATING: u8 = 5;

/// 1〜5に丸めた評価値
pub fn clamp_rating(value: i64) -> u8 {
    value.clamp(MIN_RATING as i64, MAX_RATING as i64) as u8
}

/// 小数第1位で四捨五入（0.05は切り上げ）
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// 3項目の評価
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ratings {
    pub clarity: u8,
    pub visual_appeal: u8,
    pub brand_fit: u8,
}

impl Ratings {
    /// 範囲外の値は1〜5に丸める
    pub fn new(clarity: i64, visual_appeal: i64, brand_fit: i64) -> Self {
        Self {
            clarity: clamp_rating(clarity),
            visual_appeal: clamp_rating(visual_appeal),
            brand_fit: clamp_rating(brand_fit),
        }
    }

    /// 3項目の単純平均（丸めなし）
    pub fn mean(&self) -> f64 {
        (self.clarity as f64 + self.visual_appeal as f64 + self.brand_fit as f64) / 3.0
    }

    /// 3項目の平均（小数第1位）
    pub fn average(&self) -> f64 {
        round_tenth(self.mean())
    }
}

/// 評価を持つエンティティ
pub trait Rated {
    fn ratings(&self) -> Ratings;
}

/// 平均値を星の数（0〜5）に変換
pub fn stars(average: f64) -> u8 {
    if average.is_nan() || average <= 0.0 {
        return 0;
    }
    (average.round() as u8).min(MAX_RATING)
}
