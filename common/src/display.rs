//! 表示用の整形
//!
//! 一覧・詳細で使う星表示、平均値、日時表記。

use crate::design::Design;
use crate::rating::{stars, MAX_RATING};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 星表示（例: `★★★★☆`）
pub fn render_stars(average: f64) -> String {
    let filled = stars(average) as usize;
    let empty = MAX_RATING as usize - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

/// 平均値の表記（例: `4.0/5.0`）
pub fn format_average(average: f64) -> String {
    format!("{:.1}/{:.1}", average, MAX_RATING as f64)
}

/// 件数表記（`1 Design` / `3 Designs`）
pub fn design_count_label(count: usize) -> String {
    if count == 1 {
        "1 Design".to_string()
    } else {
        format!("{} Designs", count)
    }
}

/// 経過時間の表記
///
/// 1分未満 `Just now`、1時間未満 `Nm ago`、1日未満 `Nh ago`、7日未満 `Nd ago`、
/// それ以降は日付。
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        then.format("%Y-%m-%d").to_string()
    }
}

/// 投稿日の表記（例: `January 18, 2026`）
pub fn format_posted_date(at: DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

/// 一覧表示用のデザイン概要
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    pub designer: String,
    pub feedback_count: usize,
    pub average: f64,
}

impl From<&Design> for DesignSummary {
    fn from(design: &Design) -> Self {
        Self {
            id: design.id.clone(),
            title: design.title.clone(),
            category: design.category.clone(),
            designer: design.designer_display_name().to_string(),
            feedback_count: design.feedback.len(),
            average: design.average(),
        }
    }
}
