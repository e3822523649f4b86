//! ギャラリー一覧の絞り込み
//!
//! 毎回全件から計算し直す（インデックスなし）。

use crate::design::{sort_designs, Design};
use crate::sort::SortOrder;
use serde::Deserialize;

/// 一覧の検索条件
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryQuery {
    /// 自由入力（空なら全件）
    pub text: String,
    /// カテゴリ（`None` なら全カテゴリ）
    pub category: Option<String>,
    pub sort: SortOrder,
}

impl GalleryQuery {
    /// テキストがいずれかの項目に含まれるか（大文字小文字無視）
    pub fn matches_text(&self, design: &Design) -> bool {
        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [
            design.title.as_str(),
            design.designer_name.as_deref().unwrap_or_default(),
            design.category.as_str(),
            design.description.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn matches_category(&self, design: &Design) -> bool {
        match self.category.as_deref() {
            None => true,
            Some(category) => design.category == category,
        }
    }
}

/// 条件に合うデザインを並び替えて返す
pub fn filter_designs(designs: &[Design], query: &GalleryQuery) -> Vec<Design> {
    let matched: Vec<Design> = designs
        .iter()
        .filter(|d| query.matches_text(d) && query.matches_category(d))
        .cloned()
        .collect();

    sort_designs(&matched, query.sort)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::DesignFeedback;
    use chrono::{Duration, TimeZone, Utc};

    fn design(id: &str, title: &str, category: &str, minutes: i64) -> Design {
        Design {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            description: String::new(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 18, 0, 0, 0).unwrap()
                + Duration::minutes(minutes),
            ..Default::default()
        }
    }

    fn gallery() -> Vec<Design> {
        vec![
            design("1", "Coffee Shop Mark", "Logo", 0),
            Design {
                designer_name: Some("Rina".to_string()),
                description: "Summer festival".to_string(),
                ..design("2", "Jazz Night", "Poster", 1)
            },
            design("3", "Banking Dashboard", "UI/UX", 2),
        ]
    }

    fn ids(designs: &[Design]) -> Vec<&str> {
        designs.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_all_newest_first() {
        let result = filter_designs(&gallery(), &GalleryQuery::default());
        assert_eq!(ids(&result), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_text_matches_category() {
        let query = GalleryQuery { text: "logo".to_string(), ..Default::default() };
        let result = filter_designs(&gallery(), &query);
        assert_eq!(ids(&result), vec!["1"]);
    }

    #[test]
    fn test_text_matches_designer_and_description() {
        let by_designer = GalleryQuery { text: "RINA".to_string(), ..Default::default() };
        assert_eq!(ids(&filter_designs(&gallery(), &by_designer)), vec!["2"]);

        let by_description = GalleryQuery { text: "festival".to_string(), ..Default::default() };
        assert_eq!(ids(&filter_designs(&gallery(), &by_description)), vec!["2"]);
    }

    #[test]
    fn test_category_exact_match() {
        let query = GalleryQuery { category: Some("UI/UX".to_string()), ..Default::default() };
        assert_eq!(ids(&filter_designs(&gallery(), &query)), vec!["3"]);

        let lower = GalleryQuery { category: Some("ui/ux".to_string()), ..Default::default() };
        assert!(filter_designs(&gallery(), &lower).is_empty());
    }

    #[test]
    fn test_sort_by_average() {
        let mut designs = gallery();
        designs[0].feedback.push(DesignFeedback {
            clarity: 5,
            visual_appeal: 5,
            brand_fit: 5,
            ..Default::default()
        });
        designs[1].feedback.push(DesignFeedback {
            clarity: 2,
            visual_appeal: 2,
            brand_fit: 2,
            ..Default::default()
        });

        let query = GalleryQuery { sort: SortOrder::Highest, ..Default::default() };
        let result = filter_designs(&designs, &query);
        // フィードバックなしは0扱いで最後
        assert_eq!(ids(&result), vec!["1", "2", "3"]);

        let query = GalleryQuery { sort: SortOrder::Lowest, ..Default::default() };
        assert_eq!(ids(&filter_designs(&designs, &query)), vec!["3", "2", "1"]);
    }
}
