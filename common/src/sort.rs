//! 並び替え
//!
//! フィードバックとデザイン一覧で共通の4種類の並び順。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 並び順
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// 新しい順（デフォルト）
    #[default]
    Newest,
    /// 古い順
    Oldest,
    /// 評価の高い順
    Highest,
    /// 評価の低い順
    Lowest,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" | "new" => Ok(SortOrder::Newest),
            "oldest" | "old" => Ok(SortOrder::Oldest),
            "highest" | "high" => Ok(SortOrder::Highest),
            "lowest" | "low" => Ok(SortOrder::Lowest),
            _ => Err(format!(
                "Unknown sort order: {}. Use newest, oldest, highest, or lowest",
                s
            )),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Newest => write!(f, "newest"),
            SortOrder::Oldest => write!(f, "oldest"),
            SortOrder::Highest => write!(f, "highest"),
            SortOrder::Lowest => write!(f, "lowest"),
        }
    }
}

/// 並び替えたコピーを返す（元のスライスは変更しない）
///
/// 同値の要素の順序は保証しない。
pub fn sorted_by<T, K, A>(items: &[T], order: SortOrder, timestamp: K, score: A) -> Vec<T>
where
    T: Clone,
    K: Fn(&T) -> DateTime<Utc>,
    A: Fn(&T) -> f64,
{
    let mut copy = items.to_vec();
    let by_score = |a: &T, b: &T| -> Ordering { score(a).total_cmp(&score(b)) };

    match order {
        SortOrder::Newest => copy.sort_by(|a, b| timestamp(b).cmp(&timestamp(a))),
        SortOrder::Oldest => copy.sort_by(|a, b| timestamp(a).cmp(&timestamp(b))),
        SortOrder::Highest => copy.sort_by(|a, b| by_score(b, a)),
        SortOrder::Lowest => copy.sort_by(|a, b| by_score(a, b)),
    }

    copy
}
