//! デザインカテゴリ
//!
//! 投稿フォームとカテゴリ絞り込みで使う固定リスト。

/// 定義済みカテゴリ
pub const CATEGORIES: &[&str] = &[
    "Poster",
    "Flyer",
    "Logo",
    "Brand Identity",
    "Web Design",
    "App Design",
    "UI/UX",
    "Illustration",
    "Motion Design",
    "Other",
];

/// 定義済みカテゴリかどうか（完全一致）
pub fn is_known_category(name: &str) -> bool {
    CATEGORIES.contains(&name)
}

/// 大文字小文字を無視して定義済みカテゴリ名に解決
pub fn resolve_category(name: &str) -> Option<&'static str> {
    let name = name.trim();
    CATEGORIES
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(name))
}
