//! デザインギャラリーの統合テスト
//!
//! ファイル保存のストアで投稿・評価・削除・一覧を検証

use design_feedback::storage;
use design_feedback_common::{
    average_of, filter_designs, sort_feedback, GalleryQuery, NewDesign, NewFeedback, SortOrder,
};
use tempfile::tempdir;

fn new_design(title: &str, category: &str) -> NewDesign {
    NewDesign {
        title: title.to_string(),
        designer_name: None,
        description: "d".to_string(),
        image_url: "http://x/a.png".to_string(),
        category: category.to_string(),
    }
}

fn feedback(clarity: i64, visual_appeal: i64, brand_fit: i64) -> NewFeedback {
    NewFeedback {
        author_name: None,
        clarity,
        visual_appeal,
        brand_fit,
        comment: "comment".to_string(),
    }
}

/// 再オープン後も同じ内容が読める
#[test]
fn test_persists_across_reopen() {
    let dir = tempdir().expect("Failed to create temp dir");

    let created = {
        let mut store = storage::design_store(dir.path());
        let design = store.add(new_design("Logo A", "Logo")).unwrap();
        store.add_feedback(&design.id, feedback(5, 4, 3)).unwrap()
    };

    let reopened = storage::design_store(dir.path());
    let loaded = reopened.get_by_id(&created.id).unwrap().expect("デザインが見つからない");
    assert_eq!(loaded, created);
}

/// Logo A のシナリオ
#[test]
fn test_logo_scenario() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = storage::design_store(dir.path());

    let design = store.add(new_design("Logo A", "Logo")).unwrap();
    let design = store.add_feedback(&design.id, feedback(5, 4, 3)).unwrap();
    assert_eq!(average_of(&design), 4.0);

    let design = store.add_feedback(&design.id, feedback(1, 1, 1)).unwrap();
    assert_eq!(average_of(&design), 2.5);
}

/// 保存形式はcamelCaseのJSON配列
#[test]
fn test_persisted_format() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = storage::design_store(dir.path());
    let design = store
        .add(NewDesign { designer_name: Some("Aoi".to_string()), ..new_design("Logo A", "Logo") })
        .unwrap();
    store.add_feedback(&design.id, feedback(5, 4, 3)).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("designs.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().unwrap()[0];

    assert_eq!(first["designerName"], "Aoi");
    assert_eq!(first["imageUrl"], "http://x/a.png");
    assert!(first["createdAt"].as_str().unwrap().ends_with('Z'));
    assert_eq!(first["feedback"][0]["visualAppeal"], 4);
    assert_eq!(first["feedback"][0]["authorName"], serde_json::Value::Null);
}

/// 削除は冪等
#[test]
fn test_delete_idempotent() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = storage::design_store(dir.path());
    let a = store.add(new_design("A", "Poster")).unwrap();
    store.add(new_design("B", "Flyer")).unwrap();

    let once = store.delete(&a.id).unwrap();
    let twice = store.delete(&a.id).unwrap();
    assert_eq!(once, twice);
    assert_eq!(store.get_all().unwrap(), once);
}

/// 一覧の検索と並び替え
#[test]
fn test_filter_and_sort() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = storage::design_store(dir.path());

    let logo = store.add(new_design("Coffee Mark", "Logo")).unwrap();
    let poster = store.add(new_design("Jazz Night", "Poster")).unwrap();
    store.add_feedback(&logo.id, feedback(2, 2, 2)).unwrap();
    store.add_feedback(&poster.id, feedback(5, 5, 5)).unwrap();

    let designs = store.get_all().unwrap();

    let query = GalleryQuery { text: "LOGO".to_string(), ..Default::default() };
    let matched = filter_designs(&designs, &query);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, logo.id);

    let query = GalleryQuery { sort: SortOrder::Highest, ..Default::default() };
    let ranked = filter_designs(&designs, &query);
    assert_eq!(ranked[0].id, poster.id);
    assert_eq!(ranked[1].id, logo.id);

    let query = GalleryQuery { category: Some("Poster".to_string()), ..Default::default() };
    assert_eq!(filter_designs(&designs, &query).len(), 1);
}

/// フィードバックの並び替えは保存内容を変えない
#[test]
fn test_sort_feedback_does_not_persist() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = storage::design_store(dir.path());
    let design = store.add(new_design("Logo A", "Logo")).unwrap();
    store.add_feedback(&design.id, feedback(1, 1, 1)).unwrap();
    let design = store.add_feedback(&design.id, feedback(5, 5, 5)).unwrap();

    let highest = sort_feedback(&design.feedback, SortOrder::Highest);
    assert_eq!(highest[0].clarity, 5);

    let stored = store.get_by_id(&design.id).unwrap().unwrap();
    assert_eq!(stored.feedback[0].clarity, 1);
}

/// 評価が null の古いデータがあっても全件読める
#[test]
fn test_null_rating_does_not_hide_collection() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = storage::design_store(dir.path());
    let first = store.add(new_design("Logo A", "Logo")).unwrap();
    let second = store.add(new_design("Poster", "Poster")).unwrap();
    store.add_feedback(&second.id, feedback(4, 4, 4)).unwrap();

    let path = dir.path().join("designs.json");
    let content = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, content.replacen("\"clarity\":4", "\"clarity\":null", 1)).unwrap();

    let designs = store.get_all().unwrap();
    assert_eq!(designs.len(), 2);
    assert_eq!(designs[1].feedback[0].clarity, 0);

    let remaining = store.delete(&first.id).unwrap();
    assert_eq!(remaining.len(), 1);
}
