//! JavaScript 向けバインディング
//!
//! ページ側から呼ぶ保存・集計関数。値は serde-wasm-bindgen で受け渡し、
//! エラーは JS の例外になる。

use crate::local_store::LocalStorageStore;
use design_feedback_common::feedback::average as feedback_average;
use design_feedback_common::{
    average_of, average_of_single_feedback, filter_designs, sort_feedback, Design,
    DesignFeedback, DesignStore, FeedbackStore, GalleryQuery, NewDesign, NewFeedback,
    NewStandaloneFeedback, SortOrder, CATEGORIES,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ============================================
// 変換ヘルパー
// ============================================

/// JSON互換の値に変換（`None` は `null`）
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn to_js_error(e: design_feedback_common::Error) -> JsError {
    let message = e.to_string();
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsError::new(&message)
}

fn design_store() -> Result<DesignStore<LocalStorageStore>, JsError> {
    Ok(DesignStore::new(LocalStorageStore::new().map_err(to_js_error)?))
}

fn feedback_store() -> Result<FeedbackStore<LocalStorageStore>, JsError> {
    Ok(FeedbackStore::new(LocalStorageStore::new().map_err(to_js_error)?))
}

fn parse_order(order: Option<String>) -> Result<SortOrder, JsError> {
    match order {
        Some(s) => s.parse::<SortOrder>().map_err(|e| JsError::new(&e)),
        None => Ok(SortOrder::default()),
    }
}

// ============================================
// デザインギャラリー
// ============================================

/// 全デザイン
#[wasm_bindgen(js_name = "getAllDesigns")]
pub fn get_all_designs() -> Result<JsValue, JsError> {
    let designs = design_store()?.get_all().map_err(to_js_error)?;
    to_js(&designs)
}

/// IDでデザインを取得（無ければ `null`）
#[wasm_bindgen(js_name = "getDesignById")]
pub fn get_design_by_id(id: &str) -> Result<JsValue, JsError> {
    let design = design_store()?.get_by_id(id).map_err(to_js_error)?;
    to_js(&design)
}

/// デザインを追加
///
/// `{ title, designerName?, description, imageUrl, category }`
#[wasm_bindgen(js_name = "addDesign")]
pub fn add_design(input: JsValue) -> Result<JsValue, JsError> {
    let input: NewDesign = from_js(input)?;
    let design = design_store()?.add(input).map_err(to_js_error)?;
    to_js(&design)
}

/// デザインにフィードバックを追加（デザインが無ければ例外）
///
/// `{ authorName?, clarity, visualAppeal, brandFit, comment }`
#[wasm_bindgen(js_name = "addFeedbackToDesign")]
pub fn add_feedback_to_design(design_id: &str, input: JsValue) -> Result<JsValue, JsError> {
    let input: NewFeedback = from_js(input)?;
    let design = design_store()?
        .add_feedback(design_id, input)
        .map_err(to_js_error)?;
    to_js(&design)
}

/// デザインを削除して残りを返す
#[wasm_bindgen(js_name = "deleteDesign")]
pub fn delete_design(id: &str) -> Result<JsValue, JsError> {
    let designs = design_store()?.delete(id).map_err(to_js_error)?;
    to_js(&designs)
}

#[wasm_bindgen(js_name = "calculateDesignAverage")]
pub fn calculate_design_average(design: JsValue) -> Result<f64, JsError> {
    let design: Design = from_js(design)?;
    Ok(average_of(&design))
}

#[wasm_bindgen(js_name = "calculateFeedbackAverage")]
pub fn calculate_feedback_average(feedback: JsValue) -> Result<f64, JsError> {
    let feedback: DesignFeedback = from_js(feedback)?;
    Ok(average_of_single_feedback(&feedback))
}

/// フィードバックを並び替えたコピー（`newest` / `oldest` / `highest` / `lowest`）
#[wasm_bindgen(js_name = "sortFeedback")]
pub fn sort_feedback_js(feedback: JsValue, order: Option<String>) -> Result<JsValue, JsError> {
    let feedback: Vec<DesignFeedback> = from_js(feedback)?;
    to_js(&sort_feedback(&feedback, parse_order(order)?))
}

/// 一覧の絞り込み
///
/// `{ text, category?, sort }`
#[wasm_bindgen(js_name = "filterDesigns")]
pub fn filter_designs_js(designs: JsValue, query: JsValue) -> Result<JsValue, JsError> {
    let designs: Vec<Design> = from_js(designs)?;
    let query: GalleryQuery = from_js(query)?;
    to_js(&filter_designs(&designs, &query))
}

#[wasm_bindgen(js_name = "categories")]
pub fn categories() -> Result<JsValue, JsError> {
    to_js(&CATEGORIES)
}

// ============================================
// 単独フィードバック
// ============================================

#[wasm_bindgen(js_name = "getAllFeedback")]
pub fn get_all_feedback() -> Result<JsValue, JsError> {
    let items = feedback_store()?.get_all().map_err(to_js_error)?;
    to_js(&items)
}

/// `{ designName, imageUrl, clarity, visualAppeal, brandFit, comment }`
#[wasm_bindgen(js_name = "addFeedback")]
pub fn add_feedback(input: JsValue) -> Result<JsValue, JsError> {
    let input: NewStandaloneFeedback = from_js(input)?;
    let item = feedback_store()?.add(input).map_err(to_js_error)?;
    to_js(&item)
}

#[wasm_bindgen(js_name = "deleteFeedback")]
pub fn delete_feedback(id: &str) -> Result<JsValue, JsError> {
    let items = feedback_store()?.delete(id).map_err(to_js_error)?;
    to_js(&items)
}

#[wasm_bindgen(js_name = "calculateStandaloneAverage")]
pub fn calculate_standalone_average(item: JsValue) -> Result<f64, JsError> {
    let item = from_js(item)?;
    Ok(feedback_average(&item))
}
