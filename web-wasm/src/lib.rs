//! Design Feedback Web (localStorage + WASM)
//!
//! ページ側（JS）から呼ぶ保存・集計APIを公開する。

pub mod bindings;
pub mod local_store;

pub use local_store::LocalStorageStore;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
}
