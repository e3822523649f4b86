//! ID生成

use uuid::Uuid;

/// ランダムな一意ID（UUID v4）
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
