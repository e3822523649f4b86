//! 保存データ・入力値の寛容な読み込み
//!
//! 古いデータや型の合わない値があっても、コレクション全体を読めなくしない。
//! 読めない値は既定値（空文字・`None`・0）になる。

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 文字列を `parseInt` と同じ規則で整数にする
///
/// 先頭の空白を飛ばし、符号と続く数字だけを読む。数字が無ければ `None`。
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // 桁あふれは上限に寄せる（どのみち1〜5に丸める）
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// JSON値を評価用の整数にする（小数は切り捨て）
pub fn rating_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

/// 保存済みの評価（読めなければ0 = 未評価）
pub fn stored_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(rating_value(&value)
        .map(crate::rating::clamp_rating)
        .unwrap_or_default())
}

/// 入力の評価（整数・小数・数字文字列を受け付ける）
///
/// `null` は未入力として0。数字で始まらない文字列はエラー。
pub fn input_rating<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(0);
    }
    rating_value(&value)
        .ok_or_else(|| D::Error::custom(format!("rating is not a number: {}", value)))
}

/// 文字列項目（数値は文字列化、それ以外は空文字）
///
/// JS経由の数値は常に小数なので、整数値は `1737180000000` の形にそろえる。
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 9.0e15 => {
                (f as i64).to_string()
            }
            _ => n.to_string(),
        },
        _ => String::new(),
    })
}

/// 任意の名前（文字列以外は `None`）
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// 配列項目（配列でなければ空、読めない要素は除外）
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("4"), Some(4));
        assert_eq!(parse_int_prefix("  3 stars"), Some(3));
        assert_eq!(parse_int_prefix("-2"), Some(-2));
        assert_eq!(parse_int_prefix("4.9"), Some(4));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn test_rating_value() {
        assert_eq!(rating_value(&json!(5)), Some(5));
        assert_eq!(rating_value(&json!(3.7)), Some(3));
        assert_eq!(rating_value(&json!("2")), Some(2));
        assert_eq!(rating_value(&json!(null)), None);
        assert_eq!(rating_value(&json!(true)), None);
    }

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "stored_rating")]
        score: u8,
        #[serde(default, deserialize_with = "text")]
        title: String,
        #[serde(default, deserialize_with = "optional_text")]
        name: Option<String>,
    }

    #[test]
    fn test_wrong_types_fall_back() {
        let row: Row = serde_json::from_value(json!({
            "score": null,
            "title": null,
            "name": 42
        }))
        .unwrap();
        assert_eq!(row.score, 0);
        assert_eq!(row.title, "");
        assert_eq!(row.name, None);
    }

    #[test]
    fn test_stored_values_clamped() {
        let row: Row = serde_json::from_value(json!({
            "score": 9,
            "title": 2024,
            "name": "Mika"
        }))
        .unwrap();
        assert_eq!(row.score, 5);
        assert_eq!(row.title, "2024");
        assert_eq!(row.name.as_deref(), Some("Mika"));
    }

    #[test]
    fn test_whole_float_text_as_integer() {
        let row: Row = serde_json::from_value(json!({ "title": 1737180000000.0 })).unwrap();
        assert_eq!(row.title, "1737180000000");

        let row: Row = serde_json::from_value(json!({ "title": 2.5 })).unwrap();
        assert_eq!(row.title, "2.5");
    }
}
