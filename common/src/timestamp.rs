//! タイムスタンプ
//!
//! ミリ秒精度のISO-8601（`2026-01-18T09:30:00.000Z`）で保存する。
//! 読み込みはエポックミリ秒も受け付け、読めない値はエポックにする。

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// 現在時刻（ミリ秒に切り詰め）
///
/// 保存→再読込で同じ値になるよう、保存形式と同じ精度にそろえる。
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// ISO-8601文字列に変換
pub fn to_iso(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_iso(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    };
    Ok(parsed.unwrap_or_else(|| {
        tracing::warn!(value = %value, "unreadable timestamp, using epoch");
        DateTime::default()
    }))
}
