use chrono::{SecondsFormat, Utc};
use rand::Rng;

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current time in the canonical offer-window form (`...T..:..:..sssZ`)
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn four_digits() -> u32 {
    rand::thread_rng().gen_range(0..10_000)
}

/// Human-facing order token: `TKN` + HHMMSS (UTC) + 4 random digits.
///
/// Not unique by construction; callers retry on a unique-index collision.
pub fn token_number() -> String {
    format!("TKN{}{:04}", Utc::now().format("%H%M%S"), four_digits())
}

/// Payment transaction id: `TXN` + epoch millis + 4 random digits
pub fn transaction_id() -> String {
    format!("TXN{}{:04}", now_millis(), four_digits())
}
