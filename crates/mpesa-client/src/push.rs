//! Lipa Na M-Pesa Online (STK push) password derivation.
//!
//! `Timestamp` is the current East Africa Time as `YYYYMMDDHHmmss` and
//! `Password` is `base64(BusinessShortCode + passkey + Timestamp)`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use zeroize::Zeroizing;

use crate::credentials::Secret;

/// Source of the current instant. Replaced in tests to pin the timestamp.
pub type Clock = fn() -> DateTime<Utc>;

/// The wall clock.
pub fn system_clock() -> DateTime<Utc> {
    Utc::now()
}

/// EAT is UTC+3 year round.
const EAT_OFFSET_HOURS: i64 = 3;

/// `at` in East Africa Time, formatted `YYYYMMDDHHmmss` on a 24-hour clock.
pub fn push_timestamp(at: DateTime<Utc>) -> String {
    let local = at + Duration::hours(EAT_OFFSET_HOURS);
    format!("20{}", local.format("%y%m%d%H%M%S"))
}

/// `base64(short_code + passkey + timestamp)`.
pub fn push_password(short_code: &str, passkey: &Secret, timestamp: &str) -> Secret {
    let mut raw = Zeroizing::new(String::with_capacity(
        short_code.len() + passkey.expose().len() + timestamp.len(),
    ));
    raw.push_str(short_code);
    raw.push_str(passkey.expose());
    raw.push_str(timestamp);
    Secret::new(STANDARD.encode(raw.as_bytes()))
}
