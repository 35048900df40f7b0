use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::Serialize;

/// Renders a timestamp as an RFC 1123 HTTP date, e.g. `Mon, 01 Jan 2024 00:00:00 GMT`.
pub fn rfc1123_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Whole seconds since the Unix epoch, rounded toward negative infinity.
pub fn unix_seconds(now: DateTime<Utc>) -> String {
    now.timestamp().to_string()
}

/// Standard-alphabet, padded Base64.
pub fn base64_encode(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}

/// Serializes `value` as compact JSON and Base64-encodes the UTF-8 bytes.
pub fn base64_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(base64_encode(json))
}

/// Lowercase hex MD5 over the concatenation of `parts`.
pub fn md5_hex(parts: &[&str]) -> String {
    let mut hasher = Md5::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}
