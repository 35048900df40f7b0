use std::fmt;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::headers::SignedHeaders;
use super::signer::{HeaderSigner, SignContext};
use crate::encoding::{base64_encode, rfc1123_date};
use crate::error::SigningError;

type HmacSha256 = Hmac<Sha256>;

pub const ALGORITHM: &str = "hmac-sha256";

/// Builds the HMAC gateway headers: `authorization`, `date`, `host`, `appId`.
///
/// The signature covers `"host: {host}\ndate: {date}\n"` keyed with
/// `app_secret`. An empty secret is a valid zero-length key.
pub fn sign_headers(
    host: &str,
    app_id: &str,
    app_secret: &str,
    now: DateTime<Utc>,
) -> Result<SignedHeaders, SigningError> {
    let date = rfc1123_date(now);
    let signature_origin = format!("host: {host}\ndate: {date}\n");

    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .map_err(|e| SigningError::InvalidKey(e.to_string()))?;
    mac.update(signature_origin.as_bytes());
    let signature = base64_encode(mac.finalize().into_bytes());

    let authorization = format!(
        "hmac api_key={app_id}, algorithm={ALGORITHM}, headers=host date request-line, signature={signature}"
    );

    let mut headers = SignedHeaders::new();
    headers.insert("authorization", authorization);
    headers.insert("date", date);
    headers.insert("host", host);
    headers.insert("appId", app_id);
    Ok(headers)
}

/// HMAC-SHA256 signer bound to one gateway host and app credential.
#[derive(Clone)]
pub struct HmacSigner {
    host: String,
    app_id: String,
    app_secret: String,
}

impl HmacSigner {
    pub fn new(
        host: impl Into<String>,
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            app_id: app_id.into(),
            app_secret: app_secret.into(),
        }
    }
}

impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSigner")
            .field("host", &self.host)
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

impl HeaderSigner for HmacSigner {
    fn sign_at(&self, context: &SignContext<'_>) -> Result<SignedHeaders, SigningError> {
        let headers = sign_headers(&self.host, &self.app_id, &self.app_secret, context.now)?;
        tracing::debug!(
            scheme = ALGORITHM,
            host = %self.host,
            app_id = %self.app_id,
            "signed gateway headers"
        );
        Ok(headers)
    }

    fn scheme(&self) -> &str {
        ALGORITHM
    }
}
