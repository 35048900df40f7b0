use chrono::{DateTime, Utc};

use super::headers::SignedHeaders;
use super::nonce::session_nonce;
use crate::error::SigningError;

/// Per-call inputs that are not credentials.
#[derive(Debug, Clone, Copy)]
pub struct SignContext<'a> {
    pub now: DateTime<Utc>,
    /// Unique token folded into JoinAI session ids. Ignored by HMAC.
    pub nonce: &'a str,
    /// API path the JoinAI capability name is derived from. Ignored by HMAC.
    pub path: Option<&'a str>,
}

/// Trait for producing authenticated gateway headers from stored credentials.
///
/// Implementations are sync and pure given a [`SignContext`]; only
/// [`HeaderSigner::sign_now`] touches the clock and the nonce source.
pub trait HeaderSigner: Send + Sync {
    /// Build the header set for an explicit time, nonce and path.
    fn sign_at(&self, context: &SignContext<'_>) -> Result<SignedHeaders, SigningError>;

    /// Scheme identifier string (e.g. "hmac-sha256").
    fn scheme(&self) -> &str;

    /// Build the header set for the current wall-clock time and a fresh nonce.
    fn sign_now(&self, path: Option<&str>) -> Result<SignedHeaders, SigningError> {
        let nonce = session_nonce();
        self.sign_at(&SignContext {
            now: Utc::now(),
            nonce: &nonce,
            path,
        })
    }
}
