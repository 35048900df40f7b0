use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::headers::SignedHeaders;
use super::signer::{HeaderSigner, SignContext};
use crate::encoding::{base64_json, md5_hex, unix_seconds};
use crate::error::SigningError;

pub const ALGORITHM: &str = "joinai-md5";

/// Minimum width of a capability name; shorter app names are right-padded with `'0'`.
pub const CAPABILITY_NAME_WIDTH: usize = 24;

pub const DEFAULT_APP_NAME: &str = "default";

/// Extracts the application name from an API path.
///
/// `None` and `""` yield [`DEFAULT_APP_NAME`]. Otherwise the path must start
/// with `/` and carry a non-empty first segment: `/chat/foo` yields `chat`.
pub fn app_name(path: Option<&str>) -> Result<&str, SigningError> {
    let path = match path {
        None | Some("") => return Ok(DEFAULT_APP_NAME),
        Some(path) => path,
    };

    let Some(rest) = path.strip_prefix('/') else {
        return Err(SigningError::InvalidPath {
            path: path.to_string(),
            reason: "must start with '/'",
        });
    };

    match rest.split('/').next() {
        Some(segment) if !segment.is_empty() => Ok(segment),
        _ => Err(SigningError::InvalidPath {
            path: path.to_string(),
            reason: "missing application segment after leading '/'",
        }),
    }
}

/// Right-pads `app_name` with `'0'` to [`CAPABILITY_NAME_WIDTH`] characters.
/// Longer names pass through untruncated.
pub fn capability_name(app_name: &str) -> String {
    let missing = CAPABILITY_NAME_WIDTH.saturating_sub(app_name.chars().count());
    let mut name = String::with_capacity(app_name.len() + missing);
    name.push_str(app_name);
    name.extend(std::iter::repeat_n('0', missing));
    name
}

/// Field order is part of the wire format.
#[derive(Serialize)]
struct ServerParam<'a> {
    appid: &'a str,
    csid: &'a str,
}

/// Builds the JoinAI gateway headers: `X-Server-Param`, `X-CurTime`,
/// `X-CheckSum`, `Content-Type`.
///
/// `X-CheckSum` is `md5(app_key + cur_time + server_param)` in lowercase hex.
pub fn sign_headers(
    app_id: &str,
    app_key: &str,
    path: Option<&str>,
    now: DateTime<Utc>,
    nonce: &str,
) -> Result<SignedHeaders, SigningError> {
    let capability = capability_name(app_name(path)?);
    let csid = format!("{app_id}{capability}{nonce}");

    let server_param = base64_json(&ServerParam {
        appid: app_id,
        csid: &csid,
    })?;
    let cur_time = unix_seconds(now);
    let checksum = md5_hex(&[app_key, &cur_time, &server_param]);

    let mut headers = SignedHeaders::new();
    headers.insert("X-Server-Param", server_param);
    headers.insert("X-CurTime", cur_time);
    headers.insert("X-CheckSum", checksum);
    headers.insert("Content-Type", "application/json");
    Ok(headers)
}

/// JoinAI signer bound to one app credential.
#[derive(Clone)]
pub struct JoinAiSigner {
    app_id: String,
    app_key: String,
    default_path: Option<String>,
}

impl JoinAiSigner {
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
            default_path: None,
        }
    }

    /// Path used when a request does not name one.
    pub fn with_default_path(mut self, path: Option<String>) -> Self {
        self.default_path = path;
        self
    }
}

impl fmt::Debug for JoinAiSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinAiSigner")
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .field("default_path", &self.default_path)
            .finish()
    }
}

impl HeaderSigner for JoinAiSigner {
    fn sign_at(&self, context: &SignContext<'_>) -> Result<SignedHeaders, SigningError> {
        let path = context.path.or(self.default_path.as_deref());
        let headers = sign_headers(&self.app_id, &self.app_key, path, context.now, context.nonce)?;
        tracing::debug!(
            scheme = ALGORITHM,
            app_id = %self.app_id,
            path = ?path,
            cur_time = ?headers.get("X-CurTime"),
            "signed gateway headers"
        );
        Ok(headers)
    }

    fn scheme(&self) -> &str {
        ALGORITHM
    }
}
