use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::error::ConfigError;
use crate::signing::{HmacSigner, JoinAiSigner};

pub const API_URL: &str = "LANGGRAPH_API_URL";
pub const API_KEY: &str = "LANGGRAPH_API_KEY";
pub const ASSISTANT_ID: &str = "LANGGRAPH_ASSISTANT_ID";
pub const APP_ID: &str = "APP_ID";
pub const APP_SECRET: &str = "APP_SECRET";
pub const APP_HOST: &str = "APP_HOST";
pub const APP_KEY: &str = "APP_KEY";
pub const APP_PATH: &str = "APP_PATH";

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:2024";

const SECRET_KEYS: [&str; 3] = [API_KEY, APP_SECRET, APP_KEY];

/// Key/value pairs read once from a dotenv file.
///
/// Passed explicitly to whoever builds signers; nothing here reads the
/// process environment.
#[derive(Clone, Default)]
pub struct GatewayConfig {
    values: BTreeMap<String, String>,
}

impl GatewayConfig {
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let read_error = |source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        };

        let mut values = BTreeMap::new();
        for item in dotenvy::from_path_iter(path).map_err(read_error)? {
            let (key, value) = item.map_err(read_error)?;
            values.insert(key, value);
        }
        tracing::debug!(path = %path.display(), keys = values.len(), "loaded gateway config");
        Ok(Self { values })
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn require(&self, key: &'static str) -> Result<&str, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }

    pub fn api_url(&self) -> &str {
        self.get(API_URL).unwrap_or(DEFAULT_API_URL)
    }

    pub fn assistant_id(&self) -> Option<&str> {
        self.get(ASSISTANT_ID)
    }

    pub fn hmac_signer(&self) -> Result<HmacSigner, ConfigError> {
        Ok(HmacSigner::new(
            self.require(APP_HOST)?,
            self.require(APP_ID)?,
            self.require(APP_SECRET)?,
        ))
    }

    pub fn joinai_signer(&self) -> Result<JoinAiSigner, ConfigError> {
        let signer = JoinAiSigner::new(self.require(APP_ID)?, self.require(APP_KEY)?)
            .with_default_path(self.get(APP_PATH).map(str::to_owned));
        Ok(signer)
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.values {
            if SECRET_KEYS.contains(&key.as_str()) {
                map.entry(key, &"<redacted>");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}
