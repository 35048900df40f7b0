use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use gateway_signer::{AppState, ConfigError, GatewayConfig, HeaderSigner, run};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
struct Args {
    #[clap(long, env = "SIGNER_HOST", default_value = "127.0.0.1")]
    host: String,
    #[clap(long, env = "SIGNER_PORT", default_value = "3000")]
    port: u16,
    /// Dotenv file holding the gateway credentials.
    #[clap(long, env = "SIGNER_ENV_FILE", default_value = ".env")]
    env_file: PathBuf,
    #[clap(long, env = "SIGNER_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("gateway_signer={},info", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env_file(&args.env_file)
        .with_context(|| format!("loading {}", args.env_file.display()))?;

    let state = AppState {
        hmac: optional_signer("hmac-sha256", config.hmac_signer())?,
        joinai: optional_signer("joinai-md5", config.joinai_signer())?,
    };
    if state.hmac.is_none() && state.joinai.is_none() {
        anyhow::bail!(
            "no signing scheme configured in {}; set APP_ID with APP_SECRET and APP_HOST, or APP_KEY",
            args.env_file.display()
        );
    }

    tracing::info!(graph_api = config.api_url(), "graph service the issued headers target");
    run(args.host, args.port, state).await
}

/// A scheme with a missing key is left disabled rather than failing startup.
fn optional_signer<S>(
    scheme: &str,
    signer: Result<S, ConfigError>,
) -> Result<Option<Arc<dyn HeaderSigner>>>
where
    S: HeaderSigner + 'static,
{
    match signer {
        Ok(signer) => {
            tracing::info!(scheme, "signing scheme enabled");
            Ok(Some(Arc::new(signer)))
        }
        Err(ConfigError::Missing(key)) => {
            tracing::warn!(scheme, missing = key, "signing scheme disabled");
            Ok(None)
        }
        Err(other) => Err(other.into()),
    }
}
