use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use gateway_signer::signing::session_nonce;
use gateway_signer::{GatewayConfig, HeaderSigner, SignContext};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    #[clap(long, env = "SIGNER_ENV_FILE", default_value = ".env")]
    env_file: PathBuf,
    /// Sign as of this Unix time instead of now.
    #[clap(long, global = true)]
    at: Option<i64>,
    #[clap(subcommand)]
    scheme: Scheme,
}

#[derive(Subcommand)]
enum Scheme {
    /// HMAC-SHA256 headers from APP_ID, APP_SECRET and APP_HOST.
    Hmac,
    /// JoinAI MD5 headers from APP_ID and APP_KEY.
    Joinai {
        #[clap(long)]
        path: Option<String>,
        /// Fixed session nonce instead of a random one.
        #[clap(long)]
        nonce: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = GatewayConfig::from_env_file(&args.env_file)
        .with_context(|| format!("loading {}", args.env_file.display()))?;
    tracing::debug!(?config, "loaded config");

    let now = match args.at {
        Some(seconds) => DateTime::<Utc>::from_timestamp(seconds, 0)
            .with_context(|| format!("timestamp {seconds} out of range"))?,
        None => Utc::now(),
    };

    let (signer, path, nonce) = match args.scheme {
        Scheme::Hmac => (
            Box::new(config.hmac_signer()?) as Box<dyn HeaderSigner>,
            None,
            String::new(),
        ),
        Scheme::Joinai { path, nonce } => (
            Box::new(config.joinai_signer()?) as Box<dyn HeaderSigner>,
            path,
            nonce.unwrap_or_else(session_nonce),
        ),
    };

    let headers = signer
        .sign_at(&SignContext {
            now,
            nonce: &nonce,
            path: path.as_deref(),
        })
        .with_context(|| format!("signing {} headers", signer.scheme()))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&headers).context("rendering headers")?
    );
    Ok(())
}
