pub mod config;
pub mod encoding;
pub mod error;
pub mod server;
pub mod signing;

pub use config::GatewayConfig;
pub use error::{ConfigError, ServerError, SigningError};
pub use server::{AppState, router, run};
pub use signing::{HeaderSigner, HmacSigner, JoinAiSigner, SignContext, SignedHeaders};
