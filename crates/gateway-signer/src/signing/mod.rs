mod headers;
mod signer;
mod nonce;
pub mod hmac;
pub mod joinai;

pub use headers::SignedHeaders;
pub use signer::{HeaderSigner, SignContext};
pub use nonce::session_nonce;
pub use self::hmac::HmacSigner;
pub use joinai::JoinAiSigner;
