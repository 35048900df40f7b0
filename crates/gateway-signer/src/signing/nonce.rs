use uuid::Uuid;

/// A fresh unique token for JoinAI session ids.
pub fn session_nonce() -> String {
    Uuid::new_v4().to_string()
}
