//! Access gate port.
//!
//! Identity is owned by an external provider. The core only needs a yes/no
//! answer for a presented credential before any write or admin read.

/// A verified caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Binary authorization check over bearer credentials.
pub trait AccessGate: Send + Sync {
    /// Verify `credentials` and return the caller, or deny.
    fn authorize(&self, credentials: &str) -> Result<Principal, AuthError>;
}

/// Authorization failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}
