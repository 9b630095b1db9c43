//! JWT access gate implementation.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use quill_core::ports::{AccessGate, AuthError, Principal};

/// JWT access gate configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 secret shared with the identity provider.
    pub secret: String,
    /// Required `iss` claim, when set.
    pub issuer: Option<String>,
    /// Required `aud` claim, when set.
    pub audience: Option<String>,
    /// Required `role` claim, when set.
    pub admin_role: Option<String>,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: None,
            audience: None,
            admin_role: None,
        }
    }
}

/// Claims read from an identity provider token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub exp: i64,
}

/// Verifies bearer tokens signed by the identity provider.
///
/// Tokens are never issued here.
pub struct JwtAccessGate {
    decoding_key: DecodingKey,
    validation: Validation,
    admin_role: Option<String>,
}

impl JwtAccessGate {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            admin_role: config.admin_role,
        }
    }
}

impl AccessGate for JwtAccessGate {
    fn authorize(&self, credentials: &str) -> Result<Principal, AuthError> {
        if credentials.trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let token_data = decode::<Claims>(credentials, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;
        let claims = token_data.claims;

        let required = self.admin_role.as_deref();
        if required.is_some() && claims.role.as_deref() != required {
            tracing::debug!(subject = %claims.sub, "Token lacks the admin role");
            return Err(AuthError::InsufficientPermissions);
        }

        Ok(Principal {
            subject: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}
