//! JWT access-token validation.
//!
//! Admin tokens are HS256-signed JWTs containing a [`Claims`] payload. They
//! are issued by the external auth service; this server only verifies them
//! and never mints tokens of its own.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the admin's identifier in the auth service.
    pub sub: String,
    /// The user's role name (e.g. `"admin"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Unique token identifier, when the issuer sets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// Configuration for JWT token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the auth service.
    pub secret: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var      | Required | Default |
    /// |--------------|----------|---------|
    /// | `JWT_SECRET` | **yes**  | --      |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self { secret }
    }
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: SECRET.to_string(),
        }
    }

    /// Sign claims the way the auth service does.
    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    fn claims_expiring_in(secs: i64) -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: "admin-7".to_string(),
            role: "admin".to_string(),
            exp: now + secs,
            iat: now,
            email: Some("a@b.test".to_string()),
            jti: None,
        }
    }

    #[test]
    fn test_validate_issued_token() {
        let token = sign(&claims_expiring_in(900), SECRET);

        let claims =
            validate_token(&token, &test_config()).expect("token validation should succeed");
        assert_eq!(claims.sub, "admin-7");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.email.as_deref(), Some("a@b.test"));
        assert!(claims.jti.is_none());
    }

    #[test]
    fn test_expired_token_fails() {
        // Well beyond the default 60-second leeway.
        let token = sign(&claims_expiring_in(-300), SECRET);
        assert!(validate_token(&token, &test_config()).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let token = sign(&claims_expiring_in(900), "secret-alpha");
        assert!(
            validate_token(&token, &test_config()).is_err(),
            "token signed with a different secret must fail"
        );
    }
}
