//! Token issuing and validation.
//!
//! Both tokens are HS256-signed JWTs carrying the full [`UserProfile`], so a
//! request can be resolved to a user without any server-side session.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use mosstroi_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The user a token was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
}

impl UserProfile {
    /// Profile for an email address. The id is derived from the normalized
    /// email, so logging in twice yields the same user.
    pub fn for_email(email: &str, name: Option<String>, phone: Option<String>) -> Self {
        let email = email.trim().to_lowercase();
        let id = Uuid::new_v5(&Uuid::NAMESPACE_URL, format!("mailto:{email}").as_bytes());
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());
        Self {
            id,
            email,
            name,
            phone,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims embedded in every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's id.
    pub sub: DbId,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub kind: TokenKind,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier.
    pub jti: String,
}

impl Claims {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.sub,
            email: self.email.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 30).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 30;
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;
const DEV_SECRET: &str = "mosstroi-dev-secret-change-me";

impl JwtConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var                    | Default              |
    /// |----------------------------|----------------------|
    /// | `JWT_SECRET`               | development secret   |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | `30`                 |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | `7`                  |
    ///
    /// # Panics
    ///
    /// Panics if an expiry is not a valid integer.
    pub fn from_env() -> Self {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET is not set, using the development secret");
                DEV_SECRET.to_string()
            }
        };

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let refresh_token_expiry_days: i64 = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_DAYS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
            refresh_token_expiry_days,
        }
    }
}

/// An access/refresh token pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

fn generate_token(
    user: &UserProfile,
    kind: TokenKind,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let lifetime = match kind {
        TokenKind::Access => config.access_token_expiry_mins * 60,
        TokenKind::Refresh => config.refresh_token_expiry_days * 24 * 60 * 60,
    };

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        phone: user.phone.clone(),
        kind,
        exp: now + lifetime,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Issue a fresh access/refresh pair for `user`.
pub fn generate_token_pair(
    user: &UserProfile,
    config: &JwtConfig,
) -> Result<TokenPair, jsonwebtoken::errors::Error> {
    Ok(TokenPair {
        access_token: generate_token(user, TokenKind::Access, config)?,
        refresh_token: generate_token(user, TokenKind::Refresh, config)?,
    })
}

/// Validate a token of the expected kind and return its claims.
///
/// Signature and expiration are checked by `jsonwebtoken`; a refresh token
/// presented as an access token (or vice versa) is rejected.
pub fn validate_token(
    token: &str,
    expected: TokenKind,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?
    .claims;
    if claims.kind != expected {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 30,
            refresh_token_expiry_days: 7,
        }
    }

    #[test]
    fn same_email_yields_same_user_id() {
        let a = UserProfile::for_email("Ivan@Example.com", None, None);
        let b = UserProfile::for_email(" ivan@example.com ", Some("Ivan".into()), None);
        assert_eq!(a.id, b.id);
        assert_eq!(a.email, "ivan@example.com");
        assert_eq!(a.name, "ivan");
        assert_eq!(b.name, "Ivan");
    }

    #[test]
    fn access_token_round_trips_profile() {
        let config = test_config();
        let user = UserProfile::for_email("anna@example.com", Some("Anna".into()), Some("+7 900".into()));
        let pair = generate_token_pair(&user, &config).unwrap();

        let claims = validate_token(&pair.access_token, TokenKind::Access, &config).unwrap();
        assert_eq!(claims.profile(), user);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_kinds_are_not_interchangeable() {
        let config = test_config();
        let user = UserProfile::for_email("a@b.c", None, None);
        let pair = generate_token_pair(&user, &config).unwrap();

        assert!(validate_token(&pair.refresh_token, TokenKind::Access, &config).is_err());
        assert!(validate_token(&pair.access_token, TokenKind::Refresh, &config).is_err());
        assert!(validate_token(&pair.refresh_token, TokenKind::Refresh, &config).is_ok());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let user = UserProfile::for_email("a@b.c", None, None);
        let pair = generate_token_pair(&user, &test_config()).unwrap();
        let other = JwtConfig {
            secret: "another-secret".to_string(),
            ..test_config()
        };
        assert_matches!(
            validate_token(&pair.access_token, TokenKind::Access, &other),
            Err(_)
        );
    }
}
