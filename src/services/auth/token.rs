use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::{error::Error as StdError, fmt};
use uuid::Uuid;

use crate::services::auth::{AuthError, SecurityContext};

// Errors returned by access-token verification.
#[derive(Debug)]
pub enum TokenError {
    Jwt(jsonwebtoken::errors::Error),
    EmptyClaim(&'static str),
    InvalidSub,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
            Self::InvalidSub => write!(f, "invalid 'sub' (expected member id)"),
        }
    }
}

impl StdError for TokenError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// Access token (JWT) claims.
///
/// - `sub` is the member id
/// - `email` / `roles` let the bearer strategy build a context without a store lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccessTokenClaims {
    iss: String,
    sub: String,
    iat: i64,
    exp: i64,
    jti: String,
    email: String,
    #[serde(default)]
    roles: Vec<String>,
}

/// What `/login/token` hands back.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: u64,
}

/// HS256 access-token issuer and verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtTokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl_seconds: u64,
}

impl fmt::Debug for JwtTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("JwtTokenProvider")
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtTokenProvider {
    pub fn new(secret: &str, issuer: &str, ttl_seconds: u64, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.leeway = leeway_seconds;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer: issuer.to_string(),
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    pub fn issue(&self, ctx: &SecurityContext) -> Result<IssuedToken, AuthError> {
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            iss: self.issuer.clone(),
            sub: ctx.member_id().to_string(),
            iat: now,
            exp: now + self.ttl_seconds as i64,
            jti: Uuid::new_v4().to_string(),
            email: ctx.principal().to_string(),
            roles: ctx.authorities().to_vec(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        let access_token = jsonwebtoken::encode(&header, &claims, &self.encoding_key)?;

        Ok(IssuedToken {
            access_token,
            expires_in: self.ttl_seconds,
        })
    }

    /// Signature, `iss` and `exp` are checked by `jsonwebtoken`; `sub` and `email`
    /// are checked here.
    pub fn verify(&self, token: &str) -> Result<SecurityContext, TokenError> {
        let claims =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?
                .claims;

        if claims.email.trim().is_empty() {
            return Err(TokenError::EmptyClaim("email"));
        }
        let member_id: i64 = claims.sub.parse().map_err(|_| TokenError::InvalidSub)?;

        Ok(SecurityContext::new(member_id, claims.email, claims.roles))
    }
}
