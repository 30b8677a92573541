//! Security-context extraction strategies.
//!
//! Each strategy looks at the request headers and either produces a
//! `SecurityContext` or `Ok(None)`. A missing, malformed or wrong credential is
//! always `Ok(None)`; `Err` means the session store or member store failed.

use std::sync::Arc;

use axum::http::{HeaderMap, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::services::auth::{
    AuthError, AuthenticationManager, JwtTokenProvider, SecurityContext,
    context::SECURITY_CONTEXT_KEY,
    session::{SessionStore, session_id_from_headers},
};

#[derive(Clone, Debug)]
pub enum ExtractionStrategy {
    /// `SESSION` cookie → `SECURITY_CONTEXT` session attribute.
    Session(SessionStore),
    /// `Authorization: Basic base64(email:password)`.
    Basic(AuthenticationManager),
    /// `Authorization: Bearer <jwt>`.
    Bearer(Arc<JwtTokenProvider>),
}

impl ExtractionStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Session(_) => "session",
            Self::Basic(_) => "basic",
            Self::Bearer(_) => "bearer",
        }
    }

    pub async fn extract(&self, headers: &HeaderMap) -> Result<Option<SecurityContext>, AuthError> {
        match self {
            Self::Session(sessions) => {
                let Some(session_id) = session_id_from_headers(headers) else {
                    return Ok(None);
                };
                Ok(sessions
                    .get_attribute::<SecurityContext>(&session_id, SECURITY_CONTEXT_KEY)
                    .await?)
            }
            Self::Basic(manager) => {
                let Some((email, password)) =
                    authorization(headers, "Basic").and_then(decode_basic)
                else {
                    return Ok(None);
                };
                match manager.authenticate(&email, &password).await {
                    Ok(ctx) => Ok(Some(ctx)),
                    Err(AuthError::InvalidCredentials | AuthError::UserNotFound) => Ok(None),
                    Err(err) => Err(err),
                }
            }
            Self::Bearer(tokens) => {
                let Some(token) = authorization(headers, "Bearer") else {
                    return Ok(None);
                };
                match tokens.verify(token) {
                    Ok(ctx) => Ok(Some(ctx)),
                    Err(err) => {
                        debug!(error = %err, "bearer token rejected");
                        Ok(None)
                    }
                }
            }
        }
    }
}

/// Runs strategies in order; the first one that yields a context wins.
#[derive(Clone, Debug)]
pub struct SecurityContextExtractor {
    strategies: Vec<ExtractionStrategy>,
}

impl SecurityContextExtractor {
    pub fn new(strategies: Vec<ExtractionStrategy>) -> Self {
        Self { strategies }
    }

    pub async fn extract(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<(SecurityContext, &'static str)>, AuthError> {
        for strategy in &self.strategies {
            if let Some(ctx) = strategy.extract(headers).await? {
                return Ok(Some((ctx, strategy.name())));
            }
        }
        Ok(None)
    }
}

// `Authorization: <scheme> <credentials>` (scheme is case-insensitive)
fn authorization<'a>(headers: &'a HeaderMap, scheme: &str) -> Option<&'a str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (given, credentials) = value.split_once(' ')?;
    if !given.eq_ignore_ascii_case(scheme) {
        return None;
    }
    let credentials = credentials.trim();
    (!credentials.is_empty()).then_some(credentials)
}

fn decode_basic(encoded: &str) -> Option<(String, String)> {
    let decoded = STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;
    Some((email.to_string(), password.to_string()))
}
