//! Server-side sessions on top of the cache layer.
//!
//! A session is a JSON object of named attributes stored under one cache key.
//! The raw session id only ever lives in the client's cookie; the cache key is
//! derived from `sha256(session_id)`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, header};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Serialize, de::DeserializeOwned};
use sha2::{Digest, Sha256};

use crate::services::cache::{CacheClient, CacheError, CacheResult};

pub const SESSION_COOKIE_NAME: &str = "SESSION";

type Attributes = HashMap<String, serde_json::Value>;

#[derive(Clone)]
pub struct SessionStore {
    cache: Arc<dyn CacheClient>,
    // Key prefix to avoid collisions with other users of the same cache
    prefix: String,
    ttl: Duration,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("backend", &self.cache.backend_name())
            .field("prefix", &self.prefix)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionStore {
    pub fn new(cache: Arc<dyn CacheClient>, ttl: Duration) -> Self {
        Self::new_with_prefix(cache, "session", ttl)
    }

    pub fn new_with_prefix(
        cache: Arc<dyn CacheClient>,
        prefix: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn key(&self, session_id: &str) -> String {
        let digest = Sha256::digest(session_id.as_bytes());
        format!("{}:{}", self.prefix, URL_SAFE_NO_PAD.encode(digest))
    }

    async fn load(&self, session_id: &str) -> CacheResult<Option<Attributes>> {
        let Some(raw) = self.cache.get_string(&self.key(session_id)).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(attrs) => Ok(Some(attrs)),
            Err(err) => {
                tracing::warn!(error = %err, "dropping undecodable session");
                Ok(None)
            }
        }
    }

    /// Starts an empty session and returns its id (the cookie value).
    pub async fn create(&self) -> CacheResult<String> {
        let session_id = generate_session_id()?;
        self.cache
            .set_with_ttl(&self.key(&session_id), "{}", self.ttl)
            .await?;
        Ok(session_id)
    }

    /// `Ok(None)` when the session or the attribute is missing, or the stored value
    /// does not decode as `T`.
    pub async fn get_attribute<T: DeserializeOwned>(
        &self,
        session_id: &str,
        name: &str,
    ) -> CacheResult<Option<T>> {
        let Some(mut attrs) = self.load(session_id).await? else {
            return Ok(None);
        };
        let Some(value) = attrs.remove(name) else {
            return Ok(None);
        };

        match serde_json::from_value(value) {
            Ok(v) => Ok(Some(v)),
            Err(err) => {
                tracing::warn!(error = %err, attribute = name, "undecodable session attribute");
                Ok(None)
            }
        }
    }

    /// Writes one attribute and refreshes the session TTL.
    pub async fn set_attribute<T: Serialize>(
        &self,
        session_id: &str,
        name: &str,
        value: &T,
    ) -> CacheResult<()> {
        let mut attrs = self.load(session_id).await?.unwrap_or_default();
        let value =
            serde_json::to_value(value).map_err(|e| CacheError::InvalidValue(e.to_string()))?;
        attrs.insert(name.to_string(), value);

        let raw =
            serde_json::to_string(&attrs).map_err(|e| CacheError::InvalidValue(e.to_string()))?;
        self.cache
            .set_with_ttl(&self.key(session_id), &raw, self.ttl)
            .await
    }

    pub async fn invalidate(&self, session_id: &str) -> CacheResult<bool> {
        Ok(self.cache.del(&self.key(session_id)).await? > 0)
    }
}

fn generate_session_id() -> CacheResult<String> {
    // 32 bytes of entropy -> URL-safe base64 without padding.
    let mut bytes = [0u8; 32];
    getrandom::fill(&mut bytes).map_err(|e| CacheError::BackendCommand(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Reads the session id from the `Cookie` header(s).
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    let prefix = format!("{}=", SESSION_COOKIE_NAME);
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .map(str::trim)
        .find_map(|c| c.strip_prefix(prefix.as_str()))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// `Set-Cookie` value for a live session.
pub fn session_cookie(session_id: &str, max_age: Duration, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE_NAME,
        session_id,
        max_age.as_secs()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
pub fn expired_session_cookie(secure: bool) -> String {
    session_cookie("", Duration::ZERO, secure)
}
