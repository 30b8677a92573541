/*
 * Responsibility
 * - 1 リクエスト分の「認証済み主体」(SecurityContext)
 * - strategy が作り、middleware が request extensions に載せ、handler は読むだけ
 * - session strategy 用に JSON で保存できる
 */
use serde::{Deserialize, Serialize};

/// Session attribute name under which form login stores the context.
pub const SECURITY_CONTEXT_KEY: &str = "SECURITY_CONTEXT";

/// Authenticated identity for the lifetime of one request.
///
/// Fields are private: once built, a context cannot be changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityContext {
    member_id: i64,
    principal: String,
    authorities: Vec<String>,
}

impl SecurityContext {
    pub fn new(member_id: i64, principal: impl Into<String>, authorities: Vec<String>) -> Self {
        Self {
            member_id,
            principal: principal.into(),
            authorities,
        }
    }

    pub fn member_id(&self) -> i64 {
        self.member_id
    }

    /// The member's email.
    pub fn principal(&self) -> &str {
        &self.principal
    }

    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }
}
