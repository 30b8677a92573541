/*
 * Responsibility
 * - Member → 認証側の identity (UserDetails) への変換
 * - email で引けない場合は AuthError::UserNotFound (上位で 401 に寄せる)
 */
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::LoginMember;
use crate::repos::MemberRepo;
use crate::services::auth::{AuthError, PasswordEncoder, SecurityContext};

/// Authentication-facing view of a member.
#[derive(Debug, Clone)]
pub struct UserDetails {
    member_id: i64,
    principal: String,
    password_hash: String,
    authorities: Vec<String>,
}

impl UserDetails {
    pub fn principal(&self) -> &str {
        &self.principal
    }

    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }

    pub async fn check_password(
        &self,
        encoder: &PasswordEncoder,
        raw: &str,
    ) -> Result<bool, AuthError> {
        Ok(encoder.matches(raw, &self.password_hash).await?)
    }

    pub fn to_security_context(&self) -> SecurityContext {
        SecurityContext::new(
            self.member_id,
            self.principal.clone(),
            self.authorities.clone(),
        )
    }
}

impl From<LoginMember> for UserDetails {
    fn from(m: LoginMember) -> Self {
        Self {
            member_id: m.id,
            principal: m.email,
            password_hash: m.password_hash,
            authorities: m.roles,
        }
    }
}

#[async_trait]
pub trait UserDetailsService: Send + Sync {
    async fn load_user_by_username(&self, username: &str) -> Result<UserDetails, AuthError>;
}

/// `UserDetailsService` over the member store; the username is the email.
#[derive(Clone)]
pub struct LoginMemberService {
    members: Arc<dyn MemberRepo>,
}

impl LoginMemberService {
    pub fn new(members: Arc<dyn MemberRepo>) -> Self {
        Self { members }
    }
}

#[async_trait]
impl UserDetailsService for LoginMemberService {
    async fn load_user_by_username(&self, email: &str) -> Result<UserDetails, AuthError> {
        let member = self
            .members
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(member.to_login_member().into())
    }
}
