/*
 * Responsibility
 * - member の登録 / 参照 / 更新 / 削除
 * - 入力検証と password の hash 化はここで行う (repo には hash だけ渡す)
 */
use std::sync::Arc;

use tracing::info;

use crate::domain::{Member, NewMember};
use crate::error::AppError;
use crate::repos::{MemberRepo, RepoError};
use crate::services::auth::PasswordEncoder;

#[derive(Clone)]
pub struct MemberService {
    members: Arc<dyn MemberRepo>,
    encoder: PasswordEncoder,
}

impl std::fmt::Debug for MemberService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberService")
            .field("encoder", &self.encoder)
            .finish_non_exhaustive()
    }
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if !email.contains('@') {
        return Err(AppError::bad_request("INVALID_EMAIL", "email must contain '@'"));
    }
    Ok(())
}

fn validate_age(age: i32) -> Result<(), AppError> {
    if age < 0 {
        return Err(AppError::bad_request("INVALID_AGE", "age must not be negative"));
    }
    Ok(())
}

fn duplicate_email(err: RepoError) -> AppError {
    match err {
        RepoError::Conflict => AppError::conflict("DUPLICATE_EMAIL", "email already registered"),
        other => other.into(),
    }
}

impl MemberService {
    pub fn new(members: Arc<dyn MemberRepo>, encoder: PasswordEncoder) -> Self {
        Self { members, encoder }
    }

    pub async fn register(&self, email: &str, password: &str, age: i32) -> Result<Member, AppError> {
        let email = email.trim();
        validate_email(email)?;
        if password.is_empty() {
            return Err(AppError::bad_request(
                "INVALID_PASSWORD",
                "password must not be empty",
            ));
        }
        validate_age(age)?;

        let hash = self.encoder.encode(password).await.map_err(|err| {
            tracing::error!(error = ?err, "password hashing failed");
            AppError::Internal
        })?;

        let member = self
            .members
            .create(NewMember::new(email, hash, age))
            .await
            .map_err(duplicate_email)?;
        info!(member_id = member.id(), "member registered");
        Ok(member)
    }

    pub async fn find(&self, id: i64) -> Result<Member, AppError> {
        self.members
            .find_by_id(id)
            .await?
            .ok_or(AppError::not_found("member"))
    }

    /// Only email and age change; password and roles are fixed after registration.
    pub async fn update(&self, id: i64, email: &str, age: i32) -> Result<Member, AppError> {
        let email = email.trim();
        validate_email(email)?;
        validate_age(age)?;

        let mut member = self.find(id).await?;
        member.update(email, age);
        if !self.members.update(&member).await.map_err(duplicate_email)? {
            return Err(AppError::not_found("member"));
        }
        Ok(member)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.members.delete(id).await? {
            return Err(AppError::not_found("member"));
        }
        info!(member_id = id, "member deleted");
        Ok(())
    }
}
