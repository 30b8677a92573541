use crate::{domain::Member, error::AppError, services::auth::SecurityContext, state::AppState};

pub mod favorites;
pub mod health;
pub mod lines;
pub mod login;
pub mod members;
pub mod paths;
pub mod stations;

// context はあるが member が消えている -> 401
pub(crate) async fn current_member(
    state: &AppState,
    ctx: &SecurityContext,
) -> Result<Member, AppError> {
    match state.members.find(ctx.member_id()).await {
        Err(AppError::NotFound { .. }) => {
            tracing::debug!(member_id = ctx.member_id(), "authenticated member no longer exists");
            Err(AppError::Unauthorized)
        }
        other => other,
    }
}
