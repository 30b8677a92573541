//! SecurityContext interceptor.
//!
//! Runs the configured strategies (session -> basic -> bearer) once per request and
//! inserts the resulting `SecurityContext` into the request extensions, where the
//! `AuthMember` / `OptionalAuthMember` extractors pick it up.
//!
//! ```ignore
//! let me = middleware::auth::apply(me_routes, state.clone(), AuthPolicy::Required);
//! ```

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// What to do when no strategy yields a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Reject with 401.
    Required,
    /// Continue without a context.
    Optional,
}

pub fn apply(router: Router<AppState>, state: AppState, policy: AuthPolicy) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(
        (state, policy),
        security_context_middleware,
    ))
}

async fn security_context_middleware(
    State((state, policy)): State<(AppState, AuthPolicy)>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let extracted = state.security.extract(req.headers()).await?;

    match extracted {
        Some((ctx, strategy)) => {
            debug!(member_id = ctx.member_id(), strategy, "security context established");
            req.extensions_mut().insert(ctx);
        }
        None if policy == AuthPolicy::Required => {
            debug!(path = %req.uri().path(), "no credentials for protected route");
            return Err(AppError::Unauthorized);
        }
        None => {}
    }

    Ok(next.run(req).await)
}
