use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::SecurityContext;

/// The caller's `SecurityContext`, as inserted by the security-context middleware.
///
/// Rejects with 401 when no context is present (anonymous request, or the route
/// is not behind the middleware).
#[derive(Debug, Clone)]
pub struct AuthMember(pub SecurityContext);

impl<S> FromRequestParts<S> for AuthMember
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SecurityContext>()
            .cloned()
            .map(AuthMember)
            .ok_or(AppError::Unauthorized)
    }
}

/// `Some` only when a strategy authenticated the request.
#[derive(Debug, Clone)]
pub struct OptionalAuthMember(pub Option<SecurityContext>);

impl<S> FromRequestParts<S> for OptionalAuthMember
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthMember(
            parts.extensions.get::<SecurityContext>().cloned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    fn parts(ctx: Option<SecurityContext>) -> Parts {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        if let Some(ctx) = ctx {
            parts.extensions.insert(ctx);
        }
        parts
    }

    fn ctx() -> SecurityContext {
        SecurityContext::new(7, "a@b.c", vec!["ROLE_MEMBER".into()])
    }

    #[tokio::test]
    async fn auth_member_reads_the_context() {
        let mut p = parts(Some(ctx()));
        let AuthMember(found) = <AuthMember as FromRequestParts<()>>::from_request_parts(&mut p, &())
            .await
            .unwrap();
        assert_eq!(found.member_id(), 7);
    }

    #[tokio::test]
    async fn auth_member_without_context_is_401() {
        let mut p = parts(None);
        let err = <AuthMember as FromRequestParts<()>>::from_request_parts(&mut p, &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn optional_member_allows_anonymous() {
        let mut p = parts(None);
        let OptionalAuthMember(found) = OptionalAuthMember::from_request_parts(&mut p, &())
            .await
            .unwrap();
        assert!(found.is_none());

        let mut p = parts(Some(ctx()));
        let OptionalAuthMember(found) = OptionalAuthMember::from_request_parts(&mut p, &())
            .await
            .unwrap();
        assert_eq!(found, Some(ctx()));
    }
}
