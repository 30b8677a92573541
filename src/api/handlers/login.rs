/*
 * Responsibility
 * - POST /login/token: email/password -> access token (Bearer)
 * - POST /login/form: email/password -> session (SESSION cookie)
 * - POST /logout: session 破棄 + cookie 失効
 */
use axum::{
    Form, Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use tracing::info;

use crate::{
    api::{
        dto::login::{LoginRequest, TokenResponse},
        extractors::OptionalAuthMember,
    },
    error::AppError,
    services::auth::{
        SECURITY_CONTEXT_KEY,
        session::{expired_session_cookie, session_cookie, session_id_from_headers},
    },
    state::AppState,
};

pub async fn login_token(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let ctx = state
        .authenticator
        .authenticate(&req.email, &req.password)
        .await?;
    let issued = state.tokens.issue(&ctx)?;

    info!(member_id = ctx.member_id(), "access token issued");
    Ok(Json(issued.into()))
}

pub async fn login_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(req): Form<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = state
        .authenticator
        .authenticate(&req.email, &req.password)
        .await?;

    // 既存 session は使い回さない (fixation 対策)
    if let Some(old) = session_id_from_headers(&headers) {
        state.sessions.invalidate(&old).await?;
    }

    let session_id = state.sessions.create().await?;
    state
        .sessions
        .set_attribute(&session_id, SECURITY_CONTEXT_KEY, &ctx)
        .await?;

    info!(member_id = ctx.member_id(), "session login");
    let cookie = session_cookie(
        &session_id,
        state.sessions.ttl(),
        state.session_cookie_secure,
    );
    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)]))
}

pub async fn logout(
    State(state): State<AppState>,
    OptionalAuthMember(ctx): OptionalAuthMember,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    if let Some(session_id) = session_id_from_headers(&headers) {
        state.sessions.invalidate(&session_id).await?;
    }
    if let Some(ctx) = ctx {
        info!(member_id = ctx.member_id(), "logout");
    }

    Ok((
        StatusCode::NO_CONTENT,
        [(
            header::SET_COOKIE,
            expired_session_cookie(state.session_cookie_secure),
        )],
    ))
}
