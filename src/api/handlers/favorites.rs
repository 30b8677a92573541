/*
 * Responsibility
 * - /favorites の handler (全て認証必須)
 * - 経路検証と所有者チェックは FavoriteService
 * - token / session が member より長生きした場合は 401
 */
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    api::{
        dto::favorites::{FavoriteRequest, FavoriteResponse},
        extractors::AuthMember,
    },
    error::AppError,
    state::AppState,
};

use super::current_member;

pub async fn create_favorite(
    State(state): State<AppState>,
    AuthMember(ctx): AuthMember,
    Json(req): Json<FavoriteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let member = current_member(&state, &ctx).await?;
    let favorite = state
        .favorites
        .create(member.id(), req.source, req.target)
        .await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/favorites/{}", favorite.id))],
        Json(FavoriteResponse::from(&favorite)),
    ))
}

pub async fn list_favorites(
    State(state): State<AppState>,
    AuthMember(ctx): AuthMember,
) -> Result<Json<Vec<FavoriteResponse>>, AppError> {
    let member = current_member(&state, &ctx).await?;
    let favorites = state.favorites.list(member.id()).await?;
    Ok(Json(favorites.iter().map(FavoriteResponse::from).collect()))
}

pub async fn delete_favorite(
    State(state): State<AppState>,
    AuthMember(ctx): AuthMember,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let member = current_member(&state, &ctx).await?;
    state.favorites.delete(member.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
