/*
 * Responsibility
 * - /members, /members/{id}, /members/me の handler
 * - /members/me は AuthMember (middleware が載せた SecurityContext) の member id を使う
 */
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    api::{
        dto::members::{CreateMemberRequest, MemberResponse, UpdateMemberRequest},
        extractors::AuthMember,
    },
    error::AppError,
    state::AppState,
};

use super::current_member;

pub async fn create_member(
    State(state): State<AppState>,
    Json(req): Json<CreateMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let member = state
        .members
        .register(&req.email, &req.password, req.age)
        .await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/members/{}", member.id()))],
        Json(MemberResponse::from(&member)),
    ))
}

pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MemberResponse>, AppError> {
    let member = state.members.find(id).await?;
    Ok(Json(MemberResponse::from(&member)))
}

pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateMemberRequest>,
) -> Result<Json<MemberResponse>, AppError> {
    let member = state.members.update(id, &req.email, req.age).await?;
    Ok(Json(MemberResponse::from(&member)))
}

pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.members.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_me(
    State(state): State<AppState>,
    AuthMember(ctx): AuthMember,
) -> Result<Json<MemberResponse>, AppError> {
    let member = current_member(&state, &ctx).await?;
    Ok(Json(MemberResponse::from(&member)))
}

pub async fn update_me(
    State(state): State<AppState>,
    AuthMember(ctx): AuthMember,
    Json(req): Json<UpdateMemberRequest>,
) -> Result<Json<MemberResponse>, AppError> {
    let member = current_member(&state, &ctx).await?;
    let member = state.members.update(member.id(), &req.email, req.age).await?;
    Ok(Json(MemberResponse::from(&member)))
}

pub async fn delete_me(
    State(state): State<AppState>,
    AuthMember(ctx): AuthMember,
) -> Result<StatusCode, AppError> {
    let member = current_member(&state, &ctx).await?;
    state.members.delete(member.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}
