/*
 * Responsibility
 * - /lines と /lines/{id}/sections の handler
 * - section の接続ルールは services::subway 側
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    api::dto::subway::{
        LineRequest, LineResponse, RemoveSectionQuery, SectionRequest, UpdateLineRequest,
    },
    error::AppError,
    state::AppState,
};

pub async fn create_line(
    State(state): State<AppState>,
    Json(req): Json<LineRequest>,
) -> Result<impl IntoResponse, AppError> {
    let detail = state
        .subway
        .create_line(&req.name, &req.color, req.first_section())
        .await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/lines/{}", detail.line.id))],
        Json(LineResponse::from(&detail)),
    ))
}

pub async fn list_lines(State(state): State<AppState>) -> Result<Json<Vec<LineResponse>>, AppError> {
    let lines = state.subway.list_lines().await?;
    Ok(Json(lines.iter().map(LineResponse::from).collect()))
}

pub async fn get_line(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LineResponse>, AppError> {
    let detail = state.subway.find_line(id).await?;
    Ok(Json(LineResponse::from(&detail)))
}

pub async fn update_line(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateLineRequest>,
) -> Result<StatusCode, AppError> {
    state.subway.update_line(id, &req.name, &req.color).await?;
    Ok(StatusCode::OK)
}

pub async fn delete_line(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.subway.delete_line(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_section(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<SectionRequest>,
) -> Result<StatusCode, AppError> {
    state.subway.add_section(id, req.into()).await?;
    Ok(StatusCode::OK)
}

pub async fn remove_section(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(q): Query<RemoveSectionQuery>,
) -> Result<StatusCode, AppError> {
    state.subway.remove_station_from_line(id, q.station_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
