use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    api::dto::subway::{StationRequest, StationResponse},
    error::AppError,
    state::AppState,
};

pub async fn create_station(
    State(state): State<AppState>,
    Json(req): Json<StationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let station = state.subway.create_station(&req.name).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/stations/{}", station.id))],
        Json(StationResponse::from(&station)),
    ))
}

pub async fn list_stations(
    State(state): State<AppState>,
) -> Result<Json<Vec<StationResponse>>, AppError> {
    let stations = state.subway.list_stations().await?;
    Ok(Json(stations.iter().map(StationResponse::from).collect()))
}

pub async fn delete_station(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.subway.delete_station(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
