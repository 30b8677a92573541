use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    api::dto::subway::{PathQuery, PathResponse},
    error::AppError,
    state::AppState,
};

pub async fn find_path(
    State(state): State<AppState>,
    Query(q): Query<PathQuery>,
) -> Result<Json<PathResponse>, AppError> {
    let route = state.subway.route::<AppError>(q.source, q.target).await?;
    Ok(Json(PathResponse::from(&route)))
}
