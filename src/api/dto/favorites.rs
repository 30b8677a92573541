use serde::{Deserialize, Serialize};

use crate::api::dto::subway::StationResponse;
use crate::services::favorite::FavoriteDetail;

/// `source` / `target` are station ids.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub source: i64,
    pub target: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: i64,
    pub source: StationResponse,
    pub target: StationResponse,
}

impl From<&FavoriteDetail> for FavoriteResponse {
    fn from(f: &FavoriteDetail) -> Self {
        Self {
            id: f.id,
            source: (&f.source).into(),
            target: (&f.target).into(),
        }
    }
}
