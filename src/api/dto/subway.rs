use serde::{Deserialize, Serialize};

use crate::domain::{Section, Station};
use crate::services::subway::{LineDetail, Route};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResponse {
    pub id: i64,
    pub name: String,
}

impl From<&Station> for StationResponse {
    fn from(s: &Station) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub name: String,
    pub color: String,
    pub up_station_id: i64,
    pub down_station_id: i64,
    pub distance: i32,
}

impl LineRequest {
    pub fn first_section(&self) -> Section {
        Section::new(self.up_station_id, self.down_station_id, self.distance)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLineRequest {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineResponse {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub stations: Vec<StationResponse>,
}

impl From<&LineDetail> for LineResponse {
    fn from(d: &LineDetail) -> Self {
        Self {
            id: d.line.id,
            name: d.line.name.clone(),
            color: d.line.color.clone(),
            stations: d.stations.iter().map(StationResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest {
    pub up_station_id: i64,
    pub down_station_id: i64,
    pub distance: i32,
}

impl From<SectionRequest> for Section {
    fn from(r: SectionRequest) -> Self {
        Section::new(r.up_station_id, r.down_station_id, r.distance)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveSectionQuery {
    pub station_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub source: i64,
    pub target: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResponse {
    pub stations: Vec<StationResponse>,
    pub distance: i64,
}

impl From<&Route> for PathResponse {
    fn from(r: &Route) -> Self {
        Self {
            stations: r.stations.iter().map(StationResponse::from).collect(),
            distance: r.distance,
        }
    }
}
