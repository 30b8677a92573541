/*
 * Responsibility
 * - station / line / section / path のユースケース
 * - section の接続ルールは sections.rs、経路探索は graph.rs
 * - favorite 作成時の経路検証 (route) もここを通す
 */
pub mod graph;
pub mod sections;

use std::collections::HashMap;

use thiserror::Error;
use tracing::info;

use crate::domain::{Line, Section, Station};
use crate::error::AppError;
use crate::repos::{RepoError, RepoResult, Repos};

pub use graph::{GraphPath, SubwayGraph};
pub use sections::Sections;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SectionError {
    #[error("station does not exist")]
    StationNotFound,
    #[error("up and down stations must differ")]
    SameStation,
    #[error("invalid section distance")]
    InvalidDistance,
    #[error("both stations are already on the line")]
    AlreadyRegistered,
    #[error("neither station is on the line")]
    NotConnected,
    #[error("station is not on the line")]
    StationNotOnLine,
    #[error("a line needs at least one section")]
    LastSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("station does not exist")]
    StationNotFound,
    #[error("source and target must differ")]
    SameStation,
    #[error("stations are not connected")]
    Unconnected,
}

/// A line with its stations in up-to-down order.
#[derive(Debug, Clone)]
pub struct LineDetail {
    pub line: Line,
    pub stations: Vec<Station>,
}

/// Shortest route between two existing stations.
#[derive(Debug, Clone)]
pub struct Route {
    pub source: Station,
    pub target: Station,
    pub stations: Vec<Station>,
    pub distance: i64,
}

#[derive(Clone, Debug)]
pub struct SubwayService {
    repos: Repos,
}

impl SubwayService {
    pub fn new(repos: Repos) -> Self {
        Self { repos }
    }

    pub async fn create_station(&self, name: &str) -> Result<Station, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::bad_request("INVALID_NAME", "name must not be empty"));
        }
        let station = self.repos.stations.create(name).await?;
        info!(station_id = station.id, "station created");
        Ok(station)
    }

    pub async fn list_stations(&self) -> Result<Vec<Station>, AppError> {
        Ok(self.repos.stations.list().await?)
    }

    pub async fn delete_station(&self, id: i64) -> Result<(), AppError> {
        let in_use = self
            .repos
            .lines
            .all_sections()
            .await?
            .iter()
            .any(|s| s.contains(id));
        if in_use {
            return Err(AppError::bad_request(
                "STATION_IN_USE",
                "station is part of a line",
            ));
        }

        if !self.repos.stations.delete(id).await? {
            return Err(AppError::not_found("station"));
        }
        Ok(())
    }

    pub async fn create_line(
        &self,
        name: &str,
        color: &str,
        first: Section,
    ) -> Result<LineDetail, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::bad_request("INVALID_NAME", "name must not be empty"));
        }
        self.ensure_stations_exist(&first).await?;

        // validates distance / distinct stations
        let mut sections = Sections::new(Vec::new());
        sections.add(first)?;

        let line = match self.repos.lines.create(name, color, first).await {
            Ok(line) => line,
            Err(RepoError::Conflict) => {
                return Err(AppError::conflict("DUPLICATE_LINE", "line name already exists"));
            }
            Err(err) => return Err(err.into()),
        };
        info!(line_id = line.id, "line created");
        Ok(self.detail(line).await?)
    }

    pub async fn list_lines(&self) -> Result<Vec<LineDetail>, AppError> {
        let lines = self.repos.lines.list().await?;
        let mut details = Vec::with_capacity(lines.len());
        for line in lines {
            details.push(self.detail(line).await?);
        }
        Ok(details)
    }

    pub async fn find_line(&self, id: i64) -> Result<LineDetail, AppError> {
        let line = self.line(id).await?;
        Ok(self.detail(line).await?)
    }

    pub async fn update_line(&self, id: i64, name: &str, color: &str) -> Result<(), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::bad_request("INVALID_NAME", "name must not be empty"));
        }
        match self.repos.lines.update(id, name, color).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(AppError::not_found("line")),
            Err(RepoError::Conflict) => Err(AppError::conflict(
                "DUPLICATE_LINE",
                "line name already exists",
            )),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn delete_line(&self, id: i64) -> Result<(), AppError> {
        if !self.repos.lines.delete(id).await? {
            return Err(AppError::not_found("line"));
        }
        Ok(())
    }

    pub async fn add_section(&self, line_id: i64, section: Section) -> Result<(), AppError> {
        let line = self.line(line_id).await?;
        self.ensure_stations_exist(&section).await?;

        let mut sections = Sections::new(line.sections);
        sections.add(section)?;
        self.repos
            .lines
            .save_sections(line_id, sections.as_slice())
            .await?;
        info!(line_id, "section added");
        Ok(())
    }

    pub async fn remove_station_from_line(
        &self,
        line_id: i64,
        station_id: i64,
    ) -> Result<(), AppError> {
        let line = self.line(line_id).await?;

        let mut sections = Sections::new(line.sections);
        sections.remove_station(station_id)?;
        self.repos
            .lines
            .save_sections(line_id, sections.as_slice())
            .await?;
        info!(line_id, station_id, "station removed from line");
        Ok(())
    }

    /// Shortest route over the whole network.
    ///
    /// Both stations must exist and differ. Generic over the caller's error type so
    /// favorites and paths can each keep their own error enum.
    pub async fn route<E>(&self, source_id: i64, target_id: i64) -> Result<Route, E>
    where
        E: From<PathError> + From<RepoError>,
    {
        let source = self
            .repos
            .stations
            .find_by_id(source_id)
            .await?
            .ok_or(PathError::StationNotFound)?;
        let target = self
            .repos
            .stations
            .find_by_id(target_id)
            .await?
            .ok_or(PathError::StationNotFound)?;

        let graph = SubwayGraph::new(&self.repos.lines.all_sections().await?);
        let path = graph.shortest_path(source.id, target.id)?;
        let stations = self.stations_in_order(&path.station_ids).await?;

        Ok(Route {
            source,
            target,
            stations,
            distance: path.distance,
        })
    }

    async fn line(&self, id: i64) -> Result<Line, AppError> {
        self.repos
            .lines
            .find_by_id(id)
            .await?
            .ok_or(AppError::not_found("line"))
    }

    async fn ensure_stations_exist(&self, section: &Section) -> Result<(), AppError> {
        for id in [section.up_station_id, section.down_station_id] {
            if self.repos.stations.find_by_id(id).await?.is_none() {
                return Err(SectionError::StationNotFound.into());
            }
        }
        Ok(())
    }

    async fn detail(&self, line: Line) -> RepoResult<LineDetail> {
        let ids = Sections::new(line.sections.clone()).station_ids();
        let stations = self.stations_in_order(&ids).await?;
        Ok(LineDetail { line, stations })
    }

    async fn stations_in_order(&self, ids: &[i64]) -> RepoResult<Vec<Station>> {
        let mut by_id: HashMap<i64, Station> = self
            .repos
            .stations
            .find_by_ids(ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}
