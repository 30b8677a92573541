/*
 * Responsibility
 * - favorite の作成 / 一覧 / 削除
 * - 作成時は source / target が路線網で繋がっていることを検証する
 * - 削除は所有者のみ (他人の favorite は NotOwner)
 */
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::Station;
use crate::repos::{FavoriteRepo, RepoError, StationRepo};
use crate::services::subway::{PathError, SubwayService};

#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error(transparent)]
    InvalidRoute(#[from] PathError),
    #[error("favorite not found")]
    NotFound,
    #[error("favorite belongs to another member")]
    NotOwner,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteDetail {
    pub id: i64,
    pub source: Station,
    pub target: Station,
}

#[derive(Clone)]
pub struct FavoriteService {
    favorites: Arc<dyn FavoriteRepo>,
    stations: Arc<dyn StationRepo>,
    subway: SubwayService,
}

impl std::fmt::Debug for FavoriteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoriteService").finish_non_exhaustive()
    }
}

impl FavoriteService {
    pub fn new(
        favorites: Arc<dyn FavoriteRepo>,
        stations: Arc<dyn StationRepo>,
        subway: SubwayService,
    ) -> Self {
        Self {
            favorites,
            stations,
            subway,
        }
    }

    pub async fn create(
        &self,
        member_id: i64,
        source_id: i64,
        target_id: i64,
    ) -> Result<FavoriteDetail, FavoriteError> {
        let route = self
            .subway
            .route::<FavoriteError>(source_id, target_id)
            .await?;

        let favorite = self
            .favorites
            .create(member_id, route.source.id, route.target.id)
            .await?;
        info!(member_id, favorite_id = favorite.id, "favorite created");

        Ok(FavoriteDetail {
            id: favorite.id,
            source: route.source,
            target: route.target,
        })
    }

    pub async fn list(&self, member_id: i64) -> Result<Vec<FavoriteDetail>, FavoriteError> {
        let favorites = self.favorites.list_by_member(member_id).await?;

        let ids: Vec<i64> = favorites
            .iter()
            .flat_map(|f| [f.source_station_id, f.target_station_id])
            .collect();
        let stations: HashMap<i64, Station> = self
            .stations
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        Ok(favorites
            .into_iter()
            .filter_map(|f| {
                Some(FavoriteDetail {
                    id: f.id,
                    source: stations.get(&f.source_station_id)?.clone(),
                    target: stations.get(&f.target_station_id)?.clone(),
                })
            })
            .collect())
    }

    pub async fn delete(&self, member_id: i64, favorite_id: i64) -> Result<(), FavoriteError> {
        let favorite = self
            .favorites
            .find_by_id(favorite_id)
            .await?
            .ok_or(FavoriteError::NotFound)?;

        if !favorite.is_owned_by(member_id) {
            return Err(FavoriteError::NotOwner);
        }

        self.favorites.delete(favorite_id).await?;
        info!(member_id, favorite_id, "favorite deleted");
        Ok(())
    }
}
