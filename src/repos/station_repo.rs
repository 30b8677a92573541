/*
 * Responsibility
 * - stations テーブル向け SQLx 操作
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::domain::Station;
use crate::repos::error::RepoResult;

#[async_trait]
pub trait StationRepo: Send + Sync {
    async fn create(&self, name: &str) -> RepoResult<Station>;
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Station>>;
    async fn find_by_ids(&self, ids: &[i64]) -> RepoResult<Vec<Station>>;
    async fn list(&self) -> RepoResult<Vec<Station>>;
    /// Also removes favorites that point at the station.
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Debug, FromRow)]
struct StationRow {
    id: i64,
    name: String,
}

impl From<StationRow> for Station {
    fn from(row: StationRow) -> Self {
        Station {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgStationRepo {
    pool: PgPool,
}

impl PgStationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StationRepo for PgStationRepo {
    async fn create(&self, name: &str) -> RepoResult<Station> {
        let row = sqlx::query_as::<_, StationRow>(
            r#"
            INSERT INTO stations (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Station>> {
        let row = sqlx::query_as::<_, StationRow>(
            r#"
            SELECT id, name
            FROM stations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Station::from))
    }

    async fn find_by_ids(&self, ids: &[i64]) -> RepoResult<Vec<Station>> {
        let rows = sqlx::query_as::<_, StationRow>(
            r#"
            SELECT id, name
            FROM stations
            WHERE id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Station::from).collect())
    }

    async fn list(&self) -> RepoResult<Vec<Station>> {
        let rows = sqlx::query_as::<_, StationRow>(
            r#"
            SELECT id, name
            FROM stations
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Station::from).collect())
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM stations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
