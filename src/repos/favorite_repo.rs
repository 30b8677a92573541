/*
 * Responsibility
 * - favorites テーブル向け SQLx 操作
 * - 所有者チェックは service 側 (repo は保存と検索だけ)
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::domain::Favorite;
use crate::repos::error::RepoResult;

#[async_trait]
pub trait FavoriteRepo: Send + Sync {
    async fn create(
        &self,
        member_id: i64,
        source_station_id: i64,
        target_station_id: i64,
    ) -> RepoResult<Favorite>;
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Favorite>>;
    async fn list_by_member(&self, member_id: i64) -> RepoResult<Vec<Favorite>>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Debug, FromRow)]
struct FavoriteRow {
    id: i64,
    member_id: i64,
    source_station_id: i64,
    target_station_id: i64,
}

impl From<FavoriteRow> for Favorite {
    fn from(row: FavoriteRow) -> Self {
        Favorite {
            id: row.id,
            member_id: row.member_id,
            source_station_id: row.source_station_id,
            target_station_id: row.target_station_id,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgFavoriteRepo {
    pool: PgPool,
}

impl PgFavoriteRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepo for PgFavoriteRepo {
    async fn create(
        &self,
        member_id: i64,
        source_station_id: i64,
        target_station_id: i64,
    ) -> RepoResult<Favorite> {
        let row = sqlx::query_as::<_, FavoriteRow>(
            r#"
            INSERT INTO favorites (member_id, source_station_id, target_station_id)
            VALUES ($1, $2, $3)
            RETURNING id, member_id, source_station_id, target_station_id
            "#,
        )
        .bind(member_id)
        .bind(source_station_id)
        .bind(target_station_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Favorite>> {
        let row = sqlx::query_as::<_, FavoriteRow>(
            r#"
            SELECT id, member_id, source_station_id, target_station_id
            FROM favorites
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Favorite::from))
    }

    async fn list_by_member(&self, member_id: i64) -> RepoResult<Vec<Favorite>> {
        let rows = sqlx::query_as::<_, FavoriteRow>(
            r#"
            SELECT id, member_id, source_station_id, target_station_id
            FROM favorites
            WHERE member_id = $1
            ORDER BY id
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Favorite::from).collect())
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM favorites
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
