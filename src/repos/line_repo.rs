/*
 * Responsibility
 * - lines / sections テーブル向け SQLx 操作
 * - section の並びや接続ルールは services::subway が決める (repo は丸ごと保存するだけ)
 */
use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::domain::{Line, Section};
use crate::repos::error::{RepoError, RepoResult};

#[async_trait]
pub trait LineRepo: Send + Sync {
    async fn create(&self, name: &str, color: &str, first: Section) -> RepoResult<Line>;
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Line>>;
    async fn list(&self) -> RepoResult<Vec<Line>>;
    async fn update(&self, id: i64, name: &str, color: &str) -> RepoResult<bool>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;
    /// Replaces every section of the line.
    async fn save_sections(&self, line_id: i64, sections: &[Section]) -> RepoResult<()>;
    /// Sections of all lines; the edges of the network graph.
    async fn all_sections(&self) -> RepoResult<Vec<Section>>;
}

#[derive(Debug, FromRow)]
struct LineRow {
    id: i64,
    name: String,
    color: String,
}

#[derive(Debug, FromRow)]
struct SectionRow {
    line_id: i64,
    up_station_id: i64,
    down_station_id: i64,
    distance: i32,
}

impl From<&SectionRow> for Section {
    fn from(row: &SectionRow) -> Self {
        Section::new(row.up_station_id, row.down_station_id, row.distance)
    }
}

fn assemble(lines: Vec<LineRow>, sections: Vec<SectionRow>) -> Vec<Line> {
    let mut by_line: HashMap<i64, Vec<Section>> = HashMap::new();
    for row in &sections {
        by_line.entry(row.line_id).or_default().push(row.into());
    }

    lines
        .into_iter()
        .map(|l| Line {
            sections: by_line.remove(&l.id).unwrap_or_default(),
            id: l.id,
            name: l.name,
            color: l.color,
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct PgLineRepo {
    pool: PgPool,
}

impl PgLineRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LineRepo for PgLineRepo {
    async fn create(&self, name: &str, color: &str, first: Section) -> RepoResult<Line> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, LineRow>(
            r#"
            INSERT INTO lines (name, color)
            VALUES ($1, $2)
            RETURNING id, name, color
            "#,
        )
        .bind(name)
        .bind(color)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepoError::from_sqlx)?;

        sqlx::query(
            r#"
            INSERT INTO sections (line_id, up_station_id, down_station_id, distance)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(row.id)
        .bind(first.up_station_id)
        .bind(first.down_station_id)
        .bind(first.distance)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Line {
            id: row.id,
            name: row.name,
            color: row.color,
            sections: vec![first],
        })
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Line>> {
        let Some(line) = sqlx::query_as::<_, LineRow>(
            r#"
            SELECT id, name, color
            FROM lines
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let sections = sqlx::query_as::<_, SectionRow>(
            r#"
            SELECT line_id, up_station_id, down_station_id, distance
            FROM sections
            WHERE line_id = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assemble(vec![line], sections).pop())
    }

    async fn list(&self) -> RepoResult<Vec<Line>> {
        let lines = sqlx::query_as::<_, LineRow>(
            r#"
            SELECT id, name, color
            FROM lines
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let sections = sqlx::query_as::<_, SectionRow>(
            r#"
            SELECT line_id, up_station_id, down_station_id, distance
            FROM sections
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(assemble(lines, sections))
    }

    async fn update(&self, id: i64, name: &str, color: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE lines
            SET name = $2, color = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(color)
        .execute(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        // sections は ON DELETE CASCADE
        let result = sqlx::query(
            r#"
            DELETE FROM lines
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn save_sections(&self, line_id: i64, sections: &[Section]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        // 同じ line への書き込み同士を直列化する
        sqlx::query("SELECT id FROM lines WHERE id = $1 FOR UPDATE")
            .bind(line_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM sections WHERE line_id = $1")
            .bind(line_id)
            .execute(&mut *tx)
            .await?;

        let ups: Vec<i64> = sections.iter().map(|s| s.up_station_id).collect();
        let downs: Vec<i64> = sections.iter().map(|s| s.down_station_id).collect();
        let distances: Vec<i32> = sections.iter().map(|s| s.distance).collect();

        sqlx::query(
            r#"
            INSERT INTO sections (line_id, up_station_id, down_station_id, distance)
            SELECT $1, up, down, dist
            FROM UNNEST($2::bigint[], $3::bigint[], $4::int[]) AS t(up, down, dist)
            "#,
        )
        .bind(line_id)
        .bind(&ups)
        .bind(&downs)
        .bind(&distances)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn all_sections(&self) -> RepoResult<Vec<Section>> {
        let rows = sqlx::query_as::<_, SectionRow>(
            r#"
            SELECT line_id, up_station_id, down_station_id, distance
            FROM sections
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Section::from).collect())
    }
}
