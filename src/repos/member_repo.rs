/*
 * Responsibility
 * - members / member_roles テーブル向け SQLx 操作
 * - email の一意制約違反は RepoError::Conflict に変換して返す
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::domain::{Member, NewMember};
use crate::repos::error::{RepoError, RepoResult};

#[async_trait]
pub trait MemberRepo: Send + Sync {
    async fn create(&self, member: NewMember) -> RepoResult<Member>;
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Member>>;
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Member>>;
    /// Persists the mutable fields (email, age) of an already loaded member.
    async fn update(&self, member: &Member) -> RepoResult<bool>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Debug, FromRow)]
struct MemberRow {
    id: i64,
    email: String,
    password_hash: String,
    age: i32,
    roles: Vec<String>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member::from_parts(row.id, row.email, row.password_hash, row.age, row.roles)
    }
}

// roles は member_roles を集約して配列で返す
const SELECT_MEMBER: &str = r#"
    SELECT
        m.id, m.email, m.password_hash, m.age,
        COALESCE(
            array_agg(r.role ORDER BY r.role) FILTER (WHERE r.role IS NOT NULL),
            '{}'
        ) AS roles
    FROM members m
    LEFT JOIN member_roles r ON r.member_id = m.id
"#;

#[derive(Clone, Debug)]
pub struct PgMemberRepo {
    pool: PgPool,
}

impl PgMemberRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepo for PgMemberRepo {
    async fn create(&self, member: NewMember) -> RepoResult<Member> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO members (email, password_hash, age)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&member.email)
        .bind(&member.password_hash)
        .bind(member.age)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepoError::from_sqlx)?;

        sqlx::query(
            r#"
            INSERT INTO member_roles (member_id, role)
            SELECT $1, UNNEST($2::text[])
            "#,
        )
        .bind(id)
        .bind(&member.roles)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Member::from_parts(
            id,
            member.email,
            member.password_hash,
            member.age,
            member.roles,
        ))
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Member>> {
        let sql = format!("{SELECT_MEMBER} WHERE m.id = $1 GROUP BY m.id");
        let row = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Member::from))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Member>> {
        let sql = format!("{SELECT_MEMBER} WHERE m.email = $1 GROUP BY m.id");
        let row = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Member::from))
    }

    async fn update(&self, member: &Member) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET email = $2, age = $3, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(member.id())
        .bind(member.email())
        .bind(member.age())
        .execute(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        // member_roles / favorites は ON DELETE CASCADE
        let result = sqlx::query(
            r#"
            DELETE FROM members
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
