use async_trait::async_trait;
use bookshelf_db::{DbError, DbResult};
use sqlx::PgPool;
use tracing::instrument;

use super::AuthorRepository;
use crate::modules::authors::models::AuthorEntity;

#[derive(Debug, sqlx::FromRow)]
struct AuthorRow {
    id: i64,
    name: String,
    age: i32,
}

impl From<AuthorRow> for AuthorEntity {
    fn from(row: AuthorRow) -> Self {
        AuthorEntity {
            id: Some(row.id),
            name: row.name,
            age: row.age,
        }
    }
}

/// PostgreSQL implementation of the author repository.
#[derive(Debug, Clone)]
pub struct PostgresAuthorRepository {
    pool: PgPool,
}

impl PostgresAuthorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    #[instrument(skip(self, author), fields(id = ?author.id))]
    async fn save(&self, author: AuthorEntity) -> DbResult<AuthorEntity> {
        let row: AuthorRow = match author.id {
            None => sqlx::query_as(
                "INSERT INTO authors (name, age) VALUES ($1, $2) RETURNING id, name, age",
            )
            .bind(&author.name)
            .bind(author.age)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::query("insert author"))?,
            Some(id) => {
                let row: AuthorRow = sqlx::query_as(
                    r#"
                    INSERT INTO authors (id, name, age) VALUES ($1, $2, $3)
                    ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, age = EXCLUDED.age
                    RETURNING id, name, age
                    "#,
                )
                .bind(id)
                .bind(&author.name)
                .bind(author.age)
                .fetch_one(&self.pool)
                .await
                .map_err(DbError::query("upsert author"))?;

                // Explicit ids bypass the sequence; keep it ahead of them.
                sqlx::query(
                    "SELECT setval(pg_get_serial_sequence('authors', 'id'), GREATEST(MAX(id), 1)) FROM authors",
                )
                .execute(&self.pool)
                .await
                .map_err(DbError::query("advance author sequence"))?;

                row
            }
        };

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> DbResult<Option<AuthorEntity>> {
        let row: Option<AuthorRow> =
            sqlx::query_as("SELECT id, name, age FROM authors WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(DbError::query("find author"))?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> DbResult<Vec<AuthorEntity>> {
        let rows: Vec<AuthorRow> = sqlx::query_as("SELECT id, name, age FROM authors ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::query("list authors"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: i64) -> DbResult<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM authors WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(DbError::query("author exists"))?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::query("delete author"))?;

        tracing::debug!(rows = result.rows_affected(), "author delete");
        Ok(())
    }
}
