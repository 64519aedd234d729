use async_trait::async_trait;
use bookshelf_db::{DbError, DbResult};
use sqlx::PgPool;
use tracing::instrument;

use super::BookRepository;
use crate::modules::authors::models::AuthorEntity;
use crate::modules::books::models::BookEntity;

const SELECT_BOOKS: &str = r#"
    SELECT b.isbn, b.title, a.id AS author_id, a.name AS author_name, a.age AS author_age
    FROM books b
    LEFT JOIN authors a ON a.id = b.author_id
"#;

/// A book joined with its (optional) author.
#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    isbn: String,
    title: String,
    author_id: Option<i64>,
    author_name: Option<String>,
    author_age: Option<i32>,
}

impl From<BookRow> for BookEntity {
    fn from(row: BookRow) -> Self {
        let author = match (row.author_id, row.author_name, row.author_age) {
            (Some(id), Some(name), Some(age)) => Some(AuthorEntity {
                id: Some(id),
                name,
                age,
            }),
            _ => None,
        };
        BookEntity {
            isbn: row.isbn,
            title: row.title,
            author,
        }
    }
}

/// PostgreSQL implementation of the book repository.
#[derive(Debug, Clone)]
pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    #[instrument(skip(self, book), fields(isbn = %book.isbn))]
    async fn save(&self, book: BookEntity) -> DbResult<BookEntity> {
        let author_id = match &book.author {
            Some(author) => Some(author.id.ok_or_else(|| DbError::Inconsistent {
                message: format!("book {} references an unsaved author", book.isbn),
            })?),
            None => None,
        };

        sqlx::query(
            r#"
            INSERT INTO books (isbn, title, author_id) VALUES ($1, $2, $3)
            ON CONFLICT (isbn) DO UPDATE SET title = EXCLUDED.title, author_id = EXCLUDED.author_id
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(author_id)
        .execute(&self.pool)
        .await
        .map_err(DbError::query("upsert book"))?;

        self.find_by_isbn(&book.isbn)
            .await?
            .ok_or_else(|| DbError::Inconsistent {
                message: format!("book {} missing after upsert", book.isbn),
            })
    }

    #[instrument(skip(self))]
    async fn find_by_isbn(&self, isbn: &str) -> DbResult<Option<BookEntity>> {
        let row: Option<BookRow> = sqlx::query_as(&format!("{SELECT_BOOKS} WHERE b.isbn = $1"))
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::query("find book"))?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> DbResult<Vec<BookEntity>> {
        let rows: Vec<BookRow> = sqlx::query_as(&format!("{SELECT_BOOKS} ORDER BY b.isbn"))
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::query("list books"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn delete_by_isbn(&self, isbn: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(&self.pool)
            .await
            .map_err(DbError::query("delete book"))?;

        tracing::debug!(rows = result.rows_affected(), "book delete");
        Ok(())
    }
}
