//! Applies module migrations once, in registry order.

use bookshelf_kernel::Migration;
use sqlx::PgPool;
use tracing::instrument;

use crate::error::{DbError, DbResult};

const LEDGER_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS _bookshelf_migrations (
        module VARCHAR(255) NOT NULL,
        id VARCHAR(255) NOT NULL,
        applied_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        PRIMARY KEY (module, id)
    )
"#;

/// Apply every migration not yet recorded in `_bookshelf_migrations`.
///
/// Each script runs in its own transaction together with its ledger row.
/// Returns the number of scripts applied.
#[instrument(skip_all, fields(total = migrations.len()))]
pub async fn migrate(pool: &PgPool, migrations: &[(String, Migration)]) -> DbResult<usize> {
    sqlx::query(LEDGER_TABLE)
        .execute(pool)
        .await
        .map_err(DbError::query("create migration ledger"))?;

    let mut applied = 0;

    for (module, migration) in migrations {
        let recorded: Option<(String,)> =
            sqlx::query_as("SELECT id FROM _bookshelf_migrations WHERE module = $1 AND id = $2")
                .bind(module)
                .bind(migration.id)
                .fetch_optional(pool)
                .await
                .map_err(DbError::query("read migration ledger"))?;

        if recorded.is_some() {
            tracing::debug!(module = %module, id = migration.id, "migration already applied");
            continue;
        }

        let failed = |source| DbError::Migration {
            module: module.clone(),
            id: migration.id,
            source,
        };

        let mut tx = pool.begin().await.map_err(failed)?;
        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .map_err(failed)?;
        sqlx::query("INSERT INTO _bookshelf_migrations (module, id) VALUES ($1, $2)")
            .bind(module)
            .bind(migration.id)
            .execute(&mut *tx)
            .await
            .map_err(failed)?;
        tx.commit().await.map_err(failed)?;

        tracing::info!(module = %module, id = migration.id, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
