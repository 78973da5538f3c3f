//! PostgreSQL-backed repositories.
//!
//! Repository traits are synchronous. `PgStore` captures the tokio runtime
//! handle at connect time and drives each query with `Handle::block_on`, so
//! calls must come from a blocking context (`spawn_blocking` or a plain
//! thread), never directly from an async task.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique violation) | `23505` | `Conflict(constraint)` |
//! | Database (foreign key violation) | `23503` | `Backend` |
//! | Database (other) | Any other | `Backend` |
//! | RowNotFound | N/A | `NotFound` |
//! | Other | N/A | `Backend` |

use std::future::Future;

use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres};
use tokio::runtime::Handle;
use tracing::instrument;

use stockhub_core::{StoreError, StoreResult};

mod inventory;
mod locations;
mod orders;
mod parties;
mod products;

const SCHEMA: &str = include_str!("../../../migrations/0001_init.sql");

type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Row decoding for domain types (which cannot implement `sqlx::FromRow`
/// from this crate).
trait Decode: Sized {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    handle: Handle,
}

impl PgStore {
    /// Connect and capture the current runtime handle.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Self::from_pool(pool)
    }

    pub fn from_pool(pool: PgPool) -> StoreResult<Self> {
        let handle = Handle::try_current()
            .map_err(|_| StoreError::backend("PgStore requires a tokio runtime"))?;
        Ok(Self { pool, handle })
    }

    /// Apply the bundled schema. Idempotent.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;
        Ok(())
    }

    fn block<F: Future>(&self, fut: F) -> F::Output {
        self.handle.block_on(fut)
    }

    /// Single row or `NotFound`.
    #[instrument(level = "debug", skip(self, query), err)]
    fn fetch_one<T: Decode>(&self, operation: &'static str, query: PgQuery<'_>) -> StoreResult<T> {
        self.block(async {
            let row = query
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_sqlx_error(operation, e))?
                .ok_or(StoreError::NotFound)?;
            T::decode(&row).map_err(|e| map_sqlx_error(operation, e))
        })
    }

    #[instrument(level = "debug", skip(self, query), err)]
    fn fetch_all<T: Decode>(
        &self,
        operation: &'static str,
        query: PgQuery<'_>,
    ) -> StoreResult<Vec<T>> {
        self.block(async {
            let rows = query
                .fetch_all(&self.pool)
                .await
                .map_err(|e| map_sqlx_error(operation, e))?;
            rows.iter()
                .map(T::decode)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| map_sqlx_error(operation, e))
        })
    }

    /// Statement that must touch at least one row; zero rows is `NotFound`.
    #[instrument(level = "debug", skip(self, query), err)]
    fn execute(&self, operation: &'static str, query: PgQuery<'_>) -> StoreResult<()> {
        self.block(async {
            let done = query
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error(operation, e))?;
            if done.rows_affected() == 0 {
                Err(StoreError::NotFound)
            } else {
                Ok(())
            }
        })
    }
}

/// `Lookup<T>` backed by a by-id `SELECT`.
macro_rules! lookup_by_id {
    ($t:ty, $sql:expr, $op:literal) => {
        impl stockhub_core::Lookup<$t> for $crate::store::PgStore {
            fn get_by_id(&self, id: i64) -> stockhub_core::StoreResult<$t> {
                self.fetch_one($op, sqlx::query($sql).bind(id))
            }
        }
    };
}
use lookup_by_id;

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {operation}: {}", db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => {
                    StoreError::conflict(db_err.constraint().unwrap_or("unique").to_string())
                }
                _ => StoreError::backend(msg),
            }
        }
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::PoolClosed => {
            StoreError::backend(format!("connection pool closed in {operation}"))
        }
        other => StoreError::backend(format!("sqlx error in {operation}: {other}")),
    }
}
