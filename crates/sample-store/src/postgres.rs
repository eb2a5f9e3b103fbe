use async_trait::async_trait;
use futures_util::StreamExt;
use sqlx::postgres::{PgListener, PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::{
    ChangeEvent, ChangeFilter, NewSample, Result, SAMPLE_TABLE, Sample, SampleId, StoreError,
    store::{ChangeFeed, ChangeStream, SampleStore},
};

/// Notification channel the change trigger publishes on.
pub const CHANGE_CHANNEL: &str = "biodegradation_changes";

/// PostgreSQL-backed sample store.
///
/// Row-level changes are published by an `AFTER ... FOR EACH ROW` trigger
/// through `pg_notify`, so writes made by any client (not just this store)
/// reach the change feed.
#[derive(Clone)]
pub struct PostgresSampleStore {
    pool: PgPool,
}

impl PostgresSampleStore {
    /// Creates a new PostgreSQL sample store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a pool to `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_sample(row: PgRow) -> Result<Sample> {
        Ok(Sample {
            sample_id: SampleId::new(row.try_get("sample_id")?),
            material_type: row.try_get("material_type")?,
            environment: row.try_get("environment")?,
            time_days: row.try_get("time_days")?,
            degradation_pct: row.try_get("degradation_pct")?,
            temperature_c: row.try_get("temperature_c")?,
            humidity_pct: row.try_get("humidity_pct")?,
        })
    }
}

#[async_trait]
impl SampleStore for PostgresSampleStore {
    #[tracing::instrument(skip(self))]
    async fn select_all(&self) -> Result<Vec<Sample>> {
        let rows = sqlx::query(
            r#"
            SELECT sample_id, material_type, environment, time_days,
                   degradation_pct, temperature_c, humidity_pct
            FROM biodegradation
            ORDER BY sample_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_sample).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn delete_all(&self) -> Result<u64> {
        // DELETE rather than TRUNCATE so the row trigger fires per row.
        let result = sqlx::query("DELETE FROM biodegradation")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip(self, rows), fields(count = rows.len()))]
    async fn insert_batch(&self, rows: Vec<NewSample>) -> Result<Vec<Sample>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(rows.len());

        for row in &rows {
            let stored = sqlx::query(
                r#"
                INSERT INTO biodegradation
                    (material_type, environment, time_days, degradation_pct, temperature_c, humidity_pct)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING sample_id, material_type, environment, time_days,
                          degradation_pct, temperature_c, humidity_pct
                "#,
            )
            .bind(&row.material_type)
            .bind(&row.environment)
            .bind(row.time_days)
            .bind(row.degradation_pct)
            .bind(row.temperature_c)
            .bind(row.humidity_pct)
            .fetch_one(&mut *tx)
            .await?;

            inserted.push(Self::row_to_sample(stored)?);
        }

        tx.commit().await?;
        Ok(inserted)
    }
}

#[async_trait]
impl ChangeFeed for PostgresSampleStore {
    async fn subscribe(&self, filter: ChangeFilter) -> Result<ChangeStream> {
        if filter.table != SAMPLE_TABLE {
            return Err(StoreError::UnknownTable(filter.table));
        }

        let mut listener = PgListener::connect_with(&self.pool).await?;
        listener.listen(CHANGE_CHANNEL).await?;
        tracing::info!(channel = CHANGE_CHANNEL, "listening for sample changes");

        let stream = listener.into_stream().filter_map(move |notification| {
            let filter = filter.clone();
            async move {
                let notification = match notification {
                    Ok(notification) => notification,
                    Err(e) => return Some(Err(StoreError::Database(e))),
                };
                match serde_json::from_str::<ChangeEvent>(notification.payload()) {
                    Ok(event) if filter.matches(&event) => Some(Ok(event)),
                    Ok(_) => None,
                    Err(e) => Some(Err(StoreError::Serialization(e))),
                }
            }
        });

        Ok(Box::pin(stream))
    }
}
