use anyhow::{anyhow, Context, Result};
use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow},
    Row,
};
use std::{future::Future, path::Path, str::FromStr, time::Duration};
use time::OffsetDateTime;
use tokio::{
    fs::create_dir_all,
    sync::{mpsc, oneshot},
};
use weather_sources::{iso_date, parse_target_date, DataSource};

use super::{NewWeatherRecord, RecordSort, WeatherRecord};

pub const DATABASE_FILE: &str = "weather_journal.sqlite";

const RECORD_COLUMNS: &str = "id, requested_date, city, country, temp_max_c, temp_min_c, \
     precip_mm, wind_max_kmh, source, created_at";

type WriteOperation = std::pin::Pin<Box<dyn Future<Output = ()> + Send>>;

/// Runs every write on one task so SQLite never sees concurrent writers
pub struct DatabaseWriter {
    write_tx: mpsc::UnboundedSender<WriteOperation>,
    _handle: tokio::task::JoinHandle<()>,
}

impl Default for DatabaseWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseWriter {
    pub fn new() -> Self {
        let (write_tx, mut write_rx) = mpsc::unbounded_channel::<WriteOperation>();

        let handle = tokio::spawn(async move {
            while let Some(future) = write_rx.recv().await {
                future.await;
            }
        });

        Self {
            write_tx,
            _handle: handle,
        }
    }

    pub async fn execute<T, F, Fut>(&self, pool: SqlitePool, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(SqlitePool) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (result_tx, result_rx) = oneshot::channel::<Result<T>>();

        let write_op = Box::pin(async move {
            let result = operation(pool).await;
            let _ = result_tx.send(result);
        });

        self.write_tx
            .send(write_op)
            .map_err(|_| anyhow!("Database writer channel closed"))?;

        result_rx
            .await
            .map_err(|_| anyhow!("Failed to receive write result"))?
    }
}

pub struct Database {
    pool: SqlitePool,
    writer: DatabaseWriter,
}

impl Database {
    /// Open (or create) `<dir>/weather_journal.sqlite` and apply migrations
    pub async fn new(dir: &str) -> Result<Self> {
        let db_path = Path::new(dir).join(DATABASE_FILE);

        if let Some(parent) = db_path.parent() {
            create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create database directory: {parent:?}"))?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
            .create_if_missing(true)
            .pragma("journal_mode", "WAL")
            .pragma("synchronous", "NORMAL")
            .pragma("busy_timeout", "5000")
            .pragma("temp_store", "MEMORY");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .context("Failed to create database connection pool")?;

        let db = Self {
            pool,
            writer: DatabaseWriter::new(),
        };

        db.run_migrations().await?;
        info!("SQLite database initialized at: {}", db_path.display());

        Ok(db)
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Database connectivity check failed")?;

        let result: String = sqlx::query_scalar("PRAGMA quick_check;")
            .fetch_one(&self.pool)
            .await
            .context("Database integrity check failed")?;
        if result != "ok" {
            return Err(anyhow!("Database integrity check failed: {}", result));
        }

        Ok(())
    }

    /// Flush the WAL into the main file, called on shutdown
    pub async fn checkpoint(&self) {
        match sqlx::query("PRAGMA wal_checkpoint(TRUNCATE);")
            .execute(&self.pool)
            .await
        {
            Ok(_) => info!("WAL checkpoint completed successfully"),
            Err(e) => log::error!("WAL checkpoint failed: {}", e),
        }
    }

    pub async fn add_record(&self, record: NewWeatherRecord) -> Result<WeatherRecord> {
        let pool = self.pool.clone();
        // Stored as whole seconds
        let created_at = OffsetDateTime::from_unix_timestamp(
            OffsetDateTime::now_utc().unix_timestamp(),
        )?;

        self.writer
            .execute(pool, move |pool| async move {
                let result = sqlx::query(
                    "INSERT INTO weather_records (
                        requested_date, city, country, temp_max_c, temp_min_c,
                        precip_mm, wind_max_kmh, source, created_at
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(iso_date(record.requested_date))
                .bind(&record.city)
                .bind(&record.country)
                .bind(record.temp_max_c)
                .bind(record.temp_min_c)
                .bind(record.precip_mm)
                .bind(record.wind_max_kmh)
                .bind(record.source.as_str())
                .bind(created_at.unix_timestamp())
                .execute(&pool)
                .await?;

                Ok(WeatherRecord {
                    id: result.last_insert_rowid(),
                    requested_date: record.requested_date,
                    city: record.city,
                    country: record.country,
                    temp_max_c: record.temp_max_c,
                    temp_min_c: record.temp_min_c,
                    precip_mm: record.precip_mm,
                    wind_max_kmh: record.wind_max_kmh,
                    source: record.source,
                    created_at,
                })
            })
            .await
    }

    pub async fn list_records(&self, sort: RecordSort) -> Result<Vec<WeatherRecord>> {
        // ORDER BY only ever receives whitelisted column names
        let query = format!(
            "SELECT {} FROM weather_records ORDER BY {}",
            RECORD_COLUMNS,
            sort.order_by()
        );
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(row_to_record).collect()
    }

    pub async fn get_record(&self, id: i64) -> Result<Option<WeatherRecord>> {
        let query = format!("SELECT {} FROM weather_records WHERE id = ?", RECORD_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_record).transpose()
    }

    /// Returns false when no record had that id
    pub async fn delete_record(&self, id: i64) -> Result<bool> {
        let pool = self.pool.clone();

        self.writer
            .execute(pool, move |pool| async move {
                let result = sqlx::query("DELETE FROM weather_records WHERE id = ?")
                    .bind(id)
                    .execute(&pool)
                    .await?;
                Ok(result.rows_affected() > 0)
            })
            .await
    }

    pub async fn count_records(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM weather_records")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn row_to_record(row: &SqliteRow) -> Result<WeatherRecord> {
    let requested_date: String = row.get("requested_date");
    let source: String = row.get("source");
    let created_ts: i64 = row.get("created_at");

    Ok(WeatherRecord {
        id: row.get("id"),
        requested_date: parse_target_date(&requested_date)?,
        city: row.get("city"),
        country: row.get("country"),
        temp_max_c: row.get("temp_max_c"),
        temp_min_c: row.get("temp_min_c"),
        precip_mm: row.get("precip_mm"),
        wind_max_kmh: row.get("wind_max_kmh"),
        source: DataSource::from_str(&source).map_err(|e| anyhow!(e))?,
        created_at: OffsetDateTime::from_unix_timestamp(created_ts)?,
    })
}
