use crate::reading::StoredRow;
use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const CREATE_DATA_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS data(
    name TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    score INTEGER NOT NULL,
    dew_point REAL NOT NULL,
    temp REAL NOT NULL,
    humid REAL NOT NULL,
    abs_humid REAL NOT NULL,
    co2 INTEGER NOT NULL,
    co2_est INTEGER NOT NULL,
    co2_est_baseline INTEGER NOT NULL,
    voc INTEGER NOT NULL,
    voc_baseline INTEGER NOT NULL,
    voc_h2_raw INTEGER NOT NULL,
    voc_ethanol_raw INTEGER NOT NULL,
    pm25 INTEGER NOT NULL,
    pm10_est INTEGER NOT NULL,
    UNIQUE(name, timestamp)
)
"#;

#[derive(Clone)]
pub struct ReadingStore {
    pool: SqlitePool,
}

impl ReadingStore {
    // SQLite takes a single writer; the one-connection pool serializes
    // concurrent ingest tasks.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database URL {database_url}"))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_DATA_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn insert_if_absent(&self, row: &StoredRow) -> Result<(), sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO data(
                name,
                timestamp,
                score,
                dew_point,
                temp,
                humid,
                abs_humid,
                co2,
                co2_est,
                co2_est_baseline,
                voc,
                voc_baseline,
                voc_h2_raw,
                voc_ethanol_raw,
                pm25,
                pm10_est
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            "#,
        )
        .bind(&row.name)
        .bind(row.reading.timestamp)
        .bind(row.reading.score)
        .bind(row.reading.dew_point)
        .bind(row.reading.temp)
        .bind(row.reading.humid)
        .bind(row.reading.abs_humid)
        .bind(row.reading.co2)
        .bind(row.reading.co2_est)
        .bind(row.reading.co2_est_baseline)
        .bind(row.reading.voc)
        .bind(row.reading.voc_baseline)
        .bind(row.reading.voc_h2_raw)
        .bind(row.reading.voc_ethanol_raw)
        .bind(row.reading.pm25)
        .bind(row.reading.pm10_est)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(
                monitor = %row.name,
                timestamp = %row.reading.timestamp,
                "skipped duplicate reading"
            );
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) async fn rows_for(&self, name: &str) -> Result<Vec<StoredRow>, sqlx::Error> {
        use crate::reading::Reading;
        use sqlx::Row as _;

        let rows = sqlx::query(
            r#"
            SELECT
                name, timestamp, score, dew_point, temp, humid, abs_humid,
                co2, co2_est, co2_est_baseline, voc, voc_baseline,
                voc_h2_raw, voc_ethanol_raw, pm25, pm10_est
            FROM data
            WHERE name = ?1
            ORDER BY timestamp
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(StoredRow {
                    name: row.try_get("name")?,
                    reading: Reading {
                        timestamp: row.try_get("timestamp")?,
                        score: row.try_get("score")?,
                        dew_point: row.try_get("dew_point")?,
                        temp: row.try_get("temp")?,
                        humid: row.try_get("humid")?,
                        abs_humid: row.try_get("abs_humid")?,
                        co2: row.try_get("co2")?,
                        co2_est: row.try_get("co2_est")?,
                        co2_est_baseline: row.try_get("co2_est_baseline")?,
                        voc: row.try_get("voc")?,
                        voc_baseline: row.try_get("voc_baseline")?,
                        voc_h2_raw: row.try_get("voc_h2_raw")?,
                        voc_ethanol_raw: row.try_get("voc_ethanol_raw")?,
                        pm25: row.try_get("pm25")?,
                        pm10_est: row.try_get("pm10_est")?,
                    },
                })
            })
            .collect()
    }
}
