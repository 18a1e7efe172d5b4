use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    FromRow,
};
use utoipa::ToSchema;

use crate::{format_date, DateRange};
use time::Date;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
}

/// Read-only view over the `measurement` and `station` tables.
#[async_trait]
pub trait ClimateData: Send + Sync {
    /// Measurements dated on or after `since`, optionally for a single station, in storage order
    async fn measurements_since(
        &self,
        since: Date,
        station_id: Option<String>,
    ) -> Result<Vec<Measurement>, Error>;
    async fn stations(&self) -> Result<Vec<Station>, Error>;
    /// MIN/AVG/MAX of observed temperature; every field is `None` when no row matches
    async fn temperature_stats(&self, range: DateRange) -> Result<TemperatureStats, Error>;
}

pub struct ClimateAccess {
    pool: SqlitePool,
}

impl ClimateAccess {
    /// Builds the shared pool without touching the file; connections open on first use.
    pub fn new(path: &str, max_connections: u32) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_lazy_with(options);

        info!("climate data pool configured for: {}", path);
        Self { pool }
    }

    /// Check that the file opens and both tables are readable.
    pub async fn health_check(&self) -> Result<(), Error> {
        let measurements: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        let stations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM station")
            .fetch_one(&self.pool)
            .await?;
        info!(
            "climate data available: {} measurements, {} stations",
            measurements, stations
        );
        Ok(())
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn measurements_since(
        &self,
        since: Date,
        station_id: Option<String>,
    ) -> Result<Vec<Measurement>, Error> {
        let since = format_date(since);
        let rows = match station_id {
            Some(station_id) => {
                sqlx::query_as::<_, Measurement>(
                    "SELECT station, date, prcp, tobs FROM measurement
                     WHERE station = ? AND date >= ?
                     ORDER BY rowid",
                )
                .bind(station_id)
                .bind(&since)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Measurement>(
                    "SELECT station, date, prcp, tobs FROM measurement
                     WHERE date >= ?
                     ORDER BY rowid",
                )
                .bind(&since)
                .fetch_all(&self.pool)
                .await?
            }
        };
        debug!("retrieved {} measurements since {}", rows.len(), since);
        Ok(rows)
    }

    async fn stations(&self) -> Result<Vec<Station>, Error> {
        let rows = sqlx::query_as::<_, Station>(
            "SELECT station, name, latitude, longitude, elevation FROM station ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;
        debug!("retrieved {} stations", rows.len());
        Ok(rows)
    }

    async fn temperature_stats(&self, range: DateRange) -> Result<TemperatureStats, Error> {
        let start = format_date(range.start);
        let (min, avg, max): (Option<f64>, Option<f64>, Option<f64>) = match range.end {
            Some(end) => {
                sqlx::query_as(
                    "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement
                     WHERE date >= ? AND date <= ?",
                )
                .bind(&start)
                .bind(format_date(end))
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement
                     WHERE date >= ?",
                )
                .bind(&start)
                .fetch_one(&self.pool)
                .await?
            }
        };
        Ok(TemperatureStats { min, avg, max })
    }
}

/// One `measurement` row; nullable columns stay `None` rather than decoding to zero
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromRow)]
pub struct Measurement {
    #[sqlx(rename = "station")]
    pub station_id: String,
    /// ISO `YYYY-MM-DD`
    pub date: String,
    #[sqlx(rename = "prcp")]
    pub precipitation: Option<f64>,
    #[sqlx(rename = "tobs")]
    pub observed_temperature: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromRow)]
pub struct Station {
    #[sqlx(rename = "station")]
    pub station_id: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, ToSchema)]
pub struct TemperatureStats {
    #[serde(rename = "Min Temp")]
    pub min: Option<f64>,
    #[serde(rename = "Avg Temp")]
    pub avg: Option<f64>,
    #[serde(rename = "Max Temp")]
    pub max: Option<f64>,
}
