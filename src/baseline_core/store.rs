//! MySQL data access for the four baseline statements
//!
//! One connection per run, acquired once and reused for every statement.
//! The store is read-only from this job's point of view; rows come back as
//! plain typed structs, no object graph.

use super::config::StoreConfig;
use super::error::BaselineError;
use super::query::{SqlValue, Statement};
use chrono::NaiveDateTime;
use sqlx::mysql::{MySql, MySqlConnectOptions, MySqlRow};
use sqlx::{Connection, FromRow, MySqlConnection};

/// One row of the event listing (also the shape of the top-events result).
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub monitor_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub length: f64,
    pub alarm_frames: i64,
    pub avg_score: i64,
    pub max_score: i64,
    pub tot_score: i64,
    pub cause: Option<String>,
    pub notes: Option<String>,
}

/// One (monitor, hour) group from the hourly rollup statement.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct HourlyRow {
    pub monitor_id: i64,
    pub hour: String,
    pub events: i64,
    pub avg_max_score: f64,
    pub peak_max_score: i64,
    pub alarm_frames: i64,
}

/// One (monitor, zone) group from the zone summary statement.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ZoneRow {
    pub monitor_id: i64,
    pub zone_name: String,
    pub triggers: i64,
    pub avg_score: f64,
    pub peak_score: i64,
    pub avg_alarm_pixels: f64,
    pub avg_blobs: f64,
}

pub struct EventStore {
    conn: MySqlConnection,
}

impl EventStore {
    pub async fn connect(config: &StoreConfig) -> Result<Self, BaselineError> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let conn = MySqlConnection::connect_with(&options).await?;
        log::info!(
            "🔌 Connected to event store {}:{}/{}",
            config.host,
            config.port,
            config.database
        );

        Ok(Self { conn })
    }

    pub async fn fetch_events(
        &mut self,
        statement: &Statement,
    ) -> Result<Vec<EventRow>, BaselineError> {
        self.fetch(statement).await
    }

    pub async fn fetch_hourly(
        &mut self,
        statement: &Statement,
    ) -> Result<Vec<HourlyRow>, BaselineError> {
        self.fetch(statement).await
    }

    pub async fn fetch_zone_rows(
        &mut self,
        statement: &Statement,
    ) -> Result<Vec<ZoneRow>, BaselineError> {
        self.fetch(statement).await
    }

    pub async fn fetch_top_events(
        &mut self,
        statement: &Statement,
    ) -> Result<Vec<EventRow>, BaselineError> {
        self.fetch(statement).await
    }

    async fn fetch<T>(&mut self, statement: &Statement) -> Result<Vec<T>, BaselineError>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<MySql, T>(&statement.sql);
        for param in &statement.params {
            query = match *param {
                SqlValue::Int(v) => query.bind(v),
                SqlValue::DateTime(v) => query.bind(v),
            };
        }
        Ok(query.fetch_all(&mut self.conn).await?)
    }

    /// Release the connection. Dropping the store closes it too; this just
    /// makes the happy path explicit.
    pub async fn close(self) -> Result<(), BaselineError> {
        self.conn.close().await?;
        Ok(())
    }
}
