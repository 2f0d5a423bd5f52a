use std::time::Duration;

use promalert_common::retry::{retry_async, RetryConfig};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;

use super::channel::{Sink, SinkError};
use crate::alert::AlertRecord;
use crate::config::MysqlExport;

pub const CONNECT_ATTEMPTS: u32 = 5;
pub const CONNECT_DELAY: Duration = Duration::from_secs(2);

const DEFAULT_HOST: &str = "127.0.0.1";

const CREATE_ALERTS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS alerts (
    id INT AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(255),
    description TEXT,
    value DOUBLE,
    timestamp DATETIME
)"#;

const INSERT_ALERT: &str =
    "INSERT INTO alerts (name, description, value, timestamp) VALUES (?, ?, ?, ?)";

/// Writes alerts into the `alerts` table of a MySQL database, creating the
/// table on first use. Each emit opens and closes its own connection.
pub struct MysqlSink {
    options: MySqlConnectOptions,
    endpoint: String,
    retry: RetryConfig,
}

impl MysqlSink {
    pub fn new(export: &MysqlExport) -> Self {
        Self::with_retry(export, RetryConfig::fixed(CONNECT_ATTEMPTS, CONNECT_DELAY))
    }

    pub fn with_retry(export: &MysqlExport, retry: RetryConfig) -> Self {
        let (host, port) = split_host(&export.host);

        let mut options = MySqlConnectOptions::new()
            .host(host)
            .username(&export.user)
            .password(&export.password);
        if let Some(port) = port {
            options = options.port(port);
        }
        if !export.database.is_empty() {
            options = options.database(&export.database);
        }

        Self {
            options,
            endpoint: format!("{}/{}", export.host, export.database),
            retry,
        }
    }

    async fn connect(&self) -> Result<MySqlConnection, SinkError> {
        let options = &self.options;
        let max_attempts = self.retry.max_attempts;
        retry_async(&self.retry, move |attempt| async move {
            tracing::debug!(attempt, max_attempts, "connecting to MySQL");
            let mut conn = MySqlConnection::connect_with(options).await?;
            conn.ping().await?;
            Ok::<_, sqlx::Error>(conn)
        })
        .await
        .map_err(SinkError::Connect)
    }
}

#[async_trait::async_trait]
impl Sink for MysqlSink {
    fn name(&self) -> &str {
        "mysql"
    }

    async fn emit(&self, alert: &AlertRecord) -> Result<(), SinkError> {
        let mut conn = self.connect().await?;
        let result = write_alert(&mut conn, alert).await;

        if let Err(e) = conn.close().await {
            tracing::warn!(db = %self.endpoint, error = %e, "failed to close MySQL connection");
        }

        if result.is_ok() {
            tracing::info!(db = %self.endpoint, rule = %alert.name, "alert written to MySQL");
        }
        result
    }
}

async fn write_alert(conn: &mut MySqlConnection, alert: &AlertRecord) -> Result<(), SinkError> {
    sqlx::query(CREATE_ALERTS_TABLE)
        .execute(&mut *conn)
        .await
        .map_err(SinkError::Schema)?;

    sqlx::query(INSERT_ALERT)
        .bind(&alert.name)
        .bind(&alert.description)
        .bind(alert.value)
        .bind(alert.timestamp.naive_utc())
        .execute(&mut *conn)
        .await
        .map_err(SinkError::Insert)?;

    Ok(())
}

/// Splits `host[:port]`. An empty host means the local default.
fn split_host(host: &str) -> (&str, Option<u16>) {
    if host.is_empty() {
        return (DEFAULT_HOST, None);
    }
    match host.rsplit_once(':') {
        Some((h, p)) if !h.contains(':') => match p.parse() {
            Ok(port) => (h, Some(port)),
            Err(_) => (host, None),
        },
        _ => (host, None),
    }
}
