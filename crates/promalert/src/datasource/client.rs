use promalert_common::prom_response::PromResponse;
use reqwest::{Client, StatusCode};

#[derive(Debug)]
pub enum DatasourceError {
    Transport(reqwest::Error),
    Status(u16),
    Decode(serde_json::Error),
    NoData,
    InvalidValue(String),
}

impl std::fmt::Display for DatasourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Status(code) => write!(f, "bad status code: {code}"),
            Self::Decode(e) => write!(f, "decode: {e}"),
            Self::NoData => write!(f, "no results"),
            Self::InvalidValue(raw) => write!(f, "invalid sample value {raw:?}"),
        }
    }
}

impl std::error::Error for DatasourceError {}

impl From<reqwest::Error> for DatasourceError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e)
    }
}

impl From<serde_json::Error> for DatasourceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e)
    }
}

/// Instant-query client for Prometheus-compatible HTTP APIs.
pub struct PromClient {
    client: Client,
}

impl PromClient {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Runs `query` against the instant-query endpoint at `url` and returns
    /// the scalar of the first series.
    pub async fn query(&self, url: &str, query: &str) -> Result<f64, DatasourceError> {
        let resp = self
            .client
            .get(url)
            .query(&[("query", query)])
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(DatasourceError::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        let parsed: PromResponse = serde_json::from_slice(&body)?;

        let sample = parsed.first_sample().ok_or(DatasourceError::NoData)?;
        if parsed.series_count() > 1 {
            tracing::warn!(
                series = parsed.series_count(),
                "query returned multiple series, using the first"
            );
        }

        sample
            .parse_value()
            .map_err(|_| DatasourceError::InvalidValue(sample.raw_value().to_string()))
    }
}

impl Default for PromClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::get;
    use axum::Router;
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api/v1/query")
    }

    fn vector_body(values: &[&str]) -> String {
        let result: Vec<String> = values
            .iter()
            .map(|v| format!(r#"{{"metric":{{}},"value":[1700000000,"{v}"]}}"#))
            .collect();
        format!(
            r#"{{"status":"success","data":{{"resultType":"vector","result":[{}]}}}}"#,
            result.join(",")
        )
    }

    fn fixed(status: AxumStatus, body: String) -> Router {
        Router::new().route(
            "/api/v1/query",
            get(move || {
                let body = body.clone();
                async move { (status, body) }
            }),
        )
    }

    #[tokio::test]
    async fn returns_first_sample_value() {
        let url = serve(fixed(AxumStatus::OK, vector_body(&["42.5", "1"]))).await;
        let value = PromClient::new().query(&url, "up").await.unwrap();
        assert_eq!(value, 42.5);
    }

    #[tokio::test]
    async fn query_is_form_encoded() {
        let app = Router::new().route(
            "/api/v1/query",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let q = params.get("query").cloned().unwrap_or_default();
                let ok = q == r#"sum(rate(http_requests_total{code="500"}[5m])) by (job) & x=#"#;
                let value = if ok { "1" } else { "0" };
                format!(
                    r#"{{"status":"success","data":{{"resultType":"vector","result":[{{"metric":{{}},"value":[1,"{value}"]}}]}}}}"#
                )
            }),
        );
        let url = serve(app).await;
        let value = PromClient::new()
            .query(
                &url,
                r#"sum(rate(http_requests_total{code="500"}[5m])) by (job) & x=#"#,
            )
            .await
            .unwrap();
        assert_eq!(value, 1.0);
    }

    #[tokio::test]
    async fn empty_result_is_no_data() {
        let url = serve(fixed(AxumStatus::OK, vector_body(&[]))).await;
        let err = PromClient::new().query(&url, "up").await.unwrap_err();
        assert!(matches!(err, DatasourceError::NoData));
        assert_eq!(err.to_string(), "no results");
    }

    #[tokio::test]
    async fn non_200_is_status_error() {
        let url = serve(fixed(AxumStatus::SERVICE_UNAVAILABLE, String::new())).await;
        let err = PromClient::new().query(&url, "up").await.unwrap_err();
        assert!(matches!(err, DatasourceError::Status(503)));
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let url = serve(fixed(AxumStatus::OK, "<html>".into())).await;
        let err = PromClient::new().query(&url, "up").await.unwrap_err();
        assert!(matches!(err, DatasourceError::Decode(_)));
    }

    #[tokio::test]
    async fn non_numeric_value_is_rejected() {
        let url = serve(fixed(AxumStatus::OK, vector_body(&["n/a"]))).await;
        let err = PromClient::new().query(&url, "up").await.unwrap_err();
        assert!(matches!(err, DatasourceError::InvalidValue(ref v) if v == "n/a"));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{addr}/api/v1/query");
        let err = PromClient::new().query(&url, "up").await.unwrap_err();
        assert!(matches!(err, DatasourceError::Transport(_)));
    }
}
