use crate::alert::AlertRecord;

#[async_trait::async_trait]
pub trait Sink: Send + Sync {
    fn name(&self) -> &str;
    async fn emit(&self, alert: &AlertRecord) -> Result<(), SinkError>;
}

#[derive(Debug)]
pub enum SinkError {
    Open(std::io::Error),
    Write(std::io::Error),
    Encode(serde_json::Error),
    NonFinite(f64),
    Connect(sqlx::Error),
    Schema(sqlx::Error),
    Insert(sqlx::Error),
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(e) => write!(f, "open: {e}"),
            Self::Write(e) => write!(f, "write: {e}"),
            Self::Encode(e) => write!(f, "encode: {e}"),
            Self::NonFinite(v) => write!(f, "encode: value {v} has no JSON representation"),
            Self::Connect(e) => write!(f, "connect: {e}"),
            Self::Schema(e) => write!(f, "create table: {e}"),
            Self::Insert(e) => write!(f, "insert: {e}"),
        }
    }
}

impl std::error::Error for SinkError {}
