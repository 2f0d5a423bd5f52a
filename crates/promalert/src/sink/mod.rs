mod channel;
mod file;
mod mysql;

pub use channel::{Sink, SinkError};
pub use file::FileSink;
pub use mysql::{MysqlSink, CONNECT_ATTEMPTS, CONNECT_DELAY};
