mod client;

pub use client::{DatasourceError, PromClient};
