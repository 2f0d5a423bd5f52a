//! Prometheus instant-query response body.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromResponse {
    #[serde(default)]
    pub status: String,
    pub data: PromData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromData {
    #[serde(rename = "resultType", default)]
    pub result_type: String,
    #[serde(default)]
    pub result: Vec<PromSample>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromSample {
    #[serde(default)]
    pub metric: HashMap<String, String>,
    pub value: SampleValue,
}

/// `[<epoch seconds>, "<value>"]` pair as sent on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleValue(pub f64, pub String);

impl PromResponse {
    pub fn first_sample(&self) -> Option<&PromSample> {
        self.data.result.first()
    }

    pub fn series_count(&self) -> usize {
        self.data.result.len()
    }
}

impl PromSample {
    pub fn raw_value(&self) -> &str {
        &self.value.1
    }

    pub fn parse_value(&self) -> Result<f64, std::num::ParseFloatError> {
        self.value.1.trim().parse()
    }
}
