use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::config::Rule;

/// The record emitted for a triggered rule.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlertRecord {
    pub name: String,
    pub description: String,
    pub value: f64,
    #[serde(serialize_with = "rfc3339_seconds")]
    pub timestamp: DateTime<Utc>,
}

impl AlertRecord {
    pub fn new(rule: &Rule, value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: rule.name.clone(),
            description: rule.description.clone(),
            value,
            timestamp,
        }
    }

    pub fn now(rule: &Rule, value: f64) -> Self {
        Self::new(rule, value, Utc::now())
    }
}

fn rfc3339_seconds<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_from_str;
    use chrono::TimeZone;

    #[test]
    fn serializes_in_field_order() {
        let cfg = load_from_str(
            "rules:\n  - name: high_cpu\n    description: \"CPU \\\"hot\\\"\"\n    query: up\n    threshold: 1\n",
        )
        .unwrap();
        let ts = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap();
        let record = AlertRecord::new(&cfg.rules[0], 42.5, ts);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"name":"high_cpu","description":"CPU \"hot\"","value":42.5,"timestamp":"2023-11-14T22:13:20Z"}"#
        );
    }
}
