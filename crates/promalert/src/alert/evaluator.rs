use promalert_common::retry::RetryConfig;

use super::condition::{Condition, RuleError};
use super::record::AlertRecord;
use crate::config::{ExportTarget, Rule};
use crate::datasource::{DatasourceError, PromClient};
use crate::sink::{FileSink, MysqlSink, Sink, SinkError, CONNECT_ATTEMPTS, CONNECT_DELAY};

/// What happened to a single rule during one evaluation.
#[derive(Debug)]
pub enum Outcome {
    Invalid(RuleError),
    QueryFailed(DatasourceError),
    NotTriggered { value: f64 },
    Triggered { value: f64, delivered: bool },
}

impl Outcome {
    pub fn is_triggered(&self) -> bool {
        matches!(self, Self::Triggered { .. })
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Triggered { delivered: true, .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Invalid(_) | Self::QueryFailed(_))
    }
}

pub struct Evaluator {
    client: PromClient,
    mysql_retry: RetryConfig,
}

impl Evaluator {
    pub fn new(client: PromClient) -> Self {
        Self {
            client,
            mysql_retry: RetryConfig::fixed(CONNECT_ATTEMPTS, CONNECT_DELAY),
        }
    }

    pub fn with_mysql_retry(mut self, retry: RetryConfig) -> Self {
        self.mysql_retry = retry;
        self
    }

    /// Evaluates rules one after another in declaration order. A failing
    /// rule never stops the ones after it.
    pub async fn evaluate_all(&self, rules: &[Rule]) -> Vec<Outcome> {
        let mut outcomes = Vec::with_capacity(rules.len());
        for rule in rules {
            outcomes.push(self.evaluate(rule).await);
        }
        outcomes
    }

    pub async fn evaluate(&self, rule: &Rule) -> Outcome {
        let (condition, sink) = match self.prepare(rule) {
            Ok(prepared) => prepared,
            Err(e) => {
                tracing::warn!(
                    rule = %rule.name,
                    datastore = rule.export.datastore(),
                    error = %e,
                    "rule invalid, skipping"
                );
                return Outcome::Invalid(e);
            }
        };

        let value = match self.client.query(&rule.datasource.url, &rule.query).await {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(
                    rule = %rule.name,
                    datasource = %rule.datasource.name,
                    error = %e,
                    "error querying datasource"
                );
                return Outcome::QueryFailed(e);
            }
        };

        if !condition.evaluate(value, rule.threshold) {
            tracing::info!(
                rule = %rule.name,
                value,
                condition = condition.as_str(),
                threshold = rule.threshold,
                "rule not triggered"
            );
            return Outcome::NotTriggered { value };
        }

        tracing::info!(
            rule = %rule.name,
            value,
            condition = condition.as_str(),
            threshold = rule.threshold,
            "rule triggered"
        );

        let alert = AlertRecord::now(rule, value);
        let delivered = match sink.emit(&alert).await {
            Ok(()) => true,
            Err(e) => {
                log_sink_error(rule, sink.name(), &e);
                false
            }
        };

        Outcome::Triggered { value, delivered }
    }

    fn prepare(&self, rule: &Rule) -> Result<(Condition, Box<dyn Sink>), RuleError> {
        if rule.name.trim().is_empty() {
            return Err(RuleError::EmptyName);
        }
        let condition = Condition::parse(&rule.condition)?;
        if rule.datasource.url.trim().is_empty() {
            return Err(RuleError::MissingDatasourceUrl);
        }
        if !rule.threshold.is_finite() {
            return Err(RuleError::NonFiniteThreshold(rule.threshold));
        }

        let sink: Box<dyn Sink> = match &rule.export.target {
            ExportTarget::File(file) => Box::new(FileSink::new(&file.path)),
            ExportTarget::Mysql(mysql) => {
                Box::new(MysqlSink::with_retry(mysql, self.mysql_retry.clone()))
            }
            ExportTarget::Unsupported(_) => {
                return Err(RuleError::UnknownDatastore(
                    rule.export.datastore().to_string(),
                ))
            }
        };

        Ok((condition, sink))
    }
}

fn log_sink_error(rule: &Rule, sink: &str, err: &SinkError) {
    tracing::error!(rule = %rule.name, sink, error = %err, "error exporting alert, dropped");
}
