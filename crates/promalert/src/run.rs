use std::path::Path;

use crate::alert::{Evaluator, Outcome};
use crate::config::{load_from_file, LoadError, RulesConfig};
use crate::datasource::PromClient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rules: usize,
    pub triggered: usize,
    pub delivered: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        Self {
            rules: outcomes.len(),
            triggered: outcomes.iter().filter(|o| o.is_triggered()).count(),
            delivered: outcomes.iter().filter(|o| o.is_delivered()).count(),
            skipped: outcomes.iter().filter(|o| o.is_skipped()).count(),
        }
    }
}

/// Loads the rule file at `path` and evaluates every rule once.
pub async fn run_from_file(path: &Path) -> Result<RunSummary, LoadError> {
    let config = load_from_file(path)?;
    tracing::info!(path = %path.display(), rules = config.rules.len(), "rules loaded");

    let evaluator = Evaluator::new(PromClient::new());
    Ok(run(&config, &evaluator).await)
}

pub async fn run(config: &RulesConfig, evaluator: &Evaluator) -> RunSummary {
    let outcomes = evaluator.evaluate_all(&config.rules).await;
    let summary = RunSummary::from_outcomes(&outcomes);

    tracing::info!(
        rules = summary.rules,
        triggered = summary.triggered,
        delivered = summary.delivered,
        skipped = summary.skipped,
        "evaluation finished"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::RuleError;
    use crate::datasource::DatasourceError;

    #[test]
    fn summary_counts() {
        let outcomes = vec![
            Outcome::Triggered {
                value: 2.0,
                delivered: true,
            },
            Outcome::Triggered {
                value: 3.0,
                delivered: false,
            },
            Outcome::NotTriggered { value: 0.5 },
            Outcome::QueryFailed(DatasourceError::NoData),
            Outcome::Invalid(RuleError::EmptyName),
        ];
        let summary = RunSummary::from_outcomes(&outcomes);
        assert_eq!(
            summary,
            RunSummary {
                rules: 5,
                triggered: 2,
                delivered: 1,
                skipped: 2,
            }
        );
    }

    #[tokio::test]
    async fn missing_rule_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_from_file(&dir.path().join("rules.yaml")).await.unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_rule_file_runs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.yaml");
        std::fs::write(&path, "rules: []\n").unwrap();

        let summary = run_from_file(&path).await.unwrap();
        assert_eq!(summary, RunSummary::default());
    }
}
