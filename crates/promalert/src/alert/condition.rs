#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    GreaterThan,
    LessThan,
}

impl Condition {
    pub fn parse(raw: &str) -> Result<Self, RuleError> {
        match raw.trim() {
            ">" => Ok(Self::GreaterThan),
            "<" => Ok(Self::LessThan),
            other => Err(RuleError::UnknownCondition(other.to_string())),
        }
    }

    /// Strict comparison: equal values never trigger and NaN never does.
    pub fn evaluate(&self, value: f64, threshold: f64) -> bool {
        match self {
            Self::GreaterThan => value > threshold,
            Self::LessThan => value < threshold,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuleError {
    EmptyName,
    UnknownCondition(String),
    MissingDatasourceUrl,
    NonFiniteThreshold(f64),
    UnknownDatastore(String),
}

impl std::fmt::Display for RuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "rule name must not be empty"),
            Self::UnknownCondition(c) => write!(f, "unknown condition {c:?}"),
            Self::MissingDatasourceUrl => write!(f, "datasource.url must not be empty"),
            Self::NonFiniteThreshold(t) => write!(f, "threshold must be finite, got {t}"),
            Self::UnknownDatastore(d) => write!(f, "unknown datastore {d:?}"),
        }
    }
}

impl std::error::Error for RuleError {}
