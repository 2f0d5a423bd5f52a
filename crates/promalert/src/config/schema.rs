use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RulesConfig {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// A single alerting rule. Only structure is checked at load time; the
/// evaluator decides whether the condition and export are usable.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Rule {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub query: String,
    pub threshold: f64,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub datasource: Datasource,
    #[serde(default)]
    pub export: Export,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Datasource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(from = "RawExport")]
pub struct Export {
    pub target: ExportTarget,
    /// Accepted for compatibility with existing rule files, never acted on.
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportTarget {
    File(FileExport),
    Mysql(MysqlExport),
    Unsupported(String),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FileExport {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MysqlExport {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

impl Export {
    pub fn datastore(&self) -> &str {
        match &self.target {
            ExportTarget::File(_) => "file",
            ExportTarget::Mysql(_) => "mysql",
            ExportTarget::Unsupported(other) => other,
        }
    }
}

impl Default for Export {
    fn default() -> Self {
        Self {
            target: ExportTarget::Unsupported(String::new()),
            action: None,
        }
    }
}

#[derive(Deserialize)]
struct RawExport {
    #[serde(default)]
    datastore: String,
    #[serde(default)]
    file: Option<FileExport>,
    #[serde(default)]
    mysql: Option<MysqlExport>,
    #[serde(default)]
    action: Option<String>,
}

impl From<RawExport> for Export {
    fn from(raw: RawExport) -> Self {
        let target = match raw.datastore.as_str() {
            "file" => ExportTarget::File(raw.file.unwrap_or_default()),
            "mysql" => ExportTarget::Mysql(raw.mysql.unwrap_or_default()),
            _ => ExportTarget::Unsupported(raw.datastore),
        };
        Self {
            target,
            action: raw.action,
        }
    }
}
