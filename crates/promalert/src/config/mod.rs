mod loader;
mod schema;

pub use loader::{load_from_file, load_from_str, LoadError, DEFAULT_RULES_PATH};
pub use schema::{Datasource, Export, ExportTarget, FileExport, MysqlExport, Rule, RulesConfig};
