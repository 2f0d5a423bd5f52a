use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_RULES_PATH;

#[derive(Debug, Parser)]
#[command(
    name = "promalert",
    version,
    about = "Evaluate threshold rules against a Prometheus-compatible datasource"
)]
pub struct Opts {
    #[arg(short, long, default_value = DEFAULT_RULES_PATH, help = "Path to the rule file")]
    pub config: PathBuf,
}
