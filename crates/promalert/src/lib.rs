pub mod alert;
pub mod cli;
pub mod config;
pub mod datasource;
pub mod run;
pub mod sink;
