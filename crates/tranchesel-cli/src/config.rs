//! Layered configuration for the command line: built-in defaults, an optional
//! TOML file, `--set` overrides and explicit arguments, in increasing priority.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::{AppConfig, InputPaths};
