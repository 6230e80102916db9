use std::path::PathBuf;
use tranchesel::engine::config as core_config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub scores: PathBuf,
    pub collections: PathBuf,
    pub tranches: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub inputs: InputPaths,
    pub output_path: PathBuf,
    pub core_config: core_config::SelectionConfig,
}
