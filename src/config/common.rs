//! Common configuration structures shared across commands

use std::path::PathBuf;

use crate::common::{CommonArgs, ConfigBuilder};
use crate::constants::analysis::DEFAULT_MAX_SCC_SIZE;
use crate::constants::snapshot::DEFAULT_PATTERN;
use crate::error::UnwireError;
use crate::injection_filter::InjectionFilter;

/// Where snapshots come from and which parts of the graph get analyzed
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Snapshot files or directories
    pub paths: Vec<PathBuf>,
    /// File name pattern of snapshots found inside directories
    pub pattern: String,
    /// Explicit `unwire.toml`
    pub config_file: Option<PathBuf>,
    /// Injection kinds the graph records
    pub filter: InjectionFilter,
    /// Largest component whose cycles are enumerated
    pub max_scc_size: usize,
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    pub fn from_args(args: &CommonArgs) -> Result<Self, UnwireError> {
        Self::builder()
            .with_paths(args.get_paths())
            .with_pattern(args.pattern.clone())
            .with_config_file(args.config.clone())
            .with_filter(InjectionFilter::from(args))
            .with_max_scc_size(args.max_scc_size)
            .build()
    }
}

/// Builder for AnalysisConfig; everything but `paths` has a default
#[derive(Default)]
pub struct AnalysisConfigBuilder {
    paths: Option<Vec<PathBuf>>,
    pattern: Option<String>,
    config_file: Option<PathBuf>,
    filter: InjectionFilter,
    max_scc_size: Option<usize>,
}

impl AnalysisConfigBuilder {
    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn with_pattern(mut self, pattern: String) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_config_file(mut self, config_file: Option<PathBuf>) -> Self {
        self.config_file = config_file;
        self
    }

    pub fn with_filter(mut self, filter: InjectionFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_max_scc_size(mut self, max_scc_size: usize) -> Self {
        self.max_scc_size = Some(max_scc_size);
        self
    }
}

impl ConfigBuilder for AnalysisConfigBuilder {
    type Config = AnalysisConfig;

    fn build(self) -> Result<Self::Config, UnwireError> {
        let max_scc_size = self.max_scc_size.unwrap_or(DEFAULT_MAX_SCC_SIZE);
        if max_scc_size < 2 {
            return Err(UnwireError::ConfigurationError {
                message: format!("max_scc_size must be at least 2, got {max_scc_size}"),
            });
        }

        Ok(AnalysisConfig {
            paths: self
                .paths
                .ok_or_else(|| UnwireError::ConfigurationError {
                    message: "Missing required field: paths".to_string(),
                })?,
            pattern: self.pattern.unwrap_or_else(|| DEFAULT_PATTERN.to_string()),
            config_file: self.config_file,
            filter: self.filter,
            max_scc_size,
        })
    }
}
