//! Detect command configuration

use crate::cli::OutputFormat;
use crate::config::AnalysisConfig;

/// Configuration for the detect command
///
/// This struct contains all options for detecting and reporting
/// dependency-injection cycles.
#[derive(Debug, Clone)]
pub struct DetectConfig {
    pub analysis: AnalysisConfig,
    /// Output format for the report
    pub format: OutputFormat,
    /// Maximum number of cyclic groups to report (None = all)
    pub max_cycles: Option<usize>,
    /// Whether to exit with error code if cycles are found
    pub error_on_cycles: bool,
}

impl DetectConfig {
    pub fn builder() -> DetectConfigBuilder {
        DetectConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct DetectConfigBuilder {
    analysis: Option<AnalysisConfig>,
    format: Option<OutputFormat>,
    max_cycles: Option<Option<usize>>,
    error_on_cycles: Option<bool>,
}

impl DetectConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: Option<usize>) -> Self {
        self.max_cycles = Some(max_cycles);
        self
    }

    pub fn with_error_on_cycles(mut self, error_on_cycles: bool) -> Self {
        self.error_on_cycles = Some(error_on_cycles);
        self
    }
}

impl crate::common::ConfigBuilder for DetectConfigBuilder {
    type Config = DetectConfig;

    fn build(self) -> Result<Self::Config, crate::error::UnwireError> {
        Ok(DetectConfig {
            analysis: self.analysis.ok_or_else(|| {
                crate::error::UnwireError::ConfigurationError {
                    message: "Missing required field: analysis".to_string(),
                }
            })?,
            format: self.format.ok_or_else(|| {
                crate::error::UnwireError::ConfigurationError {
                    message: "Missing required field: format".to_string(),
                }
            })?,
            max_cycles: self.max_cycles.ok_or_else(|| {
                crate::error::UnwireError::ConfigurationError {
                    message: "Missing required field: max_cycles".to_string(),
                }
            })?,
            error_on_cycles: self.error_on_cycles.ok_or_else(|| {
                crate::error::UnwireError::ConfigurationError {
                    message: "Missing required field: error_on_cycles".to_string(),
                }
            })?,
        })
    }
}
