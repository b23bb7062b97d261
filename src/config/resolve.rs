//! Resolve command configuration

use std::path::PathBuf;

use crate::cli::{EmitFormat, OutputFormat};
use crate::config::AnalysisConfig;

#[derive(Debug, Clone)]
pub struct ResolveConfig {
    pub analysis: AnalysisConfig,
    /// Output format for the resolution report
    pub format: OutputFormat,
    /// Root that rewritten declarations are written under
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub emit: EmitFormat,
    /// Whether to exit with error code if a cycle is left unresolved
    pub error_on_unresolved: bool,
}

impl ResolveConfig {
    pub fn builder() -> ResolveConfigBuilder {
        ResolveConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct ResolveConfigBuilder {
    analysis: Option<AnalysisConfig>,
    format: Option<OutputFormat>,
    output_dir: Option<PathBuf>,
    dry_run: Option<bool>,
    emit: Option<EmitFormat>,
    error_on_unresolved: Option<bool>,
}

impl ResolveConfigBuilder {
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

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = Some(dry_run);
        self
    }

    pub fn with_emit(mut self, emit: EmitFormat) -> Self {
        self.emit = Some(emit);
        self
    }

    pub fn with_error_on_unresolved(mut self, error_on_unresolved: bool) -> Self {
        self.error_on_unresolved = Some(error_on_unresolved);
        self
    }
}

impl crate::common::ConfigBuilder for ResolveConfigBuilder {
    type Config = ResolveConfig;

    fn build(self) -> Result<Self::Config, crate::error::UnwireError> {
        Ok(ResolveConfig {
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
            output_dir: self.output_dir.ok_or_else(|| {
                crate::error::UnwireError::ConfigurationError {
                    message: "Missing required field: output_dir".to_string(),
                }
            })?,
            dry_run: self.dry_run.ok_or_else(|| {
                crate::error::UnwireError::ConfigurationError {
                    message: "Missing required field: dry_run".to_string(),
                }
            })?,
            emit: self.emit.ok_or_else(|| {
                crate::error::UnwireError::ConfigurationError {
                    message: "Missing required field: emit".to_string(),
                }
            })?,
            error_on_unresolved: self.error_on_unresolved.ok_or_else(|| {
                crate::error::UnwireError::ConfigurationError {
                    message: "Missing required field: error_on_unresolved".to_string(),
                }
            })?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ConfigBuilder;

    #[test]
    fn test_missing_field_named_in_error() {
        let analysis = AnalysisConfig::builder()
            .with_paths(vec![PathBuf::from(".")])
            .build()
            .unwrap();
        let error = ResolveConfig::builder()
            .with_analysis(analysis)
            .with_format(OutputFormat::Human)
            .with_output_dir(PathBuf::from("out"))
            .with_dry_run(false)
            .with_emit(EmitFormat::Json)
            .build()
            .unwrap_err();

        assert!(error.to_string().contains("error_on_unresolved"));
    }
}
