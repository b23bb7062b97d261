//! Graph command configuration

use std::path::PathBuf;

use crate::cli::GraphFormat;
use crate::config::AnalysisConfig;

#[derive(Debug, Clone)]
pub struct GraphOptions {
    pub analysis: AnalysisConfig,
    pub format: GraphFormat,
    pub output: Option<PathBuf>,
    pub highlight_cycles: bool,
    pub show_members: bool,
}

impl GraphOptions {
    pub fn builder() -> GraphOptionsBuilder {
        GraphOptionsBuilder::new()
    }
}

#[derive(Default)]
pub struct GraphOptionsBuilder {
    analysis: Option<AnalysisConfig>,
    format: Option<GraphFormat>,
    output: Option<Option<PathBuf>>,
    highlight_cycles: Option<bool>,
    show_members: Option<bool>,
}

impl GraphOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_highlight_cycles(mut self, highlight_cycles: bool) -> Self {
        self.highlight_cycles = Some(highlight_cycles);
        self
    }

    pub fn with_show_members(mut self, show_members: bool) -> Self {
        self.show_members = Some(show_members);
        self
    }
}

impl crate::common::ConfigBuilder for GraphOptionsBuilder {
    type Config = GraphOptions;

    fn build(self) -> Result<Self::Config, crate::error::UnwireError> {
        Ok(GraphOptions {
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
            output: self.output.ok_or_else(|| {
                crate::error::UnwireError::ConfigurationError {
                    message: "Missing required field: output".to_string(),
                }
            })?,
            highlight_cycles: self.highlight_cycles.ok_or_else(|| {
                crate::error::UnwireError::ConfigurationError {
                    message: "Missing required field: highlight_cycles".to_string(),
                }
            })?,
            show_members: self.show_members.ok_or_else(|| {
                crate::error::UnwireError::ConfigurationError {
                    message: "Missing required field: show_members".to_string(),
                }
            })?,
        })
    }
}
