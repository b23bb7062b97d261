//! Detect command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::{AnalysisConfig, DetectConfig};
use crate::error::UnwireError;

impl FromCommand for DetectConfig {
    fn from_command(command: Commands) -> Result<Self, UnwireError> {
        match command {
            Commands::Detect {
                common,
                format,
                cycle_display,
                error_on_cycles,
            } => DetectConfig::builder()
                .with_analysis(AnalysisConfig::from_args(&common)?)
                .with_format(format.format)
                .with_max_cycles(cycle_display.max_cycles)
                .with_error_on_cycles(error_on_cycles)
                .build(),
            _ => Err(UnwireError::ConfigurationError {
                message: "Invalid command type for DetectConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(DetectConfig);

/// Execute the detect command for finding dependency-injection cycles
pub fn execute_detect_command(command: Commands) -> Result<()> {
    let config = DetectConfig::from_command(command)
        .wrap_err("Failed to parse detect command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::detect::DetectExecutor;
    DetectExecutor::execute(config)
}
