//! Resolve command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::{AnalysisConfig, ResolveConfig};
use crate::error::UnwireError;

impl FromCommand for ResolveConfig {
    fn from_command(command: Commands) -> Result<Self, UnwireError> {
        match command {
            Commands::Resolve {
                common,
                format,
                output_dir,
                dry_run,
                emit,
                error_on_unresolved,
            } => ResolveConfig::builder()
                .with_analysis(AnalysisConfig::from_args(&common)?)
                .with_format(format.format)
                .with_output_dir(output_dir)
                .with_dry_run(dry_run)
                .with_emit(emit)
                .with_error_on_unresolved(error_on_unresolved)
                .build(),
            _ => Err(UnwireError::ConfigurationError {
                message: "Invalid command type for ResolveConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(ResolveConfig);

/// Execute the resolve command for breaking dependency-injection cycles
pub fn execute_resolve_command(command: Commands) -> Result<()> {
    let config = ResolveConfig::from_command(command)
        .wrap_err("Failed to parse resolve command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::resolve::ResolveExecutor;
    ResolveExecutor::execute(config)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, EmitFormat};

    #[test]
    fn test_resolve_config_from_cli() {
        let cli = Cli::try_parse_from([
            "unwire",
            "resolve",
            "snapshots",
            "--dry-run",
            "--emit",
            "json",
            "--output-dir",
            "out",
            "--exclude-setter",
        ])
        .unwrap();

        let config = ResolveConfig::try_from(cli.command).unwrap();
        assert!(config.dry_run);
        assert_eq!(config.emit, EmitFormat::Json);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.analysis.paths, vec![PathBuf::from("snapshots")]);
        assert!(
            !config
                .analysis
                .filter
                .includes(crate::graph::InjectionKind::Setter)
        );
    }

    #[test]
    fn test_wrong_command_rejected() {
        let cli = Cli::try_parse_from(["unwire", "graph"]).unwrap();
        assert!(ResolveConfig::from_command(cli.command).is_err());
    }
}
