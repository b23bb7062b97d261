//! Common functionality shared across commands

use std::path::PathBuf;

use clap::Args;

use crate::constants::analysis::DEFAULT_MAX_SCC_SIZE;
use crate::constants::snapshot::DEFAULT_PATTERN;

/// Common arguments shared by multiple commands
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Snapshot files or directories to analyze (defaults to current
    /// directory)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// File name pattern of declaration snapshots
    #[arg(long, default_value = DEFAULT_PATTERN, env = "UNWIRE_PATTERN")]
    pub pattern: String,

    /// Marker configuration file (defaults to unwire.toml next to the first
    /// path)
    #[arg(long, value_name = "FILE", env = "UNWIRE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ignore field injection points
    #[arg(long, env = "UNWIRE_EXCLUDE_FIELD")]
    pub exclude_field: bool,

    /// Ignore setter injection points
    #[arg(long, env = "UNWIRE_EXCLUDE_SETTER")]
    pub exclude_setter: bool,

    /// Ignore constructor injection points
    #[arg(long, env = "UNWIRE_EXCLUDE_CONSTRUCTOR")]
    pub exclude_constructor: bool,

    /// Ignore factory-method injection points
    #[arg(long, env = "UNWIRE_EXCLUDE_FACTORY")]
    pub exclude_factory: bool,

    /// Largest strongly connected component whose cycles are enumerated
    #[arg(long, default_value_t = DEFAULT_MAX_SCC_SIZE, env = "UNWIRE_MAX_SCC_SIZE")]
    pub max_scc_size: usize,
}

/// Common output format arguments
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = crate::constants::output::DEFAULT_FORMAT, env = "UNWIRE_FORMAT")]
    pub format: crate::cli::OutputFormat,
}

/// Common cycle display arguments
#[derive(Args, Debug, Clone)]
pub struct CycleDisplayArgs {
    /// Maximum number of cyclic groups to display (shows all by default)
    #[arg(long, env = "UNWIRE_MAX_CYCLES")]
    pub max_cycles: Option<usize>,
}

impl CommonArgs {
    /// Get paths, using current directory if none provided
    pub fn get_paths(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            vec![std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))]
        } else {
            self.paths.clone()
        }
    }
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::UnwireError>;
}

/// Trait for configurations that can be created from CLI commands
pub trait FromCommand: Sized {
    /// The command variant that this config can be created from
    fn from_command(command: crate::cli::Commands) -> Result<Self, crate::error::UnwireError>;
}

/// Macro to implement `TryFrom<Commands>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Commands> for $config {
            type Error = $crate::error::UnwireError;

            fn try_from(command: $crate::cli::Commands) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}
