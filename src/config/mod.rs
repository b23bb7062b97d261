//! # Configuration Module
//!
//! Configuration structures for all unwire commands, plus the marker
//! configuration read from `unwire.toml`. Each command has its own config
//! module with a builder for easy construction.
//!
//! ## Command Configurations
//!
//! - **DetectConfig**: Configuration for the `detect` command
//! - **ResolveConfig**: Configuration for the `resolve` command
//! - **GraphOptions**: Configuration for the `graph` command
//!
//! All three share an [`AnalysisConfig`] describing where snapshots come from
//! and which injection points count.
//!
//! ## Example
//!
//! ```
//! use unwire::cli::{EmitFormat, OutputFormat};
//! use unwire::common::ConfigBuilder;
//! use unwire::config::{AnalysisConfig, ResolveConfig};
//!
//! # fn main() -> Result<(), unwire::error::UnwireError> {
//! let analysis = AnalysisConfig::builder()
//!     .with_paths(vec!["snapshots".into()])
//!     .build()?;
//!
//! let config = ResolveConfig::builder()
//!     .with_analysis(analysis)
//!     .with_format(OutputFormat::Json)
//!     .with_output_dir("rewritten".into())
//!     .with_dry_run(true)
//!     .with_emit(EmitFormat::Java)
//!     .with_error_on_unresolved(false)
//!     .build()?;
//!
//! assert!(config.dry_run);
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod detect;
pub mod graph;
mod markers;
pub mod resolve;

pub use common::AnalysisConfig;
pub use detect::DetectConfig;
pub use graph::GraphOptions;
pub use markers::MarkerConfig;
pub use resolve::ResolveConfig;
