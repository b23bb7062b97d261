//! Command implementations for the unwire CLI
//!
//! This module contains the implementations for each CLI command:
//! - detect: Find dependency-injection cycles
//! - resolve: Rewrite declarations to break them
//! - graph: Render the injection graph

pub mod detect;
pub mod graph;
pub mod resolve;

use miette::Result;

use crate::cli::Commands;

/// Execute a command based on CLI input
pub fn execute_command(command: Commands) -> Result<()> {
    match &command {
        Commands::Detect { .. } => detect::execute_detect_command(command),
        Commands::Resolve { .. } => resolve::execute_resolve_command(command),
        Commands::Graph { .. } => graph::execute_graph_command(command),
    }
}
