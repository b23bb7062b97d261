//! Configuration constants for unwire
//!
//! This module contains all configurable constants used throughout the
//! application. Most of them back a CLI default that can be overridden through
//! flags, `UNWIRE_*` environment variables, or `unwire.toml`.

use std::time::Duration;

/// Progress bar configuration
pub mod progress {
    use super::*;

    /// Duration between progress bar updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames for the untangling animation
    pub const SPINNER_FRAMES: &[&str] = &[
        "🪢 ", // Knot
        "🪢∙", // Loosening
        "🪢⋅", // Looser
        "🪢·", // Almost free
        "🪢 ", // Retie
        "🪢○", // Loop
        "🪢◌", // Open loop
        "🪢●", // Pulled tight
    ];
}

/// Output formatting configuration
pub mod output {
    /// Default output format when not specified
    pub const DEFAULT_FORMAT: &str = "human";

    /// Default format for rewritten declarations
    pub const DEFAULT_EMIT_FORMAT: &str = "java";
}

/// Snapshot discovery configuration
pub mod snapshot {
    /// File name pattern of declaration snapshots
    pub const DEFAULT_PATTERN: &str = "*.decl.json";

    /// Directories never searched for snapshots
    pub const SKIPPED_DIRS: &[&str] = &["target", ".git", "node_modules", "build", ".gradle"];
}

/// Analysis limits
pub mod analysis {
    /// Strongly connected components larger than this are not enumerated
    pub const DEFAULT_MAX_SCC_SIZE: usize = 50;
}

/// Configuration file lookup
pub mod config {
    /// Name of the configuration file looked up next to the first analyzed
    /// path
    pub const CONFIG_FILE_NAME: &str = "unwire.toml";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_constants() {
        assert_eq!(progress::TICK_INTERVAL, Duration::from_millis(100));
        assert_eq!(progress::SPINNER_FRAMES.len(), 8);
    }

    #[test]
    fn test_output_constants() {
        assert_eq!(output::DEFAULT_FORMAT, "human");
        assert_eq!(output::DEFAULT_EMIT_FORMAT, "java");
    }

    #[test]
    fn test_snapshot_pattern_is_valid_glob() {
        assert!(glob::Pattern::new(snapshot::DEFAULT_PATTERN).is_ok());
        assert!(snapshot::SKIPPED_DIRS.contains(&"target"));
    }
}
