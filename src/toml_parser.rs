use std::path::{Path, PathBuf};

use miette::{NamedSource, SourceSpan};
use serde::Deserialize;
use tracing::debug;

use crate::config::MarkerConfig;
use crate::constants::config::CONFIG_FILE_NAME;
use crate::error::{TomlParseError, UnwireError};

/// Contents of an `unwire.toml` file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UnwireToml {
    #[serde(default)]
    pub markers: MarkerConfig,
}

impl UnwireToml {
    pub fn parse_file(path: &Path) -> Result<Self, UnwireError> {
        let content = std::fs::read_to_string(path).map_err(|e| UnwireError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| {
            let span = e
                .span()
                .map(|span| SourceSpan::new(span.start.into(), span.end - span.start));

            UnwireError::TomlParseError(Box::new(TomlParseError {
                file: path.display().to_string(),
                source_code: NamedSource::new(path.display().to_string(), content.clone()),
                span,
                source: e,
            }))
        })
    }

    /// Load the configuration given explicitly, else the `unwire.toml` found
    /// next to the first analyzed path, else the defaults.
    pub fn discover(paths: &[PathBuf], explicit: Option<&Path>) -> Result<Self, UnwireError> {
        if let Some(path) = explicit {
            return Self::parse_file(path);
        }

        let Some(first) = paths.first() else {
            return Ok(Self::default());
        };
        let dir = if first.is_dir() {
            first.as_path()
        } else {
            first.parent().unwrap_or(first.as_path())
        };

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "loading configuration");
            Self::parse_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}
