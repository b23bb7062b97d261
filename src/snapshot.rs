//! Declaration snapshot discovery and loading
//!
//! A snapshot is a JSON file of pre-parsed declarations, written by whatever
//! front end understands the source language. Two layouts are accepted: an
//! object with a `declarations` array, or a bare array.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use indicatif::ParallelProgressIterator;
use miette::{NamedSource, SourceSpan};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::constants::snapshot::{DEFAULT_PATTERN, SKIPPED_DIRS};
use crate::error::{SnapshotParseError, UnwireError};
use crate::model::Declaration;
use crate::progress::ProgressReporter;
use crate::registry::DeclarationRegistry;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

pub struct SnapshotLoader {
    pattern: glob::Pattern,
    discovered: IndexSet<PathBuf>,
}

impl SnapshotLoader {
    /// Loader matching file names against the default `*.decl.json` pattern
    pub fn new() -> Self {
        Self {
            pattern: glob::Pattern::new(DEFAULT_PATTERN).unwrap_or_default(),
            discovered: IndexSet::new(),
        }
    }

    /// Loader matching file names against `pattern`
    pub fn with_pattern(pattern: &str) -> Result<Self, UnwireError> {
        let pattern =
            glob::Pattern::new(pattern).map_err(|e| UnwireError::ConfigurationError {
                message: format!("Invalid snapshot pattern '{pattern}': {e}"),
            })?;
        Ok(Self {
            pattern,
            discovered: IndexSet::new(),
        })
    }

    /// Find every snapshot under `paths`, sorted by path.
    ///
    /// A path naming a file is taken as a snapshot regardless of the pattern.
    /// Paths that do not exist are skipped with a warning.
    pub fn discover(&mut self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let pattern = &self.pattern;
        for path in paths {
            if !path.exists() {
                warn!(path = %path.display(), "path does not exist");
                continue;
            }

            if path.is_file() {
                self.discovered.insert(path.clone());
                continue;
            }

            let found = WalkDir::new(path)
                .into_iter()
                .filter_entry(|e| {
                    let name = e.file_name().to_string_lossy();
                    !SKIPPED_DIRS.contains(&name.as_ref())
                })
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter(|e| pattern.matches(&e.file_name().to_string_lossy()))
                .map(|e| e.into_path());
            self.discovered.extend(found);
        }

        let mut files: Vec<PathBuf> = self.discovered.iter().cloned().collect();
        files.sort();
        files
    }

    /// Parse one snapshot file
    pub fn parse_file(path: &Path) -> Result<Vec<Declaration>, UnwireError> {
        let content = std::fs::read_to_string(path).map_err(|e| UnwireError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let parsed = if content.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<Declaration>>(&content)
        } else {
            serde_json::from_str::<SnapshotFile>(&content).map(|file| file.declarations)
        };

        let mut declarations = parsed.map_err(|e| {
            let span = offset_of(&content, e.line(), e.column())
                .map(|offset| SourceSpan::new(offset.into(), 1));

            UnwireError::SnapshotParseError(Box::new(SnapshotParseError {
                file: path.display().to_string(),
                source_code: NamedSource::new(path.display().to_string(), content.clone()),
                span,
                source: e,
            }))
        })?;

        for declaration in &mut declarations {
            if declaration.source_path.is_none() {
                declaration.source_path = Some(path.to_path_buf());
            }
        }
        Ok(declarations)
    }

    /// Discover and parse all snapshots under `paths` into a fresh registry
    pub fn load(
        &mut self,
        paths: &[PathBuf],
        progress: Option<&ProgressReporter>,
    ) -> Result<DeclarationRegistry, UnwireError> {
        let mut registry = DeclarationRegistry::new();
        self.load_into(&mut registry, paths, progress)?;
        Ok(registry)
    }

    /// Discover and parse all snapshots under `paths` into `registry`.
    ///
    /// Files are parsed in parallel and merged in path order; a declaration
    /// seen twice keeps the later file's content.
    pub fn load_into(
        &mut self,
        registry: &mut DeclarationRegistry,
        paths: &[PathBuf],
        progress: Option<&ProgressReporter>,
    ) -> Result<usize, UnwireError> {
        let files = self.discover(paths);
        debug!(count = files.len(), "parsing snapshot files");

        let bar = progress.map(|p| p.parsing_bar(files.len()));
        let mut parsed: Vec<(PathBuf, Result<Vec<Declaration>, UnwireError>)> = match &bar {
            Some(bar) => files
                .into_par_iter()
                .progress_with(bar.clone())
                .map(|path| {
                    let result = Self::parse_file(&path);
                    (path, result)
                })
                .collect(),
            None => files
                .into_par_iter()
                .map(|path| {
                    let result = Self::parse_file(&path);
                    (path, result)
                })
                .collect(),
        };
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
        parsed.sort_by(|a, b| a.0.cmp(&b.0));

        let mut count = 0;
        for (path, result) in parsed {
            for declaration in result? {
                let fqn = declaration.fqn();
                if registry.put(fqn.clone(), declaration).is_some() {
                    warn!(%fqn, path = %path.display(), "declaration defined more than once");
                }
                count += 1;
            }
        }
        Ok(count)
    }
}

impl Default for SnapshotLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte offset of a 1-based line and column
fn offset_of(content: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = content
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let offset = line_start + column.saturating_sub(1);
    (offset <= content.len()).then_some(offset)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_parse_both_layouts() {
        let temp = TempDir::new().unwrap();
        let object = temp.path().join("a.decl.json");
        let array = temp.path().join("b.decl.json");
        fs::write(
            &object,
            r#"{ "declarations": [ { "name": "A", "package": "com.app" } ] }"#,
        )
        .unwrap();
        fs::write(&array, r#"[ { "name": "B", "package": "com.app" } ]"#).unwrap();

        let a = SnapshotLoader::parse_file(&object).unwrap();
        let b = SnapshotLoader::parse_file(&array).unwrap();

        assert_eq!(a[0].fqn(), "com.app.A");
        assert_eq!(a[0].source_path.as_deref(), Some(object.as_path()));
        assert_eq!(b[0].fqn(), "com.app.B");
    }

    #[test]
    fn test_parse_error_carries_span() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.decl.json");
        fs::write(&path, "{\n  \"declarations\": [ { \"name\": 3 } ]\n}").unwrap();

        match SnapshotLoader::parse_file(&path) {
            Err(UnwireError::SnapshotParseError(error)) => {
                assert!(error.span.is_some());
                assert!(error.file.ends_with("broken.decl.json"));
            }
            other => panic!("expected snapshot parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_discover_skips_build_directories_and_sorts() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("b/nested")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::create_dir_all(root.join("target")).unwrap();
        fs::write(root.join("b/nested/z.decl.json"), "[]").unwrap();
        fs::write(root.join("a/y.decl.json"), "[]").unwrap();
        fs::write(root.join("a/notes.json"), "[]").unwrap();
        fs::write(root.join("target/x.decl.json"), "[]").unwrap();

        let mut loader = SnapshotLoader::new();
        let files = loader.discover(&[root.to_path_buf()]);

        assert_eq!(
            files,
            vec![root.join("a/y.decl.json"), root.join("b/nested/z.decl.json")]
        );
    }

    #[test]
    fn test_offset_of() {
        let content = "ab\ncd\nef";
        assert_eq!(offset_of(content, 1, 1), Some(0));
        assert_eq!(offset_of(content, 2, 2), Some(4));
        assert_eq!(offset_of(content, 0, 0), None);
    }
}
