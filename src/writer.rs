//! Persisting rewritten declarations

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::EmitFormat;
use crate::error::UnwireError;
use crate::model::Declaration;
use crate::render::render_declaration;

/// Destination for declarations a resolution has committed
pub trait DeclarationWriter {
    fn persist(&self, fqn: &str, declaration: &Declaration, base: &Path) -> Result<(), UnwireError>;
}

/// Writes each declaration to `base/<package path>/<Name>.<ext>`
#[derive(Debug, Clone, Copy)]
pub struct SourceWriter {
    format: EmitFormat,
}

impl SourceWriter {
    pub fn new(format: EmitFormat) -> Self {
        Self { format }
    }

    /// Where `declaration` lands under `base`
    pub fn path_for(&self, declaration: &Declaration, base: &Path) -> PathBuf {
        let mut path = base.to_path_buf();
        path.extend(declaration.package.split('.').filter(|s| !s.is_empty()));
        path.push(format!("{}.{}", declaration.name, self.format.extension()));
        path
    }

    fn contents(&self, declaration: &Declaration) -> Result<String, UnwireError> {
        match self.format {
            EmitFormat::Java => render_declaration(declaration),
            EmitFormat::Json => Ok(serde_json::to_string_pretty(declaration)?),
        }
    }
}

impl DeclarationWriter for SourceWriter {
    fn persist(&self, fqn: &str, declaration: &Declaration, base: &Path) -> Result<(), UnwireError> {
        let path = self.path_for(declaration, base);
        let contents = self.contents(declaration)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| UnwireError::WriteError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(&path, contents).map_err(|e| UnwireError::WriteError {
            path: path.clone(),
            source: e,
        })?;

        info!(fqn, path = %path.display(), "wrote declaration");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_writes_under_package_path() {
        let dir = TempDir::new().unwrap();
        let declaration = Declaration::class("com.shop", "Orders");

        SourceWriter::new(EmitFormat::Java)
            .persist("com.shop.Orders", &declaration, dir.path())
            .unwrap();

        let path = dir.path().join("com").join("shop").join("Orders.java");
        let text = fs::read_to_string(path).unwrap();
        assert!(text.starts_with("package com.shop;"));
    }

    #[test]
    fn test_json_output_reloads() {
        let dir = TempDir::new().unwrap();
        let declaration = Declaration::class("", "Root").with_annotation("Service");
        let writer = SourceWriter::new(EmitFormat::Json);

        writer.persist("Root", &declaration, dir.path()).unwrap();

        let path = writer.path_for(&declaration, dir.path());
        assert_eq!(path, dir.path().join("Root.json"));
        let back: Declaration = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back, declaration);
    }
}
