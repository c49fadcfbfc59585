use std::sync::Arc;

use async_trait::async_trait;
use bindle_common::ModuleId;

use crate::{BuildError, BuildResult};

/// A single import found in a module's source.
#[derive(Debug, Clone)]
pub struct ImportRecord {
  /// The specifier exactly as written in the source.
  pub specifier: String,
  /// The id the specifier maps to, or `None` when resolution failed.
  pub resolved_id: Option<ModuleId>,
  pub is_dynamic: bool,
}

/// Extracts and resolves the imports of a module. Implementations own both
/// the syntax knowledge (how imports are spelled) and the resolution scheme.
#[async_trait]
pub trait ImportResolver: Send + Sync {
  async fn resolve_imports(&self, importer: &ModuleId, code: &str) -> BuildResult<Vec<ImportRecord>>;
}

/// Loads the source text of a module.
#[async_trait]
pub trait ContentReader: Send + Sync {
  async fn read(&self, id: &ModuleId) -> BuildResult<String>;
}

pub type SharedImportResolver = Arc<dyn ImportResolver>;
pub type SharedContentReader = Arc<dyn ContentReader>;

/// Reads module sources from disk. The default [ContentReader].
#[derive(Debug, Default)]
pub struct FsReader;

#[async_trait]
impl ContentReader for FsReader {
  async fn read(&self, id: &ModuleId) -> BuildResult<String> {
    tokio::fs::read_to_string(id.as_ref())
      .await
      .map_err(|err| BuildError::io_error(err).context(format!("Read file: {}", id.id())))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use bindle_error::ErrorKind;

  #[tokio::test]
  async fn missing_files_surface_as_io_errors() {
    let id = ModuleId::new("/no/such/dir/missing.js", false);
    let err = FsReader.read(&id).await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IoError(_)));
    assert!(err.to_string().contains("/no/such/dir/missing.js"));
  }
}
