use std::{
  fmt::Display,
  path::{Path, PathBuf},
};

use bindle_common::{StaticStr, CWD};

use crate::utils::PathExt;

pub mod error_code;

#[derive(Debug)]
pub enum ErrorKind {
  UnresolvedEntry {
    unresolved_id: PathBuf,
  },
  ExternalEntry {
    id: PathBuf,
  },
  UnresolvedImport {
    specifier: StaticStr,
    importer: PathBuf,
  },
  /// An operation referenced a module id with no record in the graph. This is
  /// an internal invariant violation, not a user error.
  UnknownModule {
    id: PathBuf,
  },
  /// Owner-chain resolution failed to reach a chunk id within the
  /// module-count bound.
  ChunkResolutionCycle {
    chain: Vec<StaticStr>,
  },

  /// Unrecoverable failure without a dedicated variant. Also used to wrap
  /// `anyhow::Error` coming out of collaborator contracts.
  Panic {
    source: anyhow::Error,
  },

  IoError(std::io::Error),
}

impl Display for ErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ErrorKind::UnresolvedEntry { unresolved_id } => write!(
        f,
        "Could not resolve entry module \"{}\"",
        unresolved_id.may_display_relative()
      ),
      ErrorKind::ExternalEntry { id } => write!(
        f,
        "Entry module \"{}\" cannot be external.",
        id.may_display_relative()
      ),
      ErrorKind::UnresolvedImport {
        specifier,
        importer,
      } => write!(
        f,
        "Could not resolve \"{specifier}\" from \"{}\"",
        importer.may_display_relative()
      ),
      ErrorKind::UnknownModule { id } => write!(
        f,
        "Module \"{}\" does not exist in the module graph.",
        id.may_display_relative()
      ),
      ErrorKind::ChunkResolutionCycle { chain } => write!(
        f,
        "Chunk resolution did not reach a fixed point: {}",
        chain
          .iter()
          .map(|id| id.as_ref())
          .collect::<Vec<_>>()
          .join(" -> ")
      ),
      ErrorKind::Panic { source } => source.fmt(f),
      ErrorKind::IoError(e) => e.fmt(f),
    }
  }
}

impl ErrorKind {
  /// Shorten the file paths in messages by making them relative to CWD.
  pub fn to_readable_string(&self, cwd: impl AsRef<Path>) -> String {
    let cwd = cwd.as_ref().to_path_buf();
    CWD.set(&cwd, || self.to_string())
  }

  pub fn code(&self) -> &'static str {
    match self {
      ErrorKind::UnresolvedEntry { .. } => error_code::UNRESOLVED_ENTRY,
      ErrorKind::ExternalEntry { .. } => error_code::UNRESOLVED_ENTRY,
      ErrorKind::UnresolvedImport { .. } => error_code::UNRESOLVED_IMPORT,
      ErrorKind::UnknownModule { .. } => error_code::UNKNOWN_MODULE,
      ErrorKind::ChunkResolutionCycle { .. } => error_code::CHUNK_RESOLUTION_CYCLE,
      ErrorKind::Panic { .. } => error_code::PANIC,
      ErrorKind::IoError(_) => error_code::IO_ERROR,
    }
  }
}
