use std::{fmt::Display, path::Path};

use crate::ErrorKind;

#[derive(Debug)]
pub struct Error {
  contexts: Vec<String>,
  pub kind: ErrorKind,
}

impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    self.kind.to_string().eq(&other.kind.to_string())
  }
}

impl Eq for Error {}

impl Error {
  fn with_kind(kind: ErrorKind) -> Self {
    Self {
      contexts: vec![],
      kind,
    }
  }

  pub fn context(mut self, context: String) -> Self {
    self.contexts.push(context);
    self
  }

  pub fn unresolved_entry(unresolved_id: impl AsRef<Path>) -> Self {
    Self::with_kind(ErrorKind::UnresolvedEntry {
      unresolved_id: unresolved_id.as_ref().to_path_buf(),
    })
  }

  pub fn entry_cannot_be_external(id: impl AsRef<Path>) -> Self {
    Self::with_kind(ErrorKind::ExternalEntry {
      id: id.as_ref().to_path_buf(),
    })
  }

  pub fn unresolved_import(specifier: String, importer: impl AsRef<Path>) -> Self {
    Self::with_kind(ErrorKind::UnresolvedImport {
      specifier: specifier.into(),
      importer: importer.as_ref().to_path_buf(),
    })
  }

  pub fn unknown_module(id: impl AsRef<Path>) -> Self {
    Self::with_kind(ErrorKind::UnknownModule {
      id: id.as_ref().to_path_buf(),
    })
  }

  pub fn chunk_resolution_cycle(chain: Vec<String>) -> Self {
    Self::with_kind(ErrorKind::ChunkResolutionCycle {
      chain: chain.into_iter().map(Into::into).collect(),
    })
  }

  pub fn io_error(e: std::io::Error) -> Self {
    Self::with_kind(ErrorKind::IoError(e))
  }

  pub fn panic(msg: String) -> Self {
    anyhow::format_err!(msg).into()
  }
}

impl std::convert::From<anyhow::Error> for Error {
  fn from(value: anyhow::Error) -> Self {
    Self::with_kind(ErrorKind::Panic { source: value })
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match &self.kind {
      ErrorKind::Panic { source, .. } => Some(source.as_ref()),
      _ => None,
    }
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for ctx in self.contexts.iter().rev() {
      writeln!(f, "{}: {}", ansi_term::Color::Yellow.paint("context"), ctx)?;
    }

    self.kind.fmt(f)
  }
}
