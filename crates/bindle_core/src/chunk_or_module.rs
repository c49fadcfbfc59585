use std::fmt::Display;

use bindle_common::{ChunkId, ModuleId};

/// Either a chunk id or a raw module id. Raw module ids show up in owner
/// chains before canonicalization and, after it, only as external package
/// specifiers.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub enum ChunkOrModule {
  Chunk(ChunkId),
  Module(ModuleId),
}

impl ChunkOrModule {
  pub fn as_chunk(&self) -> Option<&ChunkId> {
    match self {
      ChunkOrModule::Chunk(id) => Some(id),
      ChunkOrModule::Module(_) => None,
    }
  }

  pub fn as_module(&self) -> Option<&ModuleId> {
    match self {
      ChunkOrModule::Chunk(_) => None,
      ChunkOrModule::Module(id) => Some(id),
    }
  }

  pub fn is_chunk(&self) -> bool {
    matches!(self, ChunkOrModule::Chunk(_))
  }
}

impl Display for ChunkOrModule {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ChunkOrModule::Chunk(id) => id.fmt(f),
      ChunkOrModule::Module(id) => id.fmt(f),
    }
  }
}
