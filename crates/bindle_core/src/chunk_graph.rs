use bindle_common::{ChunkId, ModuleId};
use rustc_hash::FxHashMap;

use crate::Chunk;

/// Result of the chunk passes. Every discovered project-local module maps to
/// exactly one owning chunk.
#[derive(Debug)]
pub struct ChunkGraph {
  pub chunk_by_id: FxHashMap<ChunkId, Chunk>,
  pub module_to_chunk: FxHashMap<ModuleId, ChunkId>,
}

impl ChunkGraph {
  pub fn chunk_for_module(&self, id: &ModuleId) -> Option<&Chunk> {
    self
      .module_to_chunk
      .get(id)
      .and_then(|chunk_id| self.chunk_by_id.get(chunk_id))
  }
}
