use bindle_common::{ChunkId, ModuleId};
use hashlink::LinkedHashSet;

use crate::ChunkOrModule;

#[derive(Debug)]
pub struct Chunk {
  pub id: ChunkId,
  /// The seed module this chunk's id is derived from.
  pub entry: ModuleId,
  /// Modules embedded in this chunk, seed first, in assignment order.
  pub internals: LinkedHashSet<ModuleId>,
  /// Chunks and external packages this chunk references instead of inlining.
  pub externals: LinkedHashSet<ChunkOrModule>,
}

impl Chunk {
  pub fn new(entry: ModuleId) -> Self {
    let id = ChunkId::from_module_id(&entry);
    let mut internals = LinkedHashSet::new();
    internals.insert(entry.clone());
    Self {
      id,
      entry,
      internals,
      externals: Default::default(),
    }
  }

  pub(crate) fn add_internal(&mut self, module_id: ModuleId) {
    self.internals.insert(module_id);
  }

  pub(crate) fn add_external(&mut self, external: ChunkOrModule) {
    self.externals.insert(external);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use bindle_common::CHUNK_ID_PREFIX;

  #[test]
  fn a_new_chunk_contains_its_seed() {
    let seed = ModuleId::new("/project/src/index.js", false);
    let chunk = Chunk::new(seed.clone());
    assert!(chunk.internals.contains(&seed));
    assert!(chunk.id.value().starts_with(CHUNK_ID_PREFIX));
  }

  #[test]
  fn internals_and_externals_deduplicate_but_keep_order() {
    let mut chunk = Chunk::new(ModuleId::new("/a.js", false));
    chunk.add_internal(ModuleId::new("/b.js", false));
    chunk.add_internal(ModuleId::new("/b.js", false));
    chunk.add_external(ChunkOrModule::Module(ModuleId::new("lodash", true)));
    chunk.add_external(ChunkOrModule::Module(ModuleId::new("lodash", true)));
    assert_eq!(chunk.internals.len(), 2);
    assert_eq!(chunk.externals.len(), 1);
  }
}
