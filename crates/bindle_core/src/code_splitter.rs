use std::collections::VecDeque;

use bindle_common::{ChunkId, ModuleId};
use hashlink::LinkedHashSet;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
  BuildError, BuildResult, Chunk, ChunkGraph, ChunkOrModule, DependencyRef, ModuleGraph,
};

/// Partitions a finished module graph into chunks.
///
/// Runs three passes over the graph: assignment walks modules breadth-first
/// from the entry points and decides inline vs. extract vs. external for every
/// edge; canonicalization collapses the recorded owner chains into chunk ids;
/// the final pass rewrites chunk externals through the same resolution so
/// only chunk ids and package specifiers remain.
pub(crate) struct CodeSplitter<'me> {
  graph: &'me ModuleGraph,
  chunk_by_id: FxHashMap<ChunkId, Chunk>,
  /// Owner registered per module. Values may point at another module until
  /// canonicalization resolves them.
  owner_by_module: FxHashMap<ModuleId, ChunkOrModule>,
}

impl<'me> CodeSplitter<'me> {
  pub(crate) fn new(graph: &'me ModuleGraph) -> Self {
    Self {
      graph,
      chunk_by_id: Default::default(),
      owner_by_module: Default::default(),
    }
  }

  pub(crate) fn split(mut self) -> BuildResult<ChunkGraph> {
    self.assign_chunks()?;
    let module_to_chunk = self.canonicalize_owners()?;
    self.rewrite_externals()?;
    Ok(ChunkGraph {
      chunk_by_id: self.chunk_by_id,
      module_to_chunk,
    })
  }

  fn assign_chunks(&mut self) -> BuildResult<()> {
    let mut queue: VecDeque<ModuleId> = self.graph.entry_points().cloned().collect();
    let mut enqueued: FxHashSet<ModuleId> = queue.iter().cloned().collect();

    while let Some(module_id) = queue.pop_front() {
      let discovered = self.assign_module_to_chunk(&module_id)?;
      for dep_id in discovered {
        if enqueued.insert(dep_id.clone()) {
          queue.push_back(dep_id);
        }
      }
    }
    Ok(())
  }

  fn assign_module_to_chunk(&mut self, module_id: &ModuleId) -> BuildResult<Vec<ModuleId>> {
    tracing::trace!("assigning {}", module_id);
    let dependencies = self.graph.get_dependencies_for(module_id)?;

    let mut internals: Vec<ModuleId> = vec![];
    let mut externals: Vec<ChunkOrModule> = vec![];
    let mut discovered: Vec<ModuleId> = vec![];

    // Entry points seed their own chunks.
    if self.graph.is_entry_point(module_id) {
      let chunk_id = ChunkId::from_module_id(module_id);
      if !self.chunk_by_id.contains_key(&chunk_id) {
        let chunk = Chunk::new(module_id.clone());
        self.register_owner(module_id.clone(), ChunkOrModule::Chunk(chunk.id.clone()));
        self.chunk_by_id.insert(chunk.id.clone(), chunk);
      }
    }

    for dependency in dependencies {
      let dependency = match dependency {
        // Package references without a graph record stay external as-is.
        DependencyRef::External(id) => {
          externals.push(ChunkOrModule::Module(id.clone()));
          continue;
        }
        DependencyRef::Resolved(module) => module,
      };

      discovered.push(dependency.id.clone());

      // Entry points and dependencies that already have an owner are
      // referenced by the consuming chunk, never inlined. Entry status takes
      // precedence over the shared-dependency rule below.
      if dependency.is_entry
        || self.graph.is_entry_point(&dependency.id)
        || self.owner_by_module.contains_key(&dependency.id)
      {
        externals.push(ChunkOrModule::Module(dependency.id.clone()));
        continue;
      }

      // A dependency imported from more than one module is extracted into a
      // chunk of its own.
      if dependency.distinct_dependent_count() > 1 {
        let dep_chunk_id = ChunkId::from_module_id(&dependency.id);
        if !self.chunk_by_id.contains_key(&dep_chunk_id) {
          self
            .chunk_by_id
            .insert(dep_chunk_id.clone(), Chunk::new(dependency.id.clone()));
        }
        self.register_owner(dependency.id.clone(), ChunkOrModule::Chunk(dep_chunk_id));
        externals.push(ChunkOrModule::Module(dependency.id.clone()));
        continue;
      }

      // Imported exactly once: contained within the consumer's chunk.
      let owner = self.resolve_owner(ChunkOrModule::Module(module_id.clone()))?;
      self.register_owner(dependency.id.clone(), owner);
      internals.push(dependency.id.clone());
    }

    if let ChunkOrModule::Chunk(owner_chunk_id) =
      self.resolve_owner(ChunkOrModule::Module(module_id.clone()))?
    {
      if let Some(chunk) = self.chunk_by_id.get_mut(&owner_chunk_id) {
        internals.into_iter().for_each(|id| chunk.add_internal(id));
        externals
          .into_iter()
          .for_each(|external| chunk.add_external(external));
      }
    }

    Ok(discovered)
  }

  /// First registration wins; a module's owner never changes afterwards.
  fn register_owner(&mut self, module_id: ModuleId, owner: ChunkOrModule) {
    self.owner_by_module.entry(module_id).or_insert(owner);
  }

  /// Follows an owner chain (module -> ... -> chunk) iteratively. Ids with no
  /// registered owner resolve to themselves, which keeps external package
  /// specifiers stable. The walk is bounded by the module count; exceeding
  /// the bound or revisiting an id means the owner map is cyclic.
  fn resolve_owner(&self, start: ChunkOrModule) -> BuildResult<ChunkOrModule> {
    let bound = self.graph.module_count();
    let mut visited: FxHashSet<ModuleId> = FxHashSet::default();
    let mut chain: Vec<String> = vec![];
    let mut current = start;

    loop {
      let module_id = match current {
        ChunkOrModule::Chunk(_) => return Ok(current),
        ChunkOrModule::Module(ref id) => id.clone(),
      };
      let Some(next) = self.owner_by_module.get(&module_id) else {
        return Ok(current);
      };
      chain.push(module_id.id().to_string());
      if !visited.insert(module_id) || chain.len() > bound {
        return Err(BuildError::chunk_resolution_cycle(chain));
      }
      current = next.clone();
    }
  }

  /// Collapses every owner entry into a chunk id. A project-local owner chain
  /// that dead-ends on a module is an invariant violation.
  fn canonicalize_owners(&self) -> BuildResult<FxHashMap<ModuleId, ChunkId>> {
    let mut module_to_chunk = FxHashMap::default();
    for (module_id, owner) in &self.owner_by_module {
      match self.resolve_owner(owner.clone())? {
        ChunkOrModule::Chunk(chunk_id) => {
          module_to_chunk.insert(module_id.clone(), chunk_id);
        }
        ChunkOrModule::Module(id) => {
          return Err(BuildError::unknown_module(id.as_ref()));
        }
      }
    }
    Ok(module_to_chunk)
  }

  /// Externals recorded during assignment may still hold raw module ids.
  /// Resolve them so only chunk ids and package specifiers remain, dropping
  /// references a chunk would make to itself.
  fn rewrite_externals(&mut self) -> BuildResult<()> {
    let chunk_ids = self.chunk_by_id.keys().cloned().collect::<Vec<_>>();
    for chunk_id in chunk_ids {
      let externals = self
        .chunk_by_id
        .get(&chunk_id)
        .map(|chunk| chunk.externals.iter().cloned().collect::<Vec<_>>())
        .unwrap_or_default();

      let mut rewritten = LinkedHashSet::new();
      for external in externals {
        let resolved = self.resolve_owner(external)?;
        if resolved.as_chunk() == Some(&chunk_id) {
          continue;
        }
        rewritten.insert(resolved);
      }

      if let Some(chunk) = self.chunk_by_id.get_mut(&chunk_id) {
        chunk.externals = rewritten;
      }
    }
    Ok(())
  }
}
