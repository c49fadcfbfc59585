use bindle_common::{ChunkId, ModuleId};
use itertools::Itertools;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::{BuildError, BuildResult, ChunkGraph, ChunkOrModule, CodeSplitter, ModuleGraph};

/// A module embedded in an output chunk, with its source text.
#[derive(Debug, Clone)]
pub struct OutputModule {
  pub id: ModuleId,
  pub code: String,
}

#[derive(Debug)]
pub struct OutputChunk {
  pub id: ChunkId,
  /// The seed module of the chunk.
  pub entry: ModuleId,
  /// Embedded modules, seed first.
  pub modules: Vec<OutputModule>,
  /// Chunk ids and external package specifiers this chunk references.
  pub externals: Vec<ChunkOrModule>,
}

#[derive(Debug)]
pub struct BundleOutput {
  /// Chunks ordered by id so output is deterministic across runs.
  pub chunks: Vec<OutputChunk>,
  pub module_to_chunk: FxHashMap<ModuleId, ChunkId>,
}

pub(crate) struct Bundle<'a> {
  graph: &'a ModuleGraph,
}

impl<'a> Bundle<'a> {
  pub(crate) fn new(graph: &'a ModuleGraph) -> Self {
    Self { graph }
  }

  pub(crate) fn generate(&self) -> BuildResult<BundleOutput> {
    let chunk_graph = self.generate_chunks()?;

    let chunks = chunk_graph
      .chunk_by_id
      .par_iter()
      .map(|(_, chunk)| -> BuildResult<OutputChunk> {
        let modules = chunk
          .internals
          .iter()
          .map(|id| {
            self
              .graph
              .get_module(id)
              .map(|module| OutputModule {
                id: module.id.clone(),
                code: module.code.clone(),
              })
              .ok_or_else(|| BuildError::unknown_module(id.as_ref()))
          })
          .collect::<BuildResult<Vec<_>>>()?;

        Ok(OutputChunk {
          id: chunk.id.clone(),
          entry: chunk.entry.clone(),
          modules,
          externals: chunk.externals.iter().cloned().collect(),
        })
      })
      .collect::<BuildResult<Vec<_>>>()?;

    let chunks = chunks
      .into_iter()
      .sorted_by(|a, b| a.id.cmp(&b.id))
      .collect_vec();

    Ok(BundleOutput {
      chunks,
      module_to_chunk: chunk_graph.module_to_chunk,
    })
  }

  #[tracing::instrument(skip_all)]
  fn generate_chunks(&self) -> BuildResult<ChunkGraph> {
    CodeSplitter::new(self.graph).split()
  }
}
