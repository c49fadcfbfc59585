use std::sync::Arc;

use bindle_common::CWD;
use tracing::instrument;

use crate::{
  Bundle, BuildResult, BundleOutput, ContentReader, FsReader, ImportResolver, InputOptions,
  ModuleGraph, SharedContentReader, SharedImportResolver,
};

pub struct Bundler {
  input_options: InputOptions,
  import_resolver: SharedImportResolver,
  content_reader: SharedContentReader,
}

impl Bundler {
  /// Reads module sources from disk. Use [Bundler::with_content_reader] to
  /// supply sources from somewhere else.
  pub fn new(input_options: InputOptions, import_resolver: Arc<dyn ImportResolver>) -> Self {
    Self::with_content_reader(input_options, import_resolver, Arc::new(FsReader))
  }

  pub fn with_content_reader(
    input_options: InputOptions,
    import_resolver: Arc<dyn ImportResolver>,
    content_reader: Arc<dyn ContentReader>,
  ) -> Self {
    bindle_tracing::enable_tracing_on_demand();
    Self {
      input_options,
      import_resolver,
      content_reader,
    }
  }

  /// Runs discovery only and hands back the module graph.
  #[instrument(skip_all)]
  pub async fn scan(&mut self) -> BuildResult<ModuleGraph> {
    let mut graph = ModuleGraph::default();
    graph
      .build(
        &self.input_options,
        self.import_resolver.clone(),
        self.content_reader.clone(),
      )
      .await?;
    Ok(graph)
  }

  /// Discovery plus chunk generation.
  #[instrument(skip_all)]
  pub async fn build(&mut self) -> BuildResult<BundleOutput> {
    tracing::debug!("{:#?}", self.input_options);
    let graph = self.scan().await?;

    // Chunk assignment runs single-threaded over the completed graph.
    let bundle = Bundle::new(&graph);
    CWD.set(&self.input_options.cwd, || bundle.generate())
  }
}
