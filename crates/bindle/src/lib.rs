pub use bindle_common::{ChunkId, ModuleId, CHUNK_ID_PREFIX};
pub use bindle_core::{
  BuildError, BuildResult, Bundler, BundleOutput, Chunk, ChunkGraph, ChunkOrModule, ContentReader,
  DependencyRef, FsReader, ImportRecord, ImportResolver, InputItem, InputOptions, Module,
  ModuleGraph, OutputChunk, OutputModule,
};
pub use bindle_error::{Error, ErrorKind};
pub use bindle_resolver::Resolver;
