use std::sync::Arc;

mod bundle;
pub use bundle::*;
mod bundler;
pub use bundler::*;
mod chunk;
pub use chunk::*;
mod chunk_graph;
pub use chunk_graph::*;
mod chunk_or_module;
pub use chunk_or_module::*;
mod code_splitter;
pub(crate) use code_splitter::*;
mod graph;
pub use graph::*;
mod hooks;
pub use hooks::*;
mod module;
pub use module::*;
mod module_loader;
mod options;
pub use options::*;

pub use bindle_common::{ChunkId, ModuleId, CHUNK_ID_PREFIX};
use rustc_hash::FxHashMap;

pub(crate) type ModuleById = FxHashMap<ModuleId, Module>;
pub(crate) type SharedResolver = Arc<bindle_resolver::Resolver>;

pub type BuildResult<T> = bindle_error::Result<T>;
pub type BuildError = bindle_error::Error;
