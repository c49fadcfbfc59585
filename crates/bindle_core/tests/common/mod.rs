#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use bindle_core::{
  BuildResult, BundleOutput, Bundler, ContentReader, ImportRecord, ImportResolver, InputOptions,
  ModuleId, OutputChunk,
};
use bindle_resolver::Resolver;
use rustc_hash::FxHashMap;

pub const PROJECT_CWD: &str = "/project";

#[derive(Debug, Clone)]
pub struct TestImport {
  specifier: String,
  is_dynamic: bool,
  resolvable: bool,
}

pub fn import(specifier: &str) -> TestImport {
  TestImport {
    specifier: specifier.to_string(),
    is_dynamic: false,
    resolvable: true,
  }
}

pub fn dynamic_import(specifier: &str) -> TestImport {
  TestImport {
    is_dynamic: true,
    ..import(specifier)
  }
}

pub fn broken_import(specifier: &str) -> TestImport {
  TestImport {
    resolvable: false,
    ..import(specifier)
  }
}

/// A declarative in-memory project. Doubles as the [ImportResolver] and the
/// [ContentReader] handed to the bundler.
#[derive(Debug, Default)]
pub struct TestProject {
  modules: FxHashMap<String, TestModule>,
}

#[derive(Debug, Default, Clone)]
struct TestModule {
  code: String,
  imports: Vec<TestImport>,
}

impl TestProject {
  pub fn new() -> Self {
    Default::default()
  }

  pub fn with_module(mut self, id: &str, code: &str, imports: Vec<TestImport>) -> Self {
    self.modules.insert(
      id.to_string(),
      TestModule {
        code: code.to_string(),
        imports,
      },
    );
    self
  }

  pub fn bundler(self, entries: &[&str]) -> Bundler {
    let input_options = InputOptions {
      input: entries.iter().map(|entry| (*entry).into()).collect(),
      cwd: PROJECT_CWD.into(),
    };
    let shared = Arc::new(self);
    Bundler::with_content_reader(input_options, shared.clone(), shared)
  }
}

#[async_trait]
impl ImportResolver for TestProject {
  async fn resolve_imports(
    &self,
    importer: &ModuleId,
    _code: &str,
  ) -> BuildResult<Vec<ImportRecord>> {
    let resolver = Resolver::with_cwd(PROJECT_CWD.into());
    let Some(module) = self.modules.get(importer.id()) else {
      return Ok(vec![]);
    };
    module
      .imports
      .iter()
      .map(|import| {
        let resolved_id = import
          .resolvable
          .then(|| resolver.resolve(Some(importer.id()), &import.specifier))
          .transpose()?;
        Ok(ImportRecord {
          specifier: import.specifier.clone(),
          resolved_id,
          is_dynamic: import.is_dynamic,
        })
      })
      .collect()
  }
}

#[async_trait]
impl ContentReader for TestProject {
  async fn read(&self, id: &ModuleId) -> BuildResult<String> {
    self
      .modules
      .get(id.id())
      .map(|module| module.code.clone())
      .ok_or_else(|| bindle_error::format_err!("Read file: {}: not found", id.id()).into())
  }
}

pub fn local(id: &str) -> ModuleId {
  ModuleId::new(id, false)
}

/// The output chunk owning `module_id`.
pub fn chunk_of<'o>(output: &'o BundleOutput, module_id: &str) -> &'o OutputChunk {
  let chunk_id = output
    .module_to_chunk
    .iter()
    .find(|(id, _)| id.id() == module_id)
    .map(|(_, chunk_id)| chunk_id.clone())
    .unwrap_or_else(|| panic!("{module_id} is not mapped to any chunk"));
  output
    .chunks
    .iter()
    .find(|chunk| chunk.id == chunk_id)
    .unwrap_or_else(|| panic!("no chunk with id {chunk_id}"))
}

pub fn module_ids(chunk: &OutputChunk) -> Vec<&str> {
  chunk.modules.iter().map(|module| module.id.id()).collect()
}
