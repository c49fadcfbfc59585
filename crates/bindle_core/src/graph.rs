use std::sync::Arc;

use bindle_common::ModuleId;
use hashlink::LinkedHashSet;

use crate::module_loader::ModuleLoader;
use crate::{
  BuildError, BuildResult, InputOptions, Module, ModuleById, SharedContentReader,
  SharedImportResolver,
};

/// A dependency edge as seen by the chunk passes: either a module with a
/// graph record, or a bare package reference that was never parsed.
#[derive(Debug)]
pub enum DependencyRef<'m> {
  Resolved(&'m Module),
  External(&'m ModuleId),
}

#[derive(Debug, Default)]
pub struct ModuleGraph {
  pub(crate) module_by_id: ModuleById,
  pub(crate) entry_points: LinkedHashSet<ModuleId>,
}

impl ModuleGraph {
  pub fn get_module(&self, id: &ModuleId) -> Option<&Module> {
    self.module_by_id.get(id)
  }

  pub fn modules(&self) -> impl Iterator<Item = &Module> {
    self.module_by_id.values()
  }

  pub fn module_count(&self) -> usize {
    self.module_by_id.len()
  }

  /// User-defined entries first, in input order, followed by dynamic-import
  /// targets in discovery order.
  pub fn entry_points(&self) -> impl Iterator<Item = &ModuleId> {
    self.entry_points.iter()
  }

  pub fn is_entry_point(&self, id: &ModuleId) -> bool {
    self.entry_points.contains(id)
  }

  /// The edges of `id` in source order. Fails if `id` has no record.
  pub fn get_dependencies_for(&self, id: &ModuleId) -> BuildResult<Vec<DependencyRef<'_>>> {
    let module = self
      .module_by_id
      .get(id)
      .ok_or_else(|| BuildError::unknown_module(id.as_ref()))?;
    Ok(
      module
        .dependencies
        .iter()
        .map(|dep_id| match self.module_by_id.get(dep_id) {
          Some(dep) => DependencyRef::Resolved(dep),
          None => DependencyRef::External(dep_id),
        })
        .collect(),
    )
  }

  pub(crate) fn add_module(&mut self, module: Module) {
    debug_assert!(!self.module_by_id.contains_key(&module.id));
    self.module_by_id.insert(module.id.clone(), module);
  }

  pub(crate) fn register_entry_point(&mut self, id: ModuleId) {
    self.entry_points.insert(id);
  }

  pub(crate) fn add_dependent_to_module(
    &mut self,
    id: &ModuleId,
    dependent: ModuleId,
  ) -> BuildResult<()> {
    let module = self
      .module_by_id
      .get_mut(id)
      .ok_or_else(|| BuildError::unknown_module(id.as_ref()))?;
    module.dependents.push(dependent);
    Ok(())
  }

  #[tracing::instrument(skip_all)]
  pub(crate) async fn build(
    &mut self,
    input_options: &InputOptions,
    import_resolver: SharedImportResolver,
    content_reader: SharedContentReader,
  ) -> BuildResult<()> {
    let resolver = Arc::new(bindle_resolver::Resolver::with_cwd(input_options.cwd.clone()));
    ModuleLoader::new(self, resolver, import_resolver, content_reader)
      .fetch_all_modules(input_options)
      .await?;
    tracing::debug!("{:#?}", self);
    Ok(())
  }
}
