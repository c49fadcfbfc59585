use bindle_common::{ModuleId, CWD};
use bindle_error::format_err;
use futures::future::join_all;
use hashlink::LinkedHashSet;
use rustc_hash::{FxHashMap, FxHashSet};

pub(crate) mod module_task;

use module_task::{ModuleTask, TaskResult};

use crate::{
  BuildError, BuildResult, InputOptions, Module, ModuleGraph, SharedContentReader,
  SharedImportResolver, SharedResolver,
};

#[derive(Debug)]
pub(crate) enum Msg {
  Loaded(TaskResult),
  Error(BuildError),
}

/// Drives module discovery. Tasks run concurrently, one per module, and send
/// their results back over a channel; all graph mutation happens here, on the
/// receiving side.
pub(crate) struct ModuleLoader<'a> {
  graph: &'a mut ModuleGraph,
  resolver: SharedResolver,
  import_resolver: SharedImportResolver,
  content_reader: SharedContentReader,
  /// Ids a task has been spawned for. Guards against loading a module twice.
  loaded_modules: FxHashSet<ModuleId>,
  /// Dependents recorded before the module's own task finished.
  pending_dependents: FxHashMap<ModuleId, Vec<ModuleId>>,
  remaining_tasks: usize,
  tx: tokio::sync::mpsc::UnboundedSender<Msg>,
  rx: tokio::sync::mpsc::UnboundedReceiver<Msg>,
  errors: Vec<BuildError>,
  dynamic_imported_modules: LinkedHashSet<ModuleId>,
}

impl<'a> ModuleLoader<'a> {
  pub(crate) fn new(
    graph: &'a mut ModuleGraph,
    resolver: SharedResolver,
    import_resolver: SharedImportResolver,
    content_reader: SharedContentReader,
  ) -> Self {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    Self {
      graph,
      resolver,
      import_resolver,
      content_reader,
      loaded_modules: Default::default(),
      pending_dependents: Default::default(),
      remaining_tasks: 0,
      tx,
      rx,
      errors: Default::default(),
      dynamic_imported_modules: Default::default(),
    }
  }

  async fn resolve_entries(&self, input_options: &InputOptions) -> Vec<BuildResult<ModuleId>> {
    join_all(input_options.input.iter().map(|item| {
      let resolver = self.resolver.clone();
      let specifier = item.import.clone();
      async move {
        resolver
          .resolve(None, &specifier)
          .map_err(|_| BuildError::unresolved_entry(&specifier))
      }
    }))
    .await
  }

  pub(crate) async fn fetch_all_modules(mut self, input_options: &InputOptions) -> BuildResult<()> {
    if input_options.input.is_empty() {
      return Err(format_err!("You must supply options.input to bindle").into());
    }

    let resolved_entries = self.resolve_entries(input_options).await;

    resolved_entries
      .into_iter()
      .try_for_each(|entry| -> BuildResult<()> {
        let id = entry?;
        if id.is_external() {
          return CWD.set(&input_options.cwd, || {
            Err(BuildError::entry_cannot_be_external(id.as_ref()))
          });
        }
        self.graph.register_entry_point(id.clone());
        if self.loaded_modules.insert(id.clone()) {
          self.spawn_new_module_task(id, true);
        }
        Ok(())
      })?;

    while self.remaining_tasks > 0 {
      let msg = self.rx.recv().await.unwrap();
      match msg {
        Msg::Loaded(result) => {
          tracing::trace!("finished: {}", result.module_id);
          self.remaining_tasks -= 1;
          self.handle_msg_loaded(result);
        }
        Msg::Error(err) => {
          self.remaining_tasks -= 1;
          self.errors.push(err);
        }
      }
      tracing::trace!("remaining tasks: {}", self.remaining_tasks);
    }

    self.mark_dynamic_imported_modules();

    if self.errors.is_empty() {
      Ok(())
    } else {
      self.errors.into_iter().try_for_each(Err)
    }
  }

  fn handle_msg_loaded(&mut self, result: TaskResult) {
    let TaskResult {
      module_id,
      code,
      imports,
      is_entry,
    } = result;

    // A module record is created exactly once.
    if self.graph.get_module(&module_id).is_some() {
      return;
    }

    let mut dependencies = Vec::with_capacity(imports.len());
    for import in &imports {
      dependencies.push(import.id.clone());

      if import.id.is_external() {
        // External packages stay string-only references; no record, no task.
        continue;
      }

      if import.is_dynamic {
        self.dynamic_imported_modules.insert(import.id.clone());
      }

      if self.graph.get_module(&import.id).is_some() {
        if let Err(err) = self
          .graph
          .add_dependent_to_module(&import.id, module_id.clone())
        {
          self.errors.push(err);
        }
      } else {
        self
          .pending_dependents
          .entry(import.id.clone())
          .or_default()
          .push(module_id.clone());
      }

      if self.loaded_modules.insert(import.id.clone()) {
        self.spawn_new_module_task(import.id.clone(), false);
      }
    }

    let dependents = self.pending_dependents.remove(&module_id).unwrap_or_default();
    self.graph.add_module(Module {
      id: module_id,
      is_entry,
      code,
      dependencies,
      dependents,
    });
  }

  /// Dynamic-import targets are promoted to entry points once discovery
  /// settles. Promotion never demotes: a user-defined entry that is also
  /// dynamically imported stays an entry.
  fn mark_dynamic_imported_modules(&mut self) {
    for id in self.dynamic_imported_modules.iter() {
      if let Some(module) = self.graph.module_by_id.get_mut(id) {
        module.is_entry = true;
      }
      self.graph.entry_points.insert(id.clone());
    }
  }

  fn spawn_new_module_task(&mut self, module_id: ModuleId, is_entry: bool) {
    tracing::trace!("spawning new task for {}", module_id);
    self.remaining_tasks += 1;
    let task = ModuleTask {
      id: module_id,
      is_entry,
      tx: self.tx.clone(),
      import_resolver: self.import_resolver.clone(),
      content_reader: self.content_reader.clone(),
    };
    tokio::spawn(task.run());
  }
}
