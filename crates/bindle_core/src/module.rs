use bindle_common::ModuleId;
use derivative::Derivative;
use rustc_hash::FxHashSet;

#[derive(Derivative)]
#[derivative(Debug)]
pub struct Module {
  pub id: ModuleId,
  /// True for user-defined entries and dynamic-import targets.
  pub is_entry: bool,
  /// Raw source text. Carried through to the output untouched.
  #[derivative(Debug = "ignore")]
  pub code: String,
  /// Import edges in source order. External packages are flagged on the id.
  pub dependencies: Vec<ModuleId>,
  /// Ids of modules importing this one. A dependent may show up once per
  /// import edge, so use [Module::distinct_dependent_count] when the number
  /// of importers matters.
  pub dependents: Vec<ModuleId>,
}

impl Module {
  pub fn distinct_dependent_count(&self) -> usize {
    self.dependents.iter().collect::<FxHashSet<_>>().len()
  }
}
