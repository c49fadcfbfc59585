use std::fmt::Display;

/// Canonical identity of a discovered module. For project-local files this is
/// the resolved absolute path; for external packages it is the bare specifier
/// with `is_external` set.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct ModuleId {
  value: String,
  is_external: bool,
}

impl Display for ModuleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.value)
  }
}

impl ModuleId {
  pub fn new(value: impl Into<String>, is_external: bool) -> Self {
    Self {
      value: value.into(),
      is_external,
    }
  }

  pub fn is_external(&self) -> bool {
    self.is_external
  }

  pub fn id(&self) -> &str {
    &self.value
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    &self.value
  }
}
