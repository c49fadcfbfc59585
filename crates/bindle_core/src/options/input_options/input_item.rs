#[derive(Debug, Clone)]
pub struct InputItem {
  /// Optional user-facing name for the entry. Falls back to the file stem.
  pub name: Option<String>,
  pub import: String,
}

impl From<String> for InputItem {
  fn from(import: String) -> Self {
    Self { name: None, import }
  }
}

impl From<&str> for InputItem {
  fn from(import: &str) -> Self {
    import.to_string().into()
  }
}
