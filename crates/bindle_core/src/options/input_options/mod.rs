use std::path::PathBuf;

mod input_item;
pub use input_item::*;

#[derive(Debug)]
pub struct InputOptions {
  pub input: Vec<InputItem>,
  pub cwd: PathBuf,
}

impl Default for InputOptions {
  fn default() -> Self {
    Self {
      input: Default::default(),
      cwd: std::env::current_dir().unwrap(),
    }
  }
}
