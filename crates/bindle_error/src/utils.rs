use std::{borrow::Cow, path::Path};

use bindle_common::CWD;
use sugar_path::SugarPath;

pub trait PathExt {
  fn may_display_relative(&self) -> Cow<str>;
}

impl PathExt for Path {
  fn may_display_relative(&self) -> Cow<str> {
    let path = if CWD.is_set() && self.is_absolute() {
      CWD.with(|cwd| self.relative(cwd))
    } else {
      return self.to_string_lossy();
    };
    Cow::Owned(path.display().to_string())
  }
}
