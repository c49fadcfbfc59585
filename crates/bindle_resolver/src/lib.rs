use std::path::PathBuf;

use bindle_common::ModuleId;
use sugar_path::{AsPath, SugarPathBuf};

#[derive(Debug)]
pub struct Resolver {
  cwd: PathBuf,
}

impl Resolver {
  pub fn with_cwd(cwd: PathBuf) -> Self {
    Self { cwd }
  }

  pub fn cwd(&self) -> &PathBuf {
    &self.cwd
  }
}

impl Default for Resolver {
  fn default() -> Self {
    Self {
      cwd: std::env::current_dir().unwrap(),
    }
  }
}

impl Resolver {
  pub fn resolve(&self, importer: Option<&str>, specifier: &str) -> bindle_error::Result<ModuleId> {
    // Bare specifiers (starting with neither '.' nor '/') imported from a
    // module are external packages and keep their raw specifier as id.
    if importer.is_some() && !specifier.as_path().is_absolute() && !specifier.starts_with('.') {
      return Ok(ModuleId::new(specifier, true));
    }

    let mut path = if specifier.as_path().is_absolute() {
      specifier.as_path().to_path_buf()
    } else if let Some(importer) = importer {
      importer
        .as_path()
        .parent()
        .map(|dir| dir.join(specifier))
        .unwrap_or_else(|| self.cwd.as_path().join(specifier))
        .into_absolutize()
    } else {
      self.cwd.as_path().join(specifier).into_absolutize()
    };

    add_js_extension(&mut path);
    Ok(ModuleId::new(path.to_string_lossy().to_string(), false))
  }
}

fn add_js_extension(path: &mut std::path::PathBuf) {
  if path.extension().is_none() {
    path.set_extension("js");
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bare_specifiers_are_external_packages() {
    let resolver = Resolver::with_cwd("/project".into());
    let id = resolver.resolve(Some("/project/src/index.js"), "lodash").unwrap();
    assert!(id.is_external());
    assert_eq!(id.id(), "lodash");
  }

  #[test]
  fn relative_specifiers_resolve_against_the_importer() {
    let resolver = Resolver::with_cwd("/project".into());
    let id = resolver
      .resolve(Some("/project/src/index.js"), "./util")
      .unwrap();
    assert!(!id.is_external());
    assert_eq!(id.id(), "/project/src/util.js");
  }

  #[test]
  fn entries_resolve_against_cwd() {
    let resolver = Resolver::with_cwd("/project".into());
    let id = resolver.resolve(None, "src/index.js").unwrap();
    assert_eq!(id.id(), "/project/src/index.js");
  }
}
