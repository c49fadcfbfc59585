use bindle_core::ModuleId;
use bindle_error::ErrorKind;

mod common;
use common::*;

#[tokio::test]
async fn discovers_all_modules_reachable_from_the_entry() {
  let mut bundler = TestProject::new()
    .with_module(
      "/project/src/index.js",
      "import './a'; import './b';",
      vec![import("./a"), import("./b")],
    )
    .with_module("/project/src/a.js", "export const a = 1;", vec![])
    .with_module("/project/src/b.js", "import './a';", vec![import("./a")])
    .bundler(&["src/index.js"]);

  let graph = bundler.scan().await.unwrap();
  assert_eq!(graph.module_count(), 3);

  let entry = graph.get_module(&local("/project/src/index.js")).unwrap();
  assert!(entry.is_entry);
  assert_eq!(
    entry.dependencies,
    vec![local("/project/src/a.js"), local("/project/src/b.js")]
  );

  let a = graph.get_module(&local("/project/src/a.js")).unwrap();
  assert!(!a.is_entry);
  assert_eq!(a.distinct_dependent_count(), 2);
}

#[tokio::test]
async fn dependents_accumulate_one_entry_per_import_edge() {
  let mut bundler = TestProject::new()
    .with_module(
      "/project/src/index.js",
      "import './a'; import './a';",
      vec![import("./a"), import("./a")],
    )
    .with_module("/project/src/a.js", "", vec![])
    .bundler(&["src/index.js"]);

  let graph = bundler.scan().await.unwrap();
  let a = graph.get_module(&local("/project/src/a.js")).unwrap();
  assert_eq!(a.dependents.len(), 2);
  assert_eq!(a.distinct_dependent_count(), 1);
}

#[tokio::test]
async fn dynamic_import_targets_become_entry_points() {
  let mut bundler = TestProject::new()
    .with_module(
      "/project/src/index.js",
      "import('./feature');",
      vec![dynamic_import("./feature")],
    )
    .with_module("/project/src/feature.js", "", vec![])
    .bundler(&["src/index.js"]);

  let graph = bundler.scan().await.unwrap();
  let feature = local("/project/src/feature.js");
  assert!(graph.is_entry_point(&feature));
  assert!(graph.get_module(&feature).unwrap().is_entry);
  // User-defined entries come first.
  assert_eq!(
    graph.entry_points().collect::<Vec<_>>(),
    vec![&local("/project/src/index.js"), &feature]
  );
}

#[tokio::test]
async fn import_cycles_terminate() {
  let mut bundler = TestProject::new()
    .with_module("/project/src/index.js", "import './a';", vec![import("./a")])
    .with_module("/project/src/a.js", "import './index';", vec![import("./index")])
    .bundler(&["src/index.js"]);

  let graph = bundler.scan().await.unwrap();
  assert_eq!(graph.module_count(), 2);
  let entry = graph.get_module(&local("/project/src/index.js")).unwrap();
  assert_eq!(entry.dependents, vec![local("/project/src/a.js")]);
}

#[tokio::test]
async fn duplicate_entries_load_once() {
  let mut bundler = TestProject::new()
    .with_module("/project/src/index.js", "", vec![])
    .bundler(&["src/index.js", "src/index.js"]);

  let graph = bundler.scan().await.unwrap();
  assert_eq!(graph.module_count(), 1);
  assert_eq!(graph.entry_points().count(), 1);
}

#[tokio::test]
async fn unresolved_imports_are_fatal() {
  let mut bundler = TestProject::new()
    .with_module(
      "/project/src/index.js",
      "import './missing';",
      vec![broken_import("./missing")],
    )
    .bundler(&["src/index.js"]);

  let err = bundler.scan().await.unwrap_err();
  assert!(matches!(err.kind, ErrorKind::UnresolvedImport { .. }));
  let msg = err.kind.to_readable_string(PROJECT_CWD);
  assert!(msg.contains("./missing"));
  assert!(msg.contains("src/index.js"));
}

#[tokio::test]
async fn read_failures_propagate() {
  let mut bundler = TestProject::new()
    .with_module("/project/src/index.js", "import './ghost';", vec![import("./ghost")])
    .bundler(&["src/index.js"]);

  let err = bundler.scan().await.unwrap_err();
  assert!(err.to_string().contains("/project/src/ghost.js"));
}

#[tokio::test]
async fn empty_input_is_rejected() {
  let mut bundler = TestProject::new()
    .with_module("/project/src/index.js", "", vec![])
    .bundler(&[]);

  let err = bundler.build().await.unwrap_err();
  assert!(err.to_string().contains("options.input"));
}

#[tokio::test]
async fn external_packages_get_no_module_record() {
  let mut bundler = TestProject::new()
    .with_module("/project/src/index.js", "import 'lodash';", vec![import("lodash")])
    .bundler(&["src/index.js"]);

  let graph = bundler.scan().await.unwrap();
  assert_eq!(graph.module_count(), 1);
  let entry = graph.get_module(&local("/project/src/index.js")).unwrap();
  assert_eq!(entry.dependencies, vec![ModuleId::new("lodash", true)]);
  assert!(graph.get_module(&ModuleId::new("lodash", true)).is_none());
}
