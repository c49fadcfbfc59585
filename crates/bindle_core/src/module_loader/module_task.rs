use bindle_common::ModuleId;
use derivative::Derivative;
use tracing::instrument;

use super::Msg;
use crate::{BuildError, BuildResult, SharedContentReader, SharedImportResolver};

pub(crate) struct ModuleTask {
  pub(crate) id: ModuleId,
  pub(crate) is_entry: bool,
  pub(crate) tx: tokio::sync::mpsc::UnboundedSender<Msg>,
  pub(crate) import_resolver: SharedImportResolver,
  pub(crate) content_reader: SharedContentReader,
}

impl ModuleTask {
  #[instrument(skip_all)]
  pub(crate) async fn run(self) {
    let tx = self.tx.clone();
    match self.run_inner().await {
      Ok(result) => {
        tx.send(Msg::Loaded(result)).unwrap();
      }
      Err(err) => {
        tx.send(Msg::Error(err)).unwrap();
      }
    }
  }

  async fn run_inner(self) -> BuildResult<TaskResult> {
    tracing::trace!("loading {}", self.id);
    let code = self.content_reader.read(&self.id).await?;
    let records = self.import_resolver.resolve_imports(&self.id, &code).await?;

    let imports = records
      .into_iter()
      .map(|record| match record.resolved_id {
        Some(id) => Ok(ResolvedImport {
          id,
          is_dynamic: record.is_dynamic,
        }),
        None => Err(BuildError::unresolved_import(
          record.specifier,
          self.id.as_ref(),
        )),
      })
      .collect::<BuildResult<Vec<_>>>()?;

    Ok(TaskResult {
      module_id: self.id,
      code,
      imports,
      is_entry: self.is_entry,
    })
  }
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedImport {
  pub id: ModuleId,
  pub is_dynamic: bool,
}

#[derive(Derivative)]
#[derivative(Debug)]
pub(crate) struct TaskResult {
  pub module_id: ModuleId,
  #[derivative(Debug = "ignore")]
  pub code: String,
  pub imports: Vec<ResolvedImport>,
  pub is_entry: bool,
}
