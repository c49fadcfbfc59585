use std::borrow::Cow;
use std::path::PathBuf;

mod chunk_id;
pub use chunk_id::*;
mod module_id;
pub use module_id::*;

// Fatal error messages display paths relative to the build cwd when set.
scoped_tls::scoped_thread_local!(pub static CWD: PathBuf);

pub type StaticStr = Cow<'static, str>;
