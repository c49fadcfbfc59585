use std::fmt::Display;

use crate::ModuleId;

/// The prefix is reserved: it never collides with a resolved file path or a
/// package specifier, so any id carrying it is recognized as a chunk id
/// without a lookup.
pub const CHUNK_ID_PREFIX: &str = "chunk_";

const CHUNK_HASH_LEN: usize = 8;

#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct ChunkId(String);

impl ChunkId {
  /// Derives the chunk id for a seed module. Stable across runs: the same
  /// module id always produces the same chunk id.
  pub fn from_module_id(seed: &ModuleId) -> Self {
    let hash = blake3::hash(seed.id().as_bytes()).to_hex();
    Self(format!("{}{}", CHUNK_ID_PREFIX, &hash.as_str()[..CHUNK_HASH_LEN]))
  }

  pub fn is_chunk_id(value: &str) -> bool {
    value.starts_with(CHUNK_ID_PREFIX)
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl Display for ChunkId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for ChunkId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}
