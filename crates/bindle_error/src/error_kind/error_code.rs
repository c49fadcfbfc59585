pub const UNRESOLVED_ENTRY: &str = "UNRESOLVED_ENTRY";
pub const UNRESOLVED_IMPORT: &str = "UNRESOLVED_IMPORT";
pub const UNKNOWN_MODULE: &str = "UNKNOWN_MODULE";
pub const CHUNK_RESOLUTION_CYCLE: &str = "CHUNK_RESOLUTION_CYCLE";
pub const PANIC: &str = "PANIC";
pub const IO_ERROR: &str = "IO_ERROR";
