//! Configuration and constants for the trace format and the CLI.

/// Prefix of an address token (`POINTER:` followed by 8 hex digits)
pub const POINTER_PREFIX: &str = "POINTER:";

/// Number of hex digits after the pointer prefix
pub const ADDRESS_HEX_DIGITS: usize = 8;

// Record layout written by the tracer
pub const RECORD_TYPE_FIELD: &str = "type";
pub const RECORD_INSTRUCTION: &str = "instruction";
pub const RECORD_OBJECT: &str = "object";
pub const FN_FIELD: &str = "fn";
pub const OP_FIELD: &str = "op";
pub const ADDRESS_FIELD: &str = "address";
pub const CONTENT_FIELD: &str = "content";
pub const ARG_FIELDS: [&str; 4] = ["arg0", "arg1", "arg2", "arg3"];

/// Field holding the VM type tag of a dumped object
pub const OBJECT_TYPE_FIELD: &str = "ObjectType";

/// Type tag of the VM's hash table
pub const HASH_TABLE_TYPE: &str = "SQTable";

/// Node slots of a dumped hash table
pub const HASH_NODES_FIELD: &str = "_nodes";
pub const HASH_KEY_FIELD: &str = "key";
pub const HASH_VAL_FIELD: &str = "val";

/// Label of an object without a declared type
pub const UNKNOWN_TYPE: &str = "Unknown type";

// Placeholder texts shown in place of unreachable values
pub const MISSING_REFERENCE_TEXT: &str = "<reference not found>";
pub const CYCLE_TEXT: &str = "<cycle>";

/// Bytes scanned from the end of a file when looking for a truncated trace
pub const TRUNCATION_SCAN_BYTES: usize = 8;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Default expansion depth for `show`
pub const DEFAULT_OUTLINE_DEPTH: usize = 6;

/// Upper bound on `--depth`
pub const MAX_OUTLINE_DEPTH: usize = 64;
