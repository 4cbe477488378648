//! Stable exit codes for the launcher binary.

/// Options resolved and printed.
pub const OK: i32 = 0;
/// Arguments, environment, or config could not be resolved.
pub const INVALID: i32 = 1;
