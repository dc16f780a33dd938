//! CLI exit code registry.
//!
//! Single source of truth for `paudit` exit codes. Exit codes are part of
//! the shell contract — scripts rely on them.

/// Success — run completed and the report was delivered (or delivery was
/// skipped on request).
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error — bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Config file missing, unparseable, failed validation, or the token
/// environment variable is unset.
pub const EXIT_INVALID_CONFIG: u8 = 70;

/// Runtime failure — batch file unreadable or not a JSON array of records.
pub const EXIT_RUNTIME: u8 = 71;

/// The run completed but webhook delivery failed.
pub const EXIT_DELIVERY: u8 = 72;
