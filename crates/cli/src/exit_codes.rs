//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of the
//! shell contract; scripts rely on them.
//!
//! | Code | Description                                   |
//! |------|-----------------------------------------------|
//! | 0    | Success                                       |
//! | 1    | General error (unspecified)                   |
//! | 2    | CLI usage error (bad args)                    |
//! | 3    | Source read / IO failure                      |
//! | 4    | Required column missing from source           |
//! | 5    | Config parse error                            |

use freightlens_audit::AuditError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

// Code 2 (usage error) is emitted by clap itself on bad arguments.

/// Source read failure (missing file, CSV parse error, write failure).
pub const EXIT_READ: u8 = 3;

/// Required column absent from the source header row.
pub const EXIT_MISSING_COLUMN: u8 = 4;

/// Audit config could not be parsed.
pub const EXIT_CONFIG: u8 = 5;

/// Map an engine error to its exit code.
pub fn audit_exit_code(err: &AuditError) -> u8 {
    match err {
        AuditError::ConfigParse(_) => EXIT_CONFIG,
        AuditError::MissingColumn { .. } => EXIT_MISSING_COLUMN,
        AuditError::Io(_) => EXIT_READ,
        AuditError::EmptyInput => EXIT_ERROR,
    }
}
