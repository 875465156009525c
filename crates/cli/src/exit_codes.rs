//! CLI Exit Code Registry
//!
//! Single source of truth for `tdiff` exit codes. Pipelines that call
//! `tdiff` branch on these, so they are part of the shell contract.
//!
//! # Exit Code Ranges
//!
//! | Code | Domain    | Description                                      |
//! |------|-----------|--------------------------------------------------|
//! | 0    | Universal | Success: all three artifacts written             |
//! | 1    | Universal | General error (unspecified)                      |
//! | 2    | Universal | Usage error (bad args, empty job id)             |
//! | 3    | recon     | I/O error: unreadable input / unwritable output  |
//! | 4    | recon     | Malformed input: line too short for the key      |
//! | 5    | recon     | Invalid config file                              |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Map it in `recon_exit_code`

use targetdiff_recon::ReconError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Recon (3-9)
// =============================================================================

/// Input unreadable, output or staging directory unwritable.
pub const EXIT_RECON_IO: u8 = 3;

/// A target line has fewer fields than the position key needs.
pub const EXIT_RECON_MALFORMED: u8 = 4;

/// Config file failed to parse or validate.
pub const EXIT_RECON_INVALID_CONFIG: u8 = 5;

/// Map a ReconError to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::Io { .. } => EXIT_RECON_IO,
        ReconError::MalformedInput { .. } => EXIT_RECON_MALFORMED,
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_RECON_INVALID_CONFIG,
        ReconError::InvalidJobId(_) => EXIT_USAGE,
    }
}
