//! Driver error types.
//!
//! Only I/O can actually fail a conversion: broken preset code degrades
//! to skipped statements, unknown wave modes fall back, and bad scalar
//! values are replaced by defaults. Everything recoverable is reported
//! as a diagnostic instead of an error.

use std::path::PathBuf;

use thiserror::Error;

/// A failed conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The preset file could not be read.
    #[error("could not read input file '{}': {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The shader file could not be written.
    #[error("could not write output file '{}': {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
