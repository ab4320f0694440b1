//! Error types for SOR decoding.
//!
//! This module defines the [`Error`] enum which represents all failures that
//! terminate a parse. Conditions the decoder tolerates (a checksum mismatch, a
//! file declaring more than one trace) are not errors; they are reported as
//! [`ParseWarning`](crate::ParseWarning)s through the parse observer.
//!
//! # Example
//!
//! ```no_run
//! use sor_rs::{SorFile, Error, Result};
//!
//! fn load(path: &str) -> Result<()> {
//!     match SorFile::from_file(path) {
//!         Ok(sor) => {
//!             println!("Decoded {} trace points", sor.trace().len());
//!             Ok(())
//!         }
//!         Err(Error::HeaderMismatch { expected, actual }) => {
//!             eprintln!("Corrupt block: wanted {expected:?}, found {actual:?}");
//!             Err(Error::HeaderMismatch { expected, actual })
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use core::fmt;

/// Errors that can occur while decoding a SOR file.
#[derive(Debug)]
pub enum Error {
    /// The input could not be opened or read, including truncated files.
    IOError(std::io::Error),

    /// A format-2 block did not start with its `<name>\0` tag.
    HeaderMismatch {
        /// The tag that was expected, including the trailing NUL.
        expected: String,
        /// The bytes actually found, decoded lossily.
        actual: String,
    },

    /// An integer read was requested with a width other than 2, 4 or 8 bytes.
    ///
    /// This is a programming error in a schema table, never a property of the file.
    InvalidFieldWidth(usize),

    /// A block was visited before a block it depends on had been decoded.
    ///
    /// `DataPts` and `KeyEvents` both need the index of refraction and sample
    /// spacing from `FxdParams`.
    MissingBlock {
        /// Name of the block that has not been decoded yet.
        block: &'static str,
        /// Name of the block that needed it.
        required_by: &'static str,
    },

    /// A decoded parameter cannot be used to derive physical units.
    InvalidParameter(String),

    /// Failed to serialize decoded results.
    SerializationError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IOError(e) => write!(f, "I/O error: {e}"),
            Error::HeaderMismatch { expected, actual } => {
                write!(f, "Incorrect block header: expected {expected:?}, found {actual:?}")
            }
            Error::InvalidFieldWidth(width) => {
                write!(f, "Invalid field width: {width} bytes (expected 2, 4 or 8)")
            }
            Error::MissingBlock { block, required_by } => {
                write!(f, "Block {required_by} requires {block} to be decoded first")
            }
            Error::InvalidParameter(s) => write!(f, "Invalid parameter: {s}"),
            Error::SerializationError(s) => write!(f, "Serialization error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IOError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IOError(err)
    }
}

/// A specialized Result type for SOR operations.
pub type Result<T> = core::result::Result<T, Error>;
