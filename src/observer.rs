//! Reporting of non-fatal conditions found while decoding.
//!
//! The decoder never writes to a global logger directly for tolerated
//! conditions. Instead every [`ParseWarning`] goes to a [`ParseObserver`]
//! supplied by the caller. [`LogObserver`] forwards them to the `log` facade
//! and is what [`SorFile::from_file`](crate::SorFile::from_file) uses.

use crate::blocks::BlockDescriptor;

/// A condition that does not stop the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// The data points block declares more than one trace; only the first is used.
    MultipleTraces { count: i16 },
    /// The stored checksum differs from the one computed over the bytes read.
    ChecksumMismatch { computed: u16, stored: u16 },
    /// The map lists a block this decoder has no handler for; it was skipped.
    UnknownBlock { name: String },
}

impl core::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseWarning::MultipleTraces { count } => {
                write!(f, "Cannot handle multiple traces ({count}); using first trace")
            }
            ParseWarning::ChecksumMismatch { computed, stored } => write!(
                f,
                "Checksum mismatch: computed {computed:#06X}, stored {stored:#06X}"
            ),
            ParseWarning::UnknownBlock { name } => write!(f, "Skipping unknown block {name:?}"),
        }
    }
}

/// Sink for parse progress and warnings.
pub trait ParseObserver {
    /// Called before each block listed in the map is visited.
    fn on_block(&mut self, _block: &BlockDescriptor) {}

    fn on_warning(&mut self, warning: &ParseWarning);
}

/// Observer that forwards to the `log` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ParseObserver for LogObserver {
    fn on_block(&mut self, block: &BlockDescriptor) {
        log::debug!(
            "Block {} v{} at offset {} ({} bytes)",
            block.name,
            block.version(),
            block.offset,
            block.size
        );
    }

    fn on_warning(&mut self, warning: &ParseWarning) {
        match warning {
            ParseWarning::UnknownBlock { .. } => log::debug!("{warning}"),
            _ => log::warn!("{warning}"),
        }
    }
}

/// Collects warnings in order of occurrence.
impl ParseObserver for Vec<ParseWarning> {
    fn on_warning(&mut self, warning: &ParseWarning) {
        self.push(warning.clone());
    }
}
