// blocks/common.rs
//! Common types and traits for SOR block decoding.
//!
//! This module provides:
//! - [`BlockKind`]: the block kinds this crate can decode, looked up by name
//! - [`SorBlock`]: trait for positioning on a block and checking its tag

use crate::{
    Error, Result,
    blocks::BlockDescriptor,
    parsing::ChecksumReader,
    types::FormatVersion,
};
use std::io::{Read, Seek, SeekFrom};

/// Known block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockKind {
    GeneralParams,
    SupplierParams,
    FixedParams,
    DataPoints,
    KeyEvents,
    Checksum,
}

/// Block names as they appear in the map, and the kind each one decodes as.
pub const BLOCK_KINDS: [(&str, BlockKind); 6] = [
    ("GenParams", BlockKind::GeneralParams),
    ("SupParams", BlockKind::SupplierParams),
    ("FxdParams", BlockKind::FixedParams),
    ("DataPts", BlockKind::DataPoints),
    ("KeyEvents", BlockKind::KeyEvents),
    ("Cksum", BlockKind::Checksum),
];

impl BlockKind {
    /// Look up the kind for a map entry name. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        BLOCK_KINDS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, kind)| *kind)
    }

    pub fn name(self) -> &'static str {
        BLOCK_KINDS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(n, _)| *n)
            .unwrap_or_default()
    }
}

impl core::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

pub trait SorBlock: Sized {
    const NAME: &'static str;

    /// Seek to the start of `block` and, in format 2, consume and check its
    /// `<NAME>\0` tag. Returns the offset of the first body byte.
    fn enter<R: Read + Seek>(
        reader: &mut ChecksumReader<R>,
        format: FormatVersion,
        block: &BlockDescriptor,
    ) -> Result<u64> {
        reader.seek(SeekFrom::Start(block.offset))?;
        if !format.has_block_tags() {
            return Ok(block.offset);
        }

        let expected = format!("{}\0", Self::NAME);
        let found = reader.read_up_to(expected.len())?;
        if found != expected.as_bytes() {
            return Err(Error::HeaderMismatch {
                expected,
                actual: String::from_utf8_lossy(&found).into_owned(),
            });
        }
        Ok(block.offset + expected.len() as u64)
    }
}
