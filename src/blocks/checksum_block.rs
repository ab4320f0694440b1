//! Checksum block (Cksum) - CRC-16 over everything before the stored value.

use super::BlockDescriptor;
use super::common::SorBlock;
use crate::{
    Result,
    parsing::{ChecksumReader, primitives::read_u16},
    types::FormatVersion,
};
use std::io::{Read, Seek};

/// Outcome of checksum verification.
///
/// A mismatch is recorded here and reported as a warning; it never fails the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChecksumResult {
    /// CRC-16 over every byte read before the stored value.
    pub computed: u16,
    /// Value stored in the file.
    pub stored: u16,
    #[cfg_attr(feature = "serde", serde(rename = "match"))]
    pub matches: bool,
}

impl SorBlock for ChecksumResult {
    const NAME: &'static str = "Cksum";
}

impl ChecksumResult {
    pub fn decode<R: Read + Seek>(
        reader: &mut ChecksumReader<R>,
        format: FormatVersion,
        block: &BlockDescriptor,
    ) -> Result<Self> {
        Self::enter(reader, format, block)?;

        let computed = reader.digest();
        let stored = read_u16(reader)?;
        Ok(Self {
            computed,
            stored,
            matches: computed == stored,
        })
    }
}
