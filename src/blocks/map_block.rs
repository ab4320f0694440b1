//! Map block - the block index at the start of every SOR file.
//!
//! The map lists every other block by name, version and byte size. Blocks are
//! laid out back to back after the map, so absolute offsets are the running
//! sum of the declared sizes starting at the map's own size.

use crate::{
    Result,
    parsing::{
        ChecksumReader,
        primitives::{read_cstring, read_u16, read_u32},
    },
    types::FormatVersion,
};
use std::collections::BTreeMap;
use std::io::{Read, Seek, SeekFrom};

/// Tag that opens a format-2 file.
pub const MAP_TAG: &str = "Map";

/// One entry of the block index.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockDescriptor {
    /// Block name as stored in the map (e.g. "FxdParams").
    pub name: String,
    /// Block version in hundredths (e.g. 200 for 2.00).
    pub version_hundredths: u16,
    /// Declared size of the block in bytes, including its tag in format 2.
    pub size: u32,
    /// Absolute file offset of the block.
    pub offset: u64,
    /// Position of the entry in the map table.
    pub order: usize,
}

impl BlockDescriptor {
    /// Version formatted with two decimals, e.g. `"2.00"`.
    pub fn version(&self) -> String {
        format_hundredths(self.version_hundredths)
    }

    /// Offset one past the last byte of the block.
    #[inline]
    pub fn end(&self) -> u64 {
        self.offset + u64::from(self.size)
    }
}

pub(crate) fn format_hundredths(value: u16) -> String {
    format!("{:.2}", f64::from(value) * 0.01)
}

/// Decoded map block.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapBlock {
    /// Layout generation detected from the leading tag.
    pub format: FormatVersion,
    /// Overall format version in hundredths.
    pub version_hundredths: u16,
    /// Declared size of the map block itself.
    pub size: u32,
    /// Number of entries following the map's own entry.
    pub block_count: u16,
    /// Entries keyed by block name. A repeated name keeps the last entry.
    pub blocks: BTreeMap<String, BlockDescriptor>,
}

impl MapBlock {
    /// Decode the map from the start of the file.
    ///
    /// Always rewinds to offset 0 first, which also resets the reader's
    /// running checksum. If the leading string is not `"Map"` the file is
    /// treated as format 1 and the cursor rewinds to 0 again.
    pub fn decode<R: Read + Seek>(reader: &mut ChecksumReader<R>) -> Result<Self> {
        reader.seek(SeekFrom::Start(0))?;

        let tag = read_cstring(reader)?;
        let format = if tag == MAP_TAG {
            FormatVersion::V2
        } else {
            reader.seek(SeekFrom::Start(0))?;
            FormatVersion::V1
        };
        log::debug!("{format} version");

        let version_hundredths = read_u16(reader)?;
        let size = read_u32(reader)?;
        // The stored count includes the map's own entry.
        let block_count = read_u16(reader)?.saturating_sub(1);

        let mut blocks = BTreeMap::new();
        let mut offset = u64::from(size);
        for order in 0..usize::from(block_count) {
            let name = read_cstring(reader)?;
            let block_version = read_u16(reader)?;
            let block_size = read_u32(reader)?;

            blocks.insert(
                name.clone(),
                BlockDescriptor {
                    name,
                    version_hundredths: block_version,
                    size: block_size,
                    offset,
                    order,
                },
            );
            offset += u64::from(block_size);
        }

        Ok(Self {
            format,
            version_hundredths,
            size,
            block_count,
            blocks,
        })
    }

    /// Format version formatted with two decimals, e.g. `"2.00"`.
    pub fn version(&self) -> String {
        format_hundredths(self.version_hundredths)
    }

    /// Look up a block by name.
    pub fn block(&self, name: &str) -> Option<&BlockDescriptor> {
        self.blocks.get(name)
    }

    /// Blocks in the order declared by the map. This is the processing order.
    pub fn blocks_in_order(&self) -> Vec<&BlockDescriptor> {
        let mut list: Vec<_> = self.blocks.values().collect();
        list.sort_by_key(|b| b.order);
        list
    }

    /// Blocks in physical file order.
    pub fn blocks_by_offset(&self) -> Vec<&BlockDescriptor> {
        let mut list: Vec<_> = self.blocks.values().collect();
        list.sort_by_key(|b| (b.offset, b.order));
        list
    }
}
