//! Supplier parameters block (SupParams) - instrument and software identification.

use super::common::SorBlock;
use super::{BlockDescriptor, ParamField};
use crate::{
    Result,
    parsing::{ChecksumReader, primitives::read_cstring},
    types::FormatVersion,
};
use std::io::{Read, Seek};

const SUP_FIELDS: [&str; 7] = [
    "supplier",
    "OTDR",
    "OTDR S/N",
    "module",
    "module S/N",
    "software",
    "other",
];

/// Decoded SupParams block. The layout is the same in both formats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupplierParams {
    pub supplier: String,
    pub otdr: String,
    pub otdr_serial: String,
    pub module: String,
    pub module_serial: String,
    pub software: String,
    pub other: String,
    pub fields: Vec<ParamField>,
}

impl SorBlock for SupplierParams {
    const NAME: &'static str = "SupParams";
}

impl SupplierParams {
    pub fn decode<R: Read + Seek>(
        reader: &mut ChecksumReader<R>,
        format: FormatVersion,
        block: &BlockDescriptor,
    ) -> Result<Self> {
        Self::enter(reader, format, block)?;

        let mut values = Vec::with_capacity(SUP_FIELDS.len());
        for _ in SUP_FIELDS {
            values.push(read_cstring(reader)?);
        }

        let fields = SUP_FIELDS
            .iter()
            .zip(&values)
            .map(|(name, text)| ParamField::new(name, text))
            .collect();

        let mut it = values.into_iter();
        let mut next = || it.next().unwrap_or_default();
        Ok(Self {
            supplier: next(),
            otdr: next(),
            otdr_serial: next(),
            module: next(),
            module_serial: next(),
            software: next(),
            other: next(),
            fields,
        })
    }
}
