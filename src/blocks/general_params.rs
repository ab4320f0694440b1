//! General parameters block (GenParams) - cable, fiber and operator metadata.

use super::common::SorBlock;
use super::{BlockDescriptor, ParamField};
use crate::{
    Result,
    parsing::{
        ChecksumReader,
        primitives::{read_cstring, read_fixed_string, read_i32, read_u16},
    },
    types::FormatVersion,
};
use std::io::{Read, Seek};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenFieldType {
    /// NUL-terminated string.
    Text,
    /// Two-character code.
    Code,
    /// u16 rendered with an "nm" suffix.
    Wavelength,
    /// u16 rendered as a plain number.
    Number,
    /// i32 rendered as a plain number.
    Offset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenSlot {
    CableId,
    FiberId,
    FiberType,
    Wavelength,
    LocationA,
    LocationB,
    CableCode,
    BuildCondition,
    UserOffset,
    UserOffsetDistance,
    Operator,
    Comments,
}

struct GenField {
    name: &'static str,
    ty: GenFieldType,
    slot: GenSlot,
}

const fn field(name: &'static str, ty: GenFieldType, slot: GenSlot) -> GenField {
    GenField { name, ty, slot }
}

const GEN_FIELDS_V1: [GenField; 10] = [
    field("cable ID", GenFieldType::Text, GenSlot::CableId),
    field("fiber ID", GenFieldType::Text, GenSlot::FiberId),
    field("wavelength", GenFieldType::Wavelength, GenSlot::Wavelength),
    field("location A", GenFieldType::Text, GenSlot::LocationA),
    field("location B", GenFieldType::Text, GenSlot::LocationB),
    field("cable code/fiber type", GenFieldType::Text, GenSlot::CableCode),
    field("build condition", GenFieldType::Code, GenSlot::BuildCondition),
    field("user offset", GenFieldType::Offset, GenSlot::UserOffset),
    field("operator", GenFieldType::Text, GenSlot::Operator),
    field("comments", GenFieldType::Text, GenSlot::Comments),
];

const GEN_FIELDS_V2: [GenField; 12] = [
    field("cable ID", GenFieldType::Text, GenSlot::CableId),
    field("fiber ID", GenFieldType::Text, GenSlot::FiberId),
    field("fiber type", GenFieldType::Number, GenSlot::FiberType),
    field("wavelength", GenFieldType::Wavelength, GenSlot::Wavelength),
    field("location A", GenFieldType::Text, GenSlot::LocationA),
    field("location B", GenFieldType::Text, GenSlot::LocationB),
    field("cable code/fiber type", GenFieldType::Text, GenSlot::CableCode),
    field("build condition", GenFieldType::Code, GenSlot::BuildCondition),
    field("user offset", GenFieldType::Offset, GenSlot::UserOffset),
    field(
        "user offset distance",
        GenFieldType::Offset,
        GenSlot::UserOffsetDistance,
    ),
    field("operator", GenFieldType::Text, GenSlot::Operator),
    field("comments", GenFieldType::Text, GenSlot::Comments),
];

fn schema(format: FormatVersion) -> &'static [GenField] {
    match format {
        FormatVersion::V1 => &GEN_FIELDS_V1,
        FormatVersion::V2 => &GEN_FIELDS_V2,
    }
}

/// Decoded GenParams block.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneralParams {
    /// Two-letter language code.
    pub language: String,
    pub cable_id: String,
    pub fiber_id: String,
    /// Fiber type code (format 2 only).
    pub fiber_type: Option<u16>,
    /// Nominal wavelength in nanometers.
    pub wavelength_nm: u16,
    pub location_a: String,
    pub location_b: String,
    pub cable_code: String,
    /// Two-letter build condition code, see [`GeneralParams::build_condition_description`].
    pub build_condition: String,
    pub user_offset: i32,
    /// User offset distance (format 2 only).
    pub user_offset_distance: Option<i32>,
    pub operator: String,
    pub comments: String,
    /// Every field in file order, rendered as text.
    pub fields: Vec<ParamField>,
}

impl SorBlock for GeneralParams {
    const NAME: &'static str = "GenParams";
}

impl GeneralParams {
    pub fn decode<R: Read + Seek>(
        reader: &mut ChecksumReader<R>,
        format: FormatVersion,
        block: &BlockDescriptor,
    ) -> Result<Self> {
        Self::enter(reader, format, block)?;

        let mut params = GeneralParams {
            language: read_fixed_string(reader, 2)?,
            ..Default::default()
        };
        params.fields.push(ParamField::new("language", &params.language));

        for spec in schema(format) {
            let text = match spec.ty {
                GenFieldType::Text => read_cstring(reader)?,
                GenFieldType::Code => read_fixed_string(reader, 2)?,
                GenFieldType::Wavelength => {
                    let v = read_u16(reader)?;
                    params.wavelength_nm = v;
                    format!("{v} nm")
                }
                GenFieldType::Number => {
                    let v = read_u16(reader)?;
                    params.fiber_type = Some(v);
                    v.to_string()
                }
                GenFieldType::Offset => {
                    let v = read_i32(reader)?;
                    match spec.slot {
                        GenSlot::UserOffsetDistance => params.user_offset_distance = Some(v),
                        _ => params.user_offset = v,
                    }
                    v.to_string()
                }
            };

            match spec.slot {
                GenSlot::CableId => params.cable_id = text.clone(),
                GenSlot::FiberId => params.fiber_id = text.clone(),
                GenSlot::LocationA => params.location_a = text.clone(),
                GenSlot::LocationB => params.location_b = text.clone(),
                GenSlot::CableCode => params.cable_code = text.clone(),
                GenSlot::BuildCondition => params.build_condition = text.clone(),
                GenSlot::Operator => params.operator = text.clone(),
                GenSlot::Comments => params.comments = text.clone(),
                // numeric slots were filled while reading
                GenSlot::FiberType
                | GenSlot::Wavelength
                | GenSlot::UserOffset
                | GenSlot::UserOffsetDistance => {}
            }
            params.fields.push(ParamField::new(spec.name, &text));
        }

        Ok(params)
    }

    /// Human readable meaning of the build condition code.
    pub fn build_condition_description(&self) -> &'static str {
        match self.build_condition.as_str() {
            "BC" => "as-built",
            "CC" => "as-current",
            "RC" => "as-repaired",
            "OT" => "other",
            _ => "unknown",
        }
    }
}
