// src/blocks/mod.rs
//! SOR block decoders.
//!
//! Every block after the map is decoded by its own module. Format-dependent
//! layouts are expressed as constant tables chosen once per block from the
//! detected [`FormatVersion`](crate::FormatVersion).

mod checksum_block;
mod common;
mod data_points;
mod fixed_params;
mod general_params;
mod key_events;
mod map_block;
mod supplier_params;

pub use checksum_block::ChecksumResult;
pub use common::{BLOCK_KINDS, BlockKind, SorBlock};
pub use data_points::DataPoints;
pub use fixed_params::{
    FXD_FIELDS_V1, FXD_FIELDS_V2, FieldSpec, FieldType, FixedParams, distance_unit_name,
    fixed_param_schema,
};
pub use general_params::GeneralParams;
pub use key_events::{EventSummary, KeyEvent, KeyEvents};
pub use map_block::{BlockDescriptor, MAP_TAG, MapBlock};
pub use supplier_params::SupplierParams;

/// A decoded field rendered as text, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamField {
    pub name: String,
    pub text: String,
}

impl ParamField {
    pub fn new(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            text: text.to_string(),
        }
    }
}
