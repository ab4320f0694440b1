//! Key events block (KeyEvents) - detected splices, connectors and breaks.

use super::common::SorBlock;
use super::{BlockDescriptor, FixedParams};
use crate::{
    Result,
    parsing::{
        ChecksumReader,
        primitives::{
            read_bytes, read_cstring, read_fixed_string, read_i16, read_i32, read_u16, read_u32,
        },
    },
    types::FormatVersion,
};
use std::io::{Read, Seek};

/// Bytes of reserved per-event fields present only in format 2 (five u32 values).
const V2_EVENT_RESERVED: usize = 20;

/// Scale for slope, splice, reflection, total loss and ORL values.
const LOSS_FACTOR: f64 = 0.001;

/// One detected event.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyEvent {
    /// Event number as stored in the file.
    pub id: u16,
    /// Eight-character event type code, e.g. `"1F9999LS"`.
    pub event_type: String,
    pub distance_km: f64,
    /// Slope in dB/km.
    pub slope: f64,
    pub splice_loss_db: f64,
    pub reflection_loss_db: f64,
    pub comment: String,
}

impl KeyEvent {
    /// Whether the type code marks a reflective event (leading `1`).
    pub fn is_reflective(&self) -> bool {
        self.event_type.as_bytes().first() == Some(&b'1')
    }

    /// Whether the type code marks the end of the fiber (`E` in second place).
    pub fn is_end_of_fiber(&self) -> bool {
        self.event_type.as_bytes().get(1) == Some(&b'E')
    }
}

/// Whole-fiber summary following the event list.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventSummary {
    pub total_loss_db: f64,
    /// Optical return loss in dB.
    pub orl_db: f64,
    /// Start of the loss measurement span, in km.
    pub loss_start_km: f64,
    /// End of the loss measurement span, in km.
    pub loss_finish_km: f64,
    /// Start of the ORL span, in km.
    pub orl_start_km: f64,
    /// End of the ORL span, in km.
    pub orl_finish_km: f64,
}

/// Decoded KeyEvents block.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyEvents {
    pub events: Vec<KeyEvent>,
    pub summary: EventSummary,
}

impl SorBlock for KeyEvents {
    const NAME: &'static str = "KeyEvents";
}

impl KeyEvents {
    pub fn decode<R: Read + Seek>(
        reader: &mut ChecksumReader<R>,
        format: FormatVersion,
        block: &BlockDescriptor,
        fixed: &FixedParams,
    ) -> Result<Self> {
        Self::enter(reader, format, block)?;

        let count = read_u16(reader)?;
        let factor = fixed.event_distance_factor();

        let mut events = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            let id = read_u16(reader)?;
            let distance_km = f64::from(read_u32(reader)?) * factor;
            let slope = f64::from(read_i16(reader)?) * LOSS_FACTOR;
            let splice_loss_db = f64::from(read_i16(reader)?) * LOSS_FACTOR;
            let reflection_loss_db = f64::from(read_i32(reader)?) * LOSS_FACTOR;
            let event_type = read_fixed_string(reader, 8)?;
            if format == FormatVersion::V2 {
                read_bytes(reader, V2_EVENT_RESERVED)?;
            }
            let comment = read_cstring(reader)?;

            events.push(KeyEvent {
                id,
                event_type,
                distance_km,
                slope,
                splice_loss_db,
                reflection_loss_db,
                comment,
            });
        }

        let summary = EventSummary {
            total_loss_db: f64::from(read_i32(reader)?) * LOSS_FACTOR,
            loss_start_km: f64::from(read_i32(reader)?) * factor,
            loss_finish_km: f64::from(read_u32(reader)?) * factor,
            orl_db: f64::from(read_u16(reader)?) * LOSS_FACTOR,
            orl_start_km: f64::from(read_i32(reader)?) * factor,
            orl_finish_km: f64::from(read_u32(reader)?) * factor,
        };

        Ok(Self { events, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_code_flags() {
        let ev = KeyEvent {
            event_type: "0F9999LS".into(),
            ..Default::default()
        };
        assert!(!ev.is_reflective());
        assert!(!ev.is_end_of_fiber());
        let ev = KeyEvent {
            event_type: "1E9999LS".into(),
            ..Default::default()
        };
        assert!(ev.is_reflective());
        assert!(ev.is_end_of_fiber());
    }
}
