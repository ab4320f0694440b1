//! Decoder configuration.

use crate::types::OffsetMode;

/// Options controlling how raw samples are turned into a trace.
///
/// ```
/// use sor_rs::{OffsetMode, ParseOptions};
///
/// let options = ParseOptions::default().with_offset_mode(OffsetMode::Afl);
/// assert_eq!(options.offset_mode, OffsetMode::Afl);
/// assert_eq!(options.distance_scaling, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseOptions {
    /// Reference level for loss values. Defaults to [`OffsetMode::Stv`].
    pub offset_mode: OffsetMode,
    /// Factor applied to every trace distance. Defaults to `1.0`.
    pub distance_scaling: f64,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            offset_mode: OffsetMode::Stv,
            distance_scaling: 1.0,
        }
    }
}

impl ParseOptions {
    pub fn with_offset_mode(mut self, mode: OffsetMode) -> Self {
        self.offset_mode = mode;
        self
    }

    pub fn with_distance_scaling(mut self, scaling: f64) -> Self {
        self.distance_scaling = scaling;
        self
    }
}
