//! Shared types used across the library.

/// Speed of light in vacuum, in kilometers per microsecond.
pub const SPEED_OF_LIGHT_KM_PER_US: f64 = 299_792.458 / 1e6;

/// Bellcore/Telcordia SOR layout generation.
///
/// Format 2 files start with a `Map\0` tag and prefix every block with its
/// own `<name>\0` tag. Format 1 files carry no tags at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatVersion {
    V1,
    V2,
}

impl FormatVersion {
    /// Numeric tag of the format (1 or 2).
    pub fn as_u8(self) -> u8 {
        match self {
            FormatVersion::V1 => 1,
            FormatVersion::V2 => 2,
        }
    }

    /// Whether blocks carry a leading `<name>\0` tag.
    #[inline]
    pub fn has_block_tags(self) -> bool {
        self == FormatVersion::V2
    }
}

impl core::fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Bellcore {}.x", self.as_u8())
    }
}

/// Reference level used to turn raw samples into loss values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OffsetMode {
    /// Loss relative to the largest raw sample (start value).
    #[default]
    Stv,
    /// Loss relative to the smallest raw sample (average floor level).
    Afl,
    /// No reference: loss is the negated raw sample.
    None,
}

impl OffsetMode {
    /// Parse the three-letter mode code. Any code other than `STV` or `AFL`
    /// selects [`OffsetMode::None`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "STV" => OffsetMode::Stv,
            "AFL" => OffsetMode::Afl,
            _ => OffsetMode::None,
        }
    }

    /// Reference raw value for this mode given the series extremes.
    pub fn reference(self, min: u16, max: u16) -> f64 {
        match self {
            OffsetMode::Stv => f64::from(max),
            OffsetMode::Afl => f64::from(min),
            OffsetMode::None => 0.0,
        }
    }
}

/// One sample of the reconstructed optical trace.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TracePoint {
    /// Distance from the instrument, in kilometers.
    pub distance_km: f64,
    /// Loss relative to the reference level, in dB.
    pub loss_db: f64,
}
