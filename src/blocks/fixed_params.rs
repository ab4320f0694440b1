//! Fixed parameters block (FxdParams) - acquisition settings.
//!
//! The block is a flat record of fixed-width fields. Its layout differs between
//! format 1 and format 2, so each format has its own [`FieldSpec`] table and the
//! decoder walks whichever table matches the file. Offsets in the tables are
//! relative to the first byte after the block tag.
//!
//! Besides the raw fields, two values are derived once decoding is done:
//! the spatial resolution of one sample (meters) and the total trace range
//! (kilometers). Both depend on the sample spacing and the index of
//! refraction, which is why data points and key events can only be decoded
//! after this block.

use super::common::SorBlock;
use super::{BlockDescriptor, ParamField};
use crate::{
    Error, Result,
    parsing::{
        ChecksumReader,
        primitives::{read_fixed_string, read_int, read_uint},
    },
    types::{FormatVersion, SPEED_OF_LIGHT_KM_PER_US},
};
use chrono::{DateTime, Utc};
use std::io::{Read, Seek, SeekFrom};

/// How the raw bytes of a field are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Signed little-endian integer, rendered as-is.
    Signed,
    /// Unsigned little-endian integer, multiplied by the field's scale.
    Unsigned,
    /// Fixed-width text.
    Text,
}

/// One row of a fixed-parameter layout table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Byte offset from the start of the block body.
    pub offset: u64,
    pub width: usize,
    pub ty: FieldType,
    pub scale: Option<f64>,
    /// Decimal places used when rendering; `None` or zero renders the plain value.
    pub precision: Option<usize>,
    pub unit: &'static str,
}

const fn spec(
    name: &'static str,
    offset: u64,
    width: usize,
    ty: FieldType,
    scale: Option<f64>,
    precision: Option<usize>,
    unit: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        offset,
        width,
        ty,
        scale,
        precision,
        unit,
    }
}

const DATE_TIME: &str = "date/time";
const UNIT: &str = "unit";
const WAVELENGTH: &str = "wavelength";
const ACQ_OFFSET: &str = "acquisition offset";
const ACQ_OFFSET_DISTANCE: &str = "acquisition offset distance";
const PULSE_WIDTH_ENTRIES: &str = "number of pulse width entries";
const PULSE_WIDTH: &str = "pulse width";
const SAMPLE_SPACING: &str = "sample spacing";
const NUM_DATA_POINTS: &str = "num data points";
const INDEX: &str = "index";
const BACKSCATTER: &str = "BC";
const NUM_AVERAGES: &str = "num averages";
const AVERAGING_TIME: &str = "averaging time";
const ACQ_RANGE: &str = "acquisition range";
const ACQ_RANGE_DISTANCE: &str = "acquisition range distance";
const FRONT_PANEL_OFFSET: &str = "front panel offset";
const NOISE_FLOOR_LEVEL: &str = "noise floor level";
const NOISE_FLOOR_SCALING: &str = "noise floor scaling factor";
const POWER_OFFSET: &str = "power offset first point";
const LOSS_THR: &str = "loss thr";
const REFL_THR: &str = "refl thr";
const EOT_THR: &str = "EOT thr";
const TRACE_TYPE: &str = "trace type";
const X1: &str = "X1";
const Y1: &str = "Y1";
const X2: &str = "X2";
const Y2: &str = "Y2";

use FieldType::{Signed as I, Text as S, Unsigned as V};

pub const FXD_FIELDS_V1: [FieldSpec; 19] = [
    spec(DATE_TIME, 0, 4, V, None, None, ""),
    spec(UNIT, 4, 2, S, None, None, ""),
    spec(WAVELENGTH, 6, 2, V, Some(0.1), Some(1), "nm"),
    spec(ACQ_OFFSET, 8, 4, I, None, None, ""),
    spec(PULSE_WIDTH_ENTRIES, 12, 2, V, None, None, ""),
    spec(PULSE_WIDTH, 14, 2, V, None, Some(0), "ns"),
    spec(SAMPLE_SPACING, 16, 4, V, Some(1e-8), None, "usec"),
    spec(NUM_DATA_POINTS, 20, 4, V, None, None, ""),
    spec(INDEX, 24, 4, V, Some(1e-5), Some(6), ""),
    spec(BACKSCATTER, 28, 2, V, Some(-0.1), Some(2), "dB"),
    spec(NUM_AVERAGES, 30, 4, V, None, None, ""),
    spec(ACQ_RANGE, 34, 4, V, Some(2e-5), Some(6), "km"),
    spec(FRONT_PANEL_OFFSET, 38, 4, I, None, None, ""),
    spec(NOISE_FLOOR_LEVEL, 42, 2, V, None, None, ""),
    spec(NOISE_FLOOR_SCALING, 44, 2, I, None, None, ""),
    spec(POWER_OFFSET, 46, 2, V, None, None, ""),
    spec(LOSS_THR, 48, 2, V, Some(0.001), Some(3), "dB"),
    spec(REFL_THR, 50, 2, V, Some(-0.001), Some(3), "dB"),
    spec(EOT_THR, 52, 2, V, Some(0.001), Some(3), "dB"),
];

pub const FXD_FIELDS_V2: [FieldSpec; 27] = [
    spec(DATE_TIME, 0, 4, V, None, None, ""),
    spec(UNIT, 4, 2, S, None, None, ""),
    spec(WAVELENGTH, 6, 2, V, Some(0.1), Some(1), "nm"),
    spec(ACQ_OFFSET, 8, 4, I, None, None, ""),
    spec(ACQ_OFFSET_DISTANCE, 12, 4, I, None, None, ""),
    spec(PULSE_WIDTH_ENTRIES, 16, 2, V, None, None, ""),
    spec(PULSE_WIDTH, 18, 2, V, None, Some(0), "ns"),
    spec(SAMPLE_SPACING, 20, 4, V, Some(1e-8), None, "usec"),
    spec(NUM_DATA_POINTS, 24, 4, V, None, None, ""),
    spec(INDEX, 28, 4, V, Some(1e-5), Some(6), ""),
    spec(BACKSCATTER, 32, 2, V, Some(-0.1), Some(2), "dB"),
    spec(NUM_AVERAGES, 34, 4, V, None, None, ""),
    spec(AVERAGING_TIME, 38, 2, V, Some(0.1), Some(0), "sec"),
    spec(ACQ_RANGE, 40, 4, V, Some(2e-5), Some(6), "km"),
    spec(ACQ_RANGE_DISTANCE, 44, 4, I, None, None, ""),
    spec(FRONT_PANEL_OFFSET, 48, 4, I, None, None, ""),
    spec(NOISE_FLOOR_LEVEL, 52, 2, V, None, None, ""),
    spec(NOISE_FLOOR_SCALING, 54, 2, I, None, None, ""),
    spec(POWER_OFFSET, 56, 2, V, None, None, ""),
    spec(LOSS_THR, 58, 2, V, Some(0.001), Some(3), "dB"),
    spec(REFL_THR, 60, 2, V, Some(-0.001), Some(3), "dB"),
    spec(EOT_THR, 62, 2, V, Some(0.001), Some(3), "dB"),
    spec(TRACE_TYPE, 64, 2, S, None, None, ""),
    spec(X1, 66, 4, I, None, None, ""),
    spec(Y1, 70, 4, I, None, None, ""),
    spec(X2, 74, 4, I, None, None, ""),
    spec(Y2, 78, 4, I, None, None, ""),
];

/// Layout table for the given format.
pub fn fixed_param_schema(format: FormatVersion) -> &'static [FieldSpec] {
    match format {
        FormatVersion::V1 => &FXD_FIELDS_V1,
        FormatVersion::V2 => &FXD_FIELDS_V2,
    }
}

/// Map a two-letter distance unit code to its name.
pub fn distance_unit_name(code: &str) -> &'static str {
    match code {
        "mt" => "meters",
        "km" => "kilometers",
        "mi" => "miles",
        "kf" => "kilo-ft",
        _ => "unknown",
    }
}

/// Value of a single decoded field before rendering.
#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    Signed(i64),
    Unsigned { raw: u64, scaled: f64 },
    Text(String),
}

impl FieldValue {
    fn as_i64(&self) -> i64 {
        match self {
            FieldValue::Signed(v) => *v,
            FieldValue::Unsigned { raw, .. } => *raw as i64,
            FieldValue::Text(_) => 0,
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            FieldValue::Signed(v) => *v as f64,
            FieldValue::Unsigned { scaled, .. } => *scaled,
            FieldValue::Text(_) => 0.0,
        }
    }

    fn as_raw(&self) -> u64 {
        match self {
            FieldValue::Unsigned { raw, .. } => *raw,
            FieldValue::Signed(v) => *v as u64,
            FieldValue::Text(_) => 0,
        }
    }

    fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            other => other.as_i64().to_string(),
        }
    }
}

fn read_field<R: Read + Seek>(
    reader: &mut ChecksumReader<R>,
    body_start: u64,
    spec: &FieldSpec,
) -> Result<FieldValue> {
    reader.seek(SeekFrom::Start(body_start + spec.offset))?;
    Ok(match spec.ty {
        FieldType::Signed => FieldValue::Signed(read_int(reader, spec.width)?),
        FieldType::Unsigned => {
            let raw = read_uint(reader, spec.width)?;
            let scaled = match spec.scale {
                Some(scale) => raw as f64 * scale,
                None => raw as f64,
            };
            FieldValue::Unsigned { raw, scaled }
        }
        FieldType::Text => FieldValue::Text(read_fixed_string(reader, spec.width)?),
    })
}

fn render_field(spec: &FieldSpec, value: &FieldValue) -> String {
    let text = match (spec.name, value) {
        (DATE_TIME, v) => format_timestamp(v.as_raw()),
        (UNIT, FieldValue::Text(code)) => format!("{code} ({})", distance_unit_name(code)),
        (_, FieldValue::Signed(v)) => v.to_string(),
        (_, FieldValue::Unsigned { raw, scaled }) => match (spec.precision, spec.scale) {
            (Some(p), _) if p > 0 => format!("{scaled:.p$}"),
            (_, Some(_)) => scaled.to_string(),
            _ => raw.to_string(),
        },
        (_, FieldValue::Text(s)) => s.clone(),
    };

    if spec.unit.is_empty() {
        text
    } else {
        format!("{text} {}", spec.unit)
    }
}

fn timestamp_from_raw(secs: u64) -> Option<DateTime<Utc>> {
    i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::from_timestamp(s, 0))
}

fn format_timestamp(secs: u64) -> String {
    match timestamp_from_raw(secs) {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => secs.to_string(),
    }
}

/// Decoded FxdParams block.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedParams {
    /// Acquisition time as Unix seconds.
    pub timestamp_raw: u32,
    /// Acquisition time in UTC.
    pub timestamp: Option<DateTime<Utc>>,
    /// Two-letter distance unit code ("mt", "km", "mi", "kf").
    pub unit_code: String,
    pub wavelength_nm: f64,
    pub acquisition_offset: i32,
    /// Format 2 only.
    pub acquisition_offset_distance: Option<i32>,
    pub pulse_width_entries: u16,
    pub pulse_width_ns: u16,
    /// Time between two samples, in microseconds.
    pub sample_spacing_us: f64,
    pub num_data_points: u32,
    pub index_of_refraction: f64,
    /// Backscatter coefficient in dB.
    pub backscatter_db: f64,
    pub num_averages: u32,
    /// Format 2 only, in seconds.
    pub averaging_time_s: Option<f64>,
    /// Acquisition range as stored by the instrument, in km.
    pub acquisition_range_km: f64,
    /// Format 2 only.
    pub acquisition_range_distance: Option<i32>,
    pub front_panel_offset: i32,
    pub noise_floor_level: u16,
    pub noise_floor_scaling: i16,
    pub power_offset_first_point: u16,
    pub loss_threshold_db: f64,
    pub reflection_threshold_db: f64,
    pub eot_threshold_db: f64,
    /// Format 2 only.
    pub trace_type: Option<String>,
    /// Format 2 only: `[X1, Y1, X2, Y2]`.
    pub bounding_box: Option<[i32; 4]>,
    /// Distance covered by one sample, in meters.
    pub resolution_m: f64,
    /// Distance covered by the whole trace, in km.
    pub range_km: f64,
    /// Every table field in order, rendered as text, followed by the derived values.
    pub fields: Vec<ParamField>,
}

impl SorBlock for FixedParams {
    const NAME: &'static str = "FxdParams";
}

impl FixedParams {
    pub fn decode<R: Read + Seek>(
        reader: &mut ChecksumReader<R>,
        format: FormatVersion,
        block: &BlockDescriptor,
    ) -> Result<Self> {
        let body_start = Self::enter(reader, format, block)?;
        let table = fixed_param_schema(format);

        let mut values = Vec::with_capacity(table.len());
        let mut fields = Vec::with_capacity(table.len() + 2);
        for spec in table {
            let value = read_field(reader, body_start, spec)?;
            fields.push(ParamField::new(spec.name, &render_field(spec, &value)));
            values.push((spec.name, value));
        }

        let get = |name: &str| values.iter().find(|(n, _)| *n == name).map(|(_, v)| v);
        let int = |name: &str| get(name).map(FieldValue::as_i64).unwrap_or_default();
        let float = |name: &str| get(name).map(FieldValue::as_f64).unwrap_or_default();
        let v2 = format == FormatVersion::V2;

        let timestamp_raw = get(DATE_TIME).map(FieldValue::as_raw).unwrap_or_default();
        let mut params = FixedParams {
            timestamp_raw: timestamp_raw as u32,
            timestamp: timestamp_from_raw(timestamp_raw),
            unit_code: get(UNIT).map(FieldValue::as_text).unwrap_or_default(),
            wavelength_nm: float(WAVELENGTH),
            acquisition_offset: int(ACQ_OFFSET) as i32,
            acquisition_offset_distance: v2.then(|| int(ACQ_OFFSET_DISTANCE) as i32),
            pulse_width_entries: int(PULSE_WIDTH_ENTRIES) as u16,
            pulse_width_ns: int(PULSE_WIDTH) as u16,
            sample_spacing_us: float(SAMPLE_SPACING),
            num_data_points: int(NUM_DATA_POINTS) as u32,
            index_of_refraction: float(INDEX),
            backscatter_db: float(BACKSCATTER),
            num_averages: int(NUM_AVERAGES) as u32,
            averaging_time_s: v2.then(|| float(AVERAGING_TIME)),
            acquisition_range_km: float(ACQ_RANGE),
            acquisition_range_distance: v2.then(|| int(ACQ_RANGE_DISTANCE) as i32),
            front_panel_offset: int(FRONT_PANEL_OFFSET) as i32,
            noise_floor_level: int(NOISE_FLOOR_LEVEL) as u16,
            noise_floor_scaling: int(NOISE_FLOOR_SCALING) as i16,
            power_offset_first_point: int(POWER_OFFSET) as u16,
            loss_threshold_db: float(LOSS_THR),
            reflection_threshold_db: float(REFL_THR),
            eot_threshold_db: float(EOT_THR),
            trace_type: if v2 {
                get(TRACE_TYPE).map(FieldValue::as_text)
            } else {
                None
            },
            bounding_box: v2.then(|| [int(X1), int(Y1), int(X2), int(Y2)].map(|v| v as i32)),
            resolution_m: 0.0,
            range_km: 0.0,
            fields,
        };

        params.derive_resolution()?;
        params
            .fields
            .push(ParamField::new("resolution", &format!("{:.6} m", params.resolution_m)));
        params
            .fields
            .push(ParamField::new("range", &format!("{:.6} km", params.range_km)));
        Ok(params)
    }

    fn derive_resolution(&mut self) -> Result<()> {
        if self.index_of_refraction <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "index of refraction must be positive, found {}",
                self.index_of_refraction
            )));
        }
        let dx_km = self.sample_spacing_us * SPEED_OF_LIGHT_KM_PER_US / self.index_of_refraction;
        self.resolution_m = dx_km * 1000.0;
        self.range_km = dx_km * f64::from(self.num_data_points);
        Ok(())
    }

    /// Distance covered by one sample, in km.
    #[inline]
    pub fn resolution_km(&self) -> f64 {
        self.resolution_m / 1000.0
    }

    /// Name of the distance unit, "unknown" for unrecognized codes.
    pub fn unit_name(&self) -> &'static str {
        distance_unit_name(&self.unit_code)
    }

    /// Scale from raw key-event distances to km: `1e-4 * c / n`.
    pub fn event_distance_factor(&self) -> f64 {
        1e-4 * SPEED_OF_LIGHT_KM_PER_US / self.index_of_refraction
    }
}
