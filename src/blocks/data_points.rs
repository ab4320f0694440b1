//! Data points block (DataPts) - the raw trace samples.

use super::common::SorBlock;
use super::{BlockDescriptor, FixedParams};
use crate::{
    Result,
    observer::{ParseObserver, ParseWarning},
    options::ParseOptions,
    parsing::{
        ChecksumReader,
        primitives::{read_i16, read_u16, read_u32},
    },
    types::{FormatVersion, OffsetMode, TracePoint},
};
use std::io::{Read, Seek};

/// Header of the DataPts block plus summary statistics of the samples.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataPoints {
    /// Declared number of samples.
    pub num_data_points: u32,
    /// Declared number of traces. Only the first trace is decoded.
    pub num_traces: i16,
    /// Scale factor for raw samples (stored code / 1000).
    pub scaling_factor: f64,
    /// Largest raw sample.
    pub max_raw: u16,
    /// Smallest raw sample.
    pub min_raw: u16,
    /// Reference level used for the loss values.
    pub offset_mode: OffsetMode,
}

impl SorBlock for DataPoints {
    const NAME: &'static str = "DataPts";
}

impl DataPoints {
    /// Decode the block and convert its samples into trace points.
    pub fn decode<R: Read + Seek>(
        reader: &mut ChecksumReader<R>,
        format: FormatVersion,
        block: &BlockDescriptor,
        fixed: &FixedParams,
        options: &ParseOptions,
        observer: &mut dyn ParseObserver,
    ) -> Result<(Self, Vec<TracePoint>)> {
        Self::enter(reader, format, block)?;

        let num_data_points = read_u32(reader)?;
        let num_traces = read_i16(reader)?;
        if num_traces > 1 {
            observer.on_warning(&ParseWarning::MultipleTraces { count: num_traces });
        }
        // repeated sample count, unused
        let _ = read_u32(reader)?;
        let scaling_factor = f64::from(read_u16(reader)?) / 1000.0;

        // the count is untrusted; a block cannot hold more samples than bytes / 2
        let capacity = num_data_points.min(block.size / 2) as usize;
        let mut raw = Vec::with_capacity(capacity);
        for _ in 0..num_data_points {
            raw.push(read_u16(reader)?);
        }

        let max_raw = raw.iter().copied().max().unwrap_or_default();
        let min_raw = raw.iter().copied().min().unwrap_or_default();

        let header = DataPoints {
            num_data_points,
            num_traces,
            scaling_factor,
            max_raw,
            min_raw,
            offset_mode: options.offset_mode,
        };
        let trace = header.trace_points(&raw, fixed.resolution_km(), options.distance_scaling);
        Ok((header, trace))
    }

    /// Convert raw samples into (distance, loss) pairs.
    ///
    /// Loss is `(reference - raw) * 0.001 * scaling_factor`, where the
    /// reference depends on the offset mode. Distance is `i * resolution_km * distance_scaling`.
    pub fn trace_points(
        &self,
        raw: &[u16],
        resolution_km: f64,
        distance_scaling: f64,
    ) -> Vec<TracePoint> {
        let db_per_unit = 0.001 * self.scaling_factor;
        let reference = self.offset_mode.reference(self.min_raw, self.max_raw);

        raw.iter()
            .enumerate()
            .map(|(i, &sample)| TracePoint {
                distance_km: resolution_km * i as f64 * distance_scaling,
                loss_db: (reference - f64::from(sample)) * db_per_unit,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(mode: OffsetMode, raw: &[u16]) -> DataPoints {
        DataPoints {
            num_data_points: raw.len() as u32,
            num_traces: 1,
            scaling_factor: 1.0,
            max_raw: raw.iter().copied().max().unwrap_or_default(),
            min_raw: raw.iter().copied().min().unwrap_or_default(),
            offset_mode: mode,
        }
    }

    fn losses(points: &[TracePoint]) -> Vec<f64> {
        points.iter().map(|p| p.loss_db).collect()
    }

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-12)
    }

    #[test]
    fn stv_uses_maximum() {
        let raw = [100, 150, 50];
        let points = header(OffsetMode::Stv, &raw).trace_points(&raw, 0.002, 1.0);
        assert!(close(&losses(&points), &[0.050, 0.0, 0.100]));
        let distances: Vec<_> = points.iter().map(|p| p.distance_km).collect();
        assert!(close(&distances, &[0.0, 0.002, 0.004]));
    }

    #[test]
    fn afl_uses_minimum() {
        let raw = [100, 150, 50];
        let points = header(OffsetMode::Afl, &raw).trace_points(&raw, 0.002, 1.0);
        assert!(close(&losses(&points), &[-0.050, -0.100, 0.0]));
    }

    #[test]
    fn no_reference_negates() {
        let raw = [100, 150, 50];
        let points = header(OffsetMode::None, &raw).trace_points(&raw, 0.002, 1.0);
        assert!(close(&losses(&points), &[-0.100, -0.150, -0.050]));
    }

    #[test]
    fn scaling_factor_and_distance_scaling() {
        let raw = [0, 1000];
        let mut h = header(OffsetMode::Stv, &raw);
        h.scaling_factor = 2.0;
        let points = h.trace_points(&raw, 0.5, 3.0);
        assert!(close(&losses(&points), &[2.0, 0.0]));
        assert!((points[1].distance_km - 1.5).abs() < 1e-12);
    }

    #[test]
    fn empty_series() {
        let points = header(OffsetMode::Stv, &[]).trace_points(&[], 0.5, 1.0);
        assert!(points.is_empty());
    }
}
