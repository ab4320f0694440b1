//! Output of decoded traces.
//!
//! The trace table is plain comma-separated text:
//!
//! ```text
//! Distance (km),Loss (dB)
//! 0.000000,0.050000
//! 0.002665,0.000000
//! ```
//!
//! ```no_run
//! use sor_rs::export::convert_to_csv;
//!
//! let written = convert_to_csv("trace.sor", None)?;
//! println!("Successfully converted to {}", written.display());
//! # Ok::<(), sor_rs::Error>(())
//! ```

use crate::{LogObserver, ParseOptions, Result, SorFile, types::TracePoint};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Header line of the trace table.
pub const CSV_HEADER: &str = "Distance (km),Loss (dB)";

/// Write the trace table to `writer`.
pub fn write_trace_csv<W: Write>(writer: &mut W, points: &[TracePoint]) -> Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for point in points {
        writeln!(writer, "{:.6},{:.6}", point.distance_km, point.loss_db)?;
    }
    Ok(())
}

/// Render the trace table as a string.
pub fn trace_to_csv_string(points: &[TracePoint]) -> String {
    let mut out = Vec::with_capacity(CSV_HEADER.len() + points.len() * 20);
    // writing into a Vec cannot fail
    let _ = write_trace_csv(&mut out, points);
    String::from_utf8_lossy(&out).into_owned()
}

/// Default output path for `input`: its file stem with a `.csv` extension,
/// in the current directory.
pub fn default_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let stem = input
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    PathBuf::from(format!("{stem}.csv"))
}

/// Decode `input` with default options and write its trace table.
///
/// When `output` is `None` the table goes to [`default_output_path`]. Nothing
/// is written if decoding fails. Returns the path written.
pub fn convert_to_csv<P: AsRef<Path>>(input: P, output: Option<&Path>) -> Result<PathBuf> {
    convert_to_csv_with(input, output, ParseOptions::default()).map(|(_, path)| path)
}

/// Same as [`convert_to_csv`], decoding with `options`.
///
/// Returns the decoded file alongside the path written, so callers can
/// produce further output without parsing twice.
pub fn convert_to_csv_with<P: AsRef<Path>>(
    input: P,
    output: Option<&Path>,
    options: ParseOptions,
) -> Result<(SorFile, PathBuf)> {
    let sor = SorFile::from_file_with(input.as_ref(), options, &mut LogObserver).inspect_err(|e| {
        log::error!("Error parsing SOR file: {e}");
    })?;

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input.as_ref()),
    };

    let mut writer = BufWriter::new(File::create(&output)?);
    write_trace_csv(&mut writer, sor.trace())?;
    writer.flush()?;

    log::info!("Successfully converted to {}", output.display());
    Ok((sor, output))
}

/// Save the full decoded file as pretty-printed JSON.
///
/// Requires the `serde` feature.
#[cfg(feature = "serde")]
pub fn save_summary_to_file<P: AsRef<Path>>(sor: &SorFile, path: P) -> Result<()> {
    let json = sor.to_json()?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_layout() {
        let points = [
            TracePoint {
                distance_km: 0.0,
                loss_db: 0.05,
            },
            TracePoint {
                distance_km: 0.0026644,
                loss_db: -1.25,
            },
        ];
        let csv = trace_to_csv_string(&points);
        assert_eq!(
            csv,
            "Distance (km),Loss (dB)\n0.000000,0.050000\n0.002664,-1.250000\n"
        );
    }

    #[test]
    fn default_output_uses_stem() {
        assert_eq!(
            default_output_path("/data/traces/span-12.sor"),
            PathBuf::from("span-12.csv")
        );
    }
}
