use crate::{
    Error, Result,
    blocks::{
        BlockDescriptor, BlockKind, ChecksumResult, DataPoints, FixedParams, GeneralParams,
        KeyEvents, MapBlock, SupplierParams,
    },
    observer::{LogObserver, ParseObserver},
    options::ParseOptions,
    parsing::SorParser,
    types::{FormatVersion, TracePoint},
};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// A fully decoded SOR file.
///
/// Holds the block map, every decoded block record and the trace derived from
/// the data points block. Blocks absent from the map stay `None`.
///
/// ```no_run
/// use sor_rs::{SorFile, Result};
///
/// fn main() -> Result<()> {
///     let sor = SorFile::from_file("trace.sor")?;
///     println!("{} v{}", sor.format(), sor.version());
///     if let Some(fixed) = &sor.fixed_params {
///         println!("resolution {:.3} m", fixed.resolution_m);
///     }
///     for point in sor.trace().iter().take(5) {
///         println!("{:.6},{:.6}", point.distance_km, point.loss_db);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SorFile {
    /// Base name of the input file, when parsed from a path.
    pub filename: Option<String>,
    pub map: MapBlock,
    pub general_params: Option<GeneralParams>,
    pub supplier_params: Option<SupplierParams>,
    pub fixed_params: Option<FixedParams>,
    pub data_points: Option<DataPoints>,
    pub key_events: Option<KeyEvents>,
    pub checksum: Option<ChecksumResult>,
    /// Trace points in increasing distance order.
    pub trace: Vec<TracePoint>,
}

impl SorFile {
    pub(crate) fn from_map(map: MapBlock) -> Self {
        Self {
            filename: None,
            map,
            general_params: None,
            supplier_params: None,
            fixed_params: None,
            data_points: None,
            key_events: None,
            checksum: None,
            trace: Vec::new(),
        }
    }

    /// Decode a SOR file from disk with default options, logging warnings
    /// through the `log` crate.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file_with(path, ParseOptions::default(), &mut LogObserver)
    }

    /// Decode a SOR file from disk.
    pub fn from_file_with<P: AsRef<Path>>(
        path: P,
        options: ParseOptions,
        observer: &mut dyn ParseObserver,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            log::error!("Failed to read {}", path.display());
            Error::IOError(e)
        })?;

        let mut sor = Self::from_reader(BufReader::new(file), options, observer)?;
        sor.filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(sor)
    }

    /// Decode a SOR image held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_reader(Cursor::new(data), ParseOptions::default(), &mut LogObserver)
    }

    /// Decode from any seekable byte source.
    pub fn from_reader<R: Read + Seek>(
        source: R,
        options: ParseOptions,
        observer: &mut dyn ParseObserver,
    ) -> Result<Self> {
        SorParser::new(source, options, observer).parse()
    }

    pub fn format(&self) -> FormatVersion {
        self.map.format
    }

    /// Overall format version string, e.g. `"2.00"`.
    pub fn version(&self) -> String {
        self.map.version()
    }

    pub fn block(&self, name: &str) -> Option<&BlockDescriptor> {
        self.map.block(name)
    }

    /// Kinds of the blocks that were decoded, in map order.
    pub fn decoded_blocks(&self) -> Vec<BlockKind> {
        self.map
            .blocks_in_order()
            .into_iter()
            .filter_map(|b| BlockKind::from_name(&b.name))
            .filter(|kind| match kind {
                BlockKind::GeneralParams => self.general_params.is_some(),
                BlockKind::SupplierParams => self.supplier_params.is_some(),
                BlockKind::FixedParams => self.fixed_params.is_some(),
                BlockKind::DataPoints => self.data_points.is_some(),
                BlockKind::KeyEvents => self.key_events.is_some(),
                BlockKind::Checksum => self.checksum.is_some(),
            })
            .collect()
    }

    pub fn trace(&self) -> &[TracePoint] {
        &self.trace
    }

    pub fn into_trace(self) -> Vec<TracePoint> {
        self.trace
    }

    /// Whether the stored checksum matched. `None` when the file has no checksum block.
    pub fn checksum_ok(&self) -> Option<bool> {
        self.checksum.map(|c| c.matches)
    }

    /// Serialize the decoded file to pretty-printed JSON.
    ///
    /// Requires the `serde` feature.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::SerializationError(format!("JSON serialization failed: {}", e)))
    }
}
