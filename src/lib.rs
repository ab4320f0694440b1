#![forbid(unsafe_code)]

//! # sor-rs
//!
//! A Rust library for decoding Bellcore/Telcordia SOR files, the trace format
//! written by optical time-domain reflectometers (OTDRs).
//!
//! A SOR file is a map block followed by named blocks: general parameters,
//! supplier parameters, fixed (acquisition) parameters, data points, key
//! events and a trailing CRC-16 checksum. This crate decodes all of them and
//! reconstructs the optical trace as (distance, loss) samples.
//!
//! ## Supported Formats
//!
//! - Format 1 (Bellcore 1.x): no block tags
//! - Format 2 (Telcordia SR-4731 2.x): `Map\0` file tag and `<name>\0` block tags
//!
//! Only the first trace of multi-trace files is decoded. Writing SOR files is
//! not supported.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sor_rs::{SorFile, Result};
//!
//! fn main() -> Result<()> {
//!     let sor = SorFile::from_file("span.sor")?;
//!
//!     if let Some(fixed) = &sor.fixed_params {
//!         println!("{} nm, {:.3} m/sample", fixed.wavelength_nm, fixed.resolution_m);
//!     }
//!     if let Some(events) = &sor.key_events {
//!         for ev in &events.events {
//!             println!("{} at {:.3} km: {:.3} dB", ev.event_type, ev.distance_km, ev.splice_loss_db);
//!         }
//!     }
//!     println!("checksum ok: {:?}", sor.checksum_ok());
//!     Ok(())
//! }
//! ```
//!
//! ## Warnings
//!
//! A checksum mismatch or a multi-trace file does not fail the parse. Such
//! conditions are passed to a [`ParseObserver`]; [`SorFile::from_file`] uses
//! [`LogObserver`], which forwards them to the `log` crate.
//!
//! ```no_run
//! use sor_rs::{ParseOptions, ParseWarning, SorFile};
//!
//! let mut warnings: Vec<ParseWarning> = Vec::new();
//! let sor = SorFile::from_file_with("span.sor", ParseOptions::default(), &mut warnings)?;
//! for w in &warnings {
//!     eprintln!("warning: {w}");
//! }
//! # Ok::<(), sor_rs::Error>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`blocks`] | Per-block records and decoders |
//! | [`parsing`] | Checksummed reader and primitive field readers |
//! | [`export`] | CSV trace table and JSON summary output |
//! | [`error`] | Error types and [`Result`] alias |

pub mod blocks;
pub mod parsing;

mod observer;
mod options;
mod sor;
mod types;

pub mod error;
pub mod export;

pub use blocks::{
    BlockDescriptor, BlockKind, ChecksumResult, DataPoints, EventSummary, FixedParams,
    GeneralParams, KeyEvent, KeyEvents, MapBlock, SupplierParams,
};
pub use error::{Error, Result};
pub use observer::{LogObserver, ParseObserver, ParseWarning};
pub use options::ParseOptions;
pub use sor::SorFile;
pub use types::{FormatVersion, OffsetMode, SPEED_OF_LIGHT_KM_PER_US, TracePoint};
