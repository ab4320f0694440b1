mod checksum_reader;
pub mod primitives;
mod sor_parser;

pub use checksum_reader::{CHECKSUM_BUFFER_SIZE, ChecksumReader, Crc16};
pub(crate) use sor_parser::SorParser;
