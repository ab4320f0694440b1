//! Little-endian integer and text readers shared by all block decoders.

use crate::{Error, Result};
use std::io::Read;

/// Read exactly `n` bytes.
pub fn read_bytes<R: Read>(reader: &mut R, n: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; n];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Read a NUL-terminated string.
///
/// Stops at the first NUL or at end of stream; an unterminated string yields
/// whatever was accumulated. Invalid UTF-8 is replaced rather than rejected.
pub fn read_cstring<R: Read>(reader: &mut R) -> Result<String> {
    let mut bytes = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            break;
        }
        if byte[0] == 0 {
            break;
        }
        bytes.push(byte[0]);
    }
    Ok(decode_text(&bytes))
}

/// Read a fixed-width text field of `n` bytes.
pub fn read_fixed_string<R: Read>(reader: &mut R, n: usize) -> Result<String> {
    let bytes = read_bytes(reader, n)?;
    Ok(decode_text(&bytes))
}

fn decode_text(bytes: &[u8]) -> String {
    match core::str::from_utf8(bytes) {
        Ok(s) => String::from(s),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Read an unsigned little-endian integer of 2, 4 or 8 bytes.
pub fn read_uint<R: Read>(reader: &mut R, width: usize) -> Result<u64> {
    match width {
        2 => Ok(u64::from(read_u16(reader)?)),
        4 => Ok(u64::from(read_u32(reader)?)),
        8 => {
            let mut buf = [0u8; 8];
            reader.read_exact(&mut buf)?;
            Ok(u64::from_le_bytes(buf))
        }
        other => Err(Error::InvalidFieldWidth(other)),
    }
}

/// Read a signed little-endian integer of 2, 4 or 8 bytes.
pub fn read_int<R: Read>(reader: &mut R, width: usize) -> Result<i64> {
    match width {
        2 => Ok(i64::from(read_i16(reader)?)),
        4 => Ok(i64::from(read_i32(reader)?)),
        8 => {
            let mut buf = [0u8; 8];
            reader.read_exact(&mut buf)?;
            Ok(i64::from_le_bytes(buf))
        }
        other => Err(Error::InvalidFieldWidth(other)),
    }
}

#[inline]
pub fn read_u16<R: Read>(reader: &mut R) -> Result<u16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

#[inline]
pub fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

#[inline]
pub fn read_i16<R: Read>(reader: &mut R) -> Result<i16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(i16::from_le_bytes(buf))
}

#[inline]
pub fn read_i32<R: Read>(reader: &mut R) -> Result<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}
