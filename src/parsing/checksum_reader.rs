//! Byte reader that checksums everything it hands out.
//!
//! The checksum stored at the end of a SOR file covers exactly the bytes the
//! parser consumed before it, so the CRC is folded into the read path instead
//! of being computed over the file separately.

use std::io::{self, Read, Seek, SeekFrom};

/// Size of the staging buffer folded into the CRC when it would overflow.
pub const CHECKSUM_BUFFER_SIZE: usize = 2048;

const CRC16_POLY: u16 = 0x1021;
const CRC16_INIT: u16 = 0xFFFF;

const fn build_crc16_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ CRC16_POLY
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

static CRC16_TABLE: [u16; 256] = build_crc16_table();

/// Incremental CRC-16/CCITT-FALSE (poly 0x1021, init 0xFFFF, no reflection, no xor-out).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc16 {
    value: u16,
}

impl Default for Crc16 {
    fn default() -> Self {
        Self { value: CRC16_INIT }
    }
}

impl Crc16 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, bytes: &[u8]) {
        for &b in bytes {
            let idx = ((self.value >> 8) as u8 ^ b) as usize;
            self.value = (self.value << 8) ^ CRC16_TABLE[idx];
        }
    }

    #[inline]
    pub fn value(&self) -> u16 {
        self.value
    }

    /// One-shot checksum of `bytes`.
    pub fn checksum(bytes: &[u8]) -> u16 {
        let mut crc = Self::new();
        crc.update(bytes);
        crc.value()
    }
}

/// Wraps a seekable byte source and keeps a running CRC-16 of every byte read.
///
/// Bytes are staged in a fixed-size buffer and folded into the CRC whenever the
/// next read would overflow it. Seeking to offset 0 discards all checksum state;
/// seeking anywhere else only moves the cursor.
#[derive(Debug)]
pub struct ChecksumReader<R> {
    inner: R,
    buffer: Vec<u8>,
    space_left: usize,
    crc: Crc16,
}

impl<R: Read + Seek> ChecksumReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: Vec::with_capacity(CHECKSUM_BUFFER_SIZE),
            space_left: CHECKSUM_BUFFER_SIZE,
            crc: Crc16::new(),
        }
    }

    fn absorb(&mut self, bytes: &[u8]) {
        if bytes.len() > self.space_left {
            self.crc.update(&self.buffer);
            self.buffer.clear();
            self.space_left = CHECKSUM_BUFFER_SIZE;
        }
        self.buffer.extend_from_slice(bytes);
        self.space_left = self.space_left.saturating_sub(bytes.len());
    }

    fn reset_checksum(&mut self) {
        self.buffer.clear();
        self.space_left = CHECKSUM_BUFFER_SIZE;
        self.crc = Crc16::new();
    }

    /// Read up to `n` bytes. Fewer are returned only at end of stream.
    pub fn read_up_to(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(n);
        (&mut self.inner).take(n as u64).read_to_end(&mut buf)?;
        self.absorb(&buf);
        Ok(buf)
    }

    /// Fold any staged bytes into the CRC and return its value.
    ///
    /// Reads may continue afterwards; they extend the same running checksum.
    pub fn digest(&mut self) -> u16 {
        self.crc.update(&self.buffer);
        self.buffer.clear();
        self.space_left = CHECKSUM_BUFFER_SIZE;
        self.crc.value()
    }

    /// Current cursor position in the underlying source.
    pub fn tell(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }

    /// Release the underlying source.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> Read for ChecksumReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.absorb(&buf[..n]);
        Ok(n)
    }
}

impl<R: Read + Seek> Seek for ChecksumReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        if pos == SeekFrom::Start(0) {
            self.reset_checksum();
        }
        self.inner.seek(pos)
    }
}
