//! Bounds-checked binary framing.
//!
//! Length prefixes are 4-byte big-endian signed integers. Every read checks
//! the remaining buffer first, so a hostile length can neither read out of
//! bounds nor trigger a large allocation: readers hand out borrowed slices.

use crate::error::{Error, Result};

/// Size of a length prefix in bytes
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Append-only frame builder
#[derive(Debug, Default)]
pub(crate) struct FrameWriter {
    buf: Vec<u8>,
}

impl FrameWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Write bytes with no prefix
    pub fn put(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Write `len(bytes)` as big-endian i32, then the bytes
    pub fn put_prefixed(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        let len = i32::try_from(bytes.len()).map_err(|_| {
            Error::InvalidArgument(format!("Field of {} bytes exceeds i32 length prefix", bytes.len()))
        })?;
        self.buf.extend_from_slice(&len.to_be_bytes());
        self.buf.extend_from_slice(bytes);
        Ok(self)
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over a frame
#[derive(Debug)]
pub(crate) struct FrameReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FrameReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Read exactly `len` bytes; `what` names the field in errors
    pub fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::EnvelopeMalformed(format!(
                "{} needs {} bytes, only {} remain",
                what,
                len,
                self.remaining()
            )));
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Read a big-endian i32 length, then that many bytes
    pub fn take_prefixed(&mut self, what: &str) -> Result<&'a [u8]> {
        let prefix = self.take(LENGTH_PREFIX_SIZE, what)?;
        let mut raw = [0u8; LENGTH_PREFIX_SIZE];
        raw.copy_from_slice(prefix);

        let len = i32::from_be_bytes(raw);
        let len = usize::try_from(len).map_err(|_| {
            Error::EnvelopeMalformed(format!("{} has negative length {}", what, len))
        })?;
        self.take(len, what)
    }

    /// Everything not yet read
    pub fn rest(&mut self) -> &'a [u8] {
        let slice = &self.buf[self.pos..];
        self.pos = self.buf.len();
        slice
    }
}
