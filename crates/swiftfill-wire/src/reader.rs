//! Bounds-checked big-endian reader over a byte slice.
//!
//! Decoders consume fields in wire order and call [`ByteReader::finish`]
//! last; a payload with bytes left over is as malformed as a short one.

use swiftfill_types::{Result, SwiftfillError, UniversalAddress};

/// Cursor over an immutable byte slice. Every read is bounds-checked and
/// fails with `MalformedPayload` naming the offset.
#[derive(Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(SwiftfillError::MalformedPayload {
                reason: format!(
                    "truncated: need {len} bytes at offset {}, have {}",
                    self.pos,
                    self.remaining()
                ),
            });
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes(bytes.try_into().expect("2 bytes")))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes(bytes.try_into().expect("4 bytes")))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.take(8)?;
        Ok(u64::from_be_bytes(bytes.try_into().expect("8 bytes")))
    }

    pub fn read_u128(&mut self) -> Result<u128> {
        let bytes = self.take(16)?;
        Ok(u128::from_be_bytes(bytes.try_into().expect("16 bytes")))
    }

    pub fn read_address(&mut self) -> Result<UniversalAddress> {
        let bytes = self.take(32)?;
        Ok(UniversalAddress(bytes.try_into().expect("32 bytes")))
    }

    /// Read a u32 length prefix followed by that many bytes.
    pub fn read_prefixed_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.read_u32()? as usize;
        Ok(self.take(len)?.to_vec())
    }

    /// Assert the payload is fully consumed.
    ///
    /// # Errors
    /// Returns [`SwiftfillError::MalformedPayload`] if trailing bytes remain.
    pub fn finish(self) -> Result<()> {
        if self.remaining() != 0 {
            return Err(SwiftfillError::MalformedPayload {
                reason: format!("{} trailing bytes after payload", self.remaining()),
            });
        }
        Ok(())
    }
}
