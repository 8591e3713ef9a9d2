//! Little-endian cursor over bytes copied out of the remote process.
//!
//! `ByteBuffer` is the field-by-field decoder behind every structured read:
//! a fixed-size block is fetched with one remote read, then its fields are
//! pulled out in declaration order.

use crate::error::{Error, Result};

/// A position-tracking byte reader for decoding fixed-layout structures.
///
/// # Example
///
/// ```
/// use sightline_core::process::ByteBuffer;
///
/// let data = [0x00, 0x00, 0x80, 0x3F, 0x2A, 0x00, 0x00, 0x00];
/// let mut buf = ByteBuffer::new(&data);
///
/// assert_eq!(buf.read_f32().unwrap(), 1.0);
/// assert_eq!(buf.read_i32().unwrap(), 42);
/// assert_eq!(buf.remaining(), 0);
/// ```
pub struct ByteBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteBuffer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining from the current position.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.take_array()?))
    }

    /// Reads the specified number of bytes and advances the position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if there are not enough bytes remaining.
    pub fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(count)
            .ok_or_else(|| Error::Decode("Position overflow".to_string()))?;

        if end > self.data.len() {
            return Err(Error::Decode(format!(
                "Read of {} bytes at position {} exceeds buffer length {}",
                count,
                self.pos,
                self.data.len()
            )));
        }

        let result = &self.data[self.pos..end];
        self.pos = end;
        Ok(result)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_buffer_sequential_reads() {
        let data = [
            0x01, 0x00, 0x00, 0x00, // i32: 1
            0x00, 0x00, 0x20, 0xC1, // f32: -10.0
            0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // u64: 3
        ];
        let mut buf = ByteBuffer::new(&data);

        assert_eq!(buf.read_i32().unwrap(), 1);
        assert_eq!(buf.read_f32().unwrap(), -10.0);
        assert_eq!(buf.read_u64().unwrap(), 3);
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn test_byte_buffer_take() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let mut buf = ByteBuffer::new(&data);

        assert_eq!(buf.take(4).unwrap(), &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(buf.read_u32().unwrap(), 0x08070605);
    }

    #[test]
    fn test_byte_buffer_overflow_error() {
        let data = [0x01, 0x02];
        let mut buf = ByteBuffer::new(&data);

        let result = buf.read_i32();
        assert!(matches!(result, Err(Error::Decode(_))));
        // Position is untouched by a failed read
        assert_eq!(buf.remaining(), 2);
    }

    #[test]
    fn test_byte_buffer_f64() {
        let data = 2.5f64.to_le_bytes();
        let mut buf = ByteBuffer::new(&data);
        assert_eq!(buf.read_f64().unwrap(), 2.5);
    }
}
