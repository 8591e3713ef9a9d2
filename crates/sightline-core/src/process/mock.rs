//! Mock memory reader for testing
//!
//! Provides a configurable mock implementation of ReadMemory trait
//! that reads from an in-memory buffer instead of a real process.

use crate::error::{Error, Result};
use crate::math::{Matrix4x4, Vector3};
use crate::process::ReadMemory;

/// Mock memory reader for testing
///
/// Reads from an in-memory buffer mapped at `base`. Addresses registered as
/// short reads return half of the requested bytes, imitating a torn
/// `ReadProcessMemory` transfer.
#[derive(Debug, Clone)]
pub struct MockMemoryReader {
    data: Vec<u8>,
    base: u64,
    short_reads: Vec<u64>,
}

impl MockMemoryReader {
    /// Create a new mock reader with the given data at base address 0x1000
    pub fn new(data: Vec<u8>) -> Self {
        Self::with_base(data, 0x1000)
    }

    /// Create a new mock reader with custom base address
    pub fn with_base(data: Vec<u8>, base: u64) -> Self {
        Self {
            data,
            base,
            short_reads: Vec::new(),
        }
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    /// Get the size of the underlying buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl ReadMemory for MockMemoryReader {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        if address < self.base {
            return Err(Error::MemoryReadFailed {
                address,
                message: format!("Address below base (base=0x{:X})", self.base),
            });
        }
        let offset = (address - self.base) as usize;
        if offset
            .checked_add(size)
            .is_none_or(|end| end > self.data.len())
        {
            return Err(Error::MemoryReadFailed {
                address,
                message: format!(
                    "Out of bounds: offset={}, size={}, len={}",
                    offset,
                    size,
                    self.data.len()
                ),
            });
        }

        let end = address + size as u64;
        if self
            .short_reads
            .iter()
            .any(|&a| a >= address && a < end)
        {
            return Ok(self.data[offset..offset + size / 2].to_vec());
        }

        Ok(self.data[offset..offset + size].to_vec())
    }
}

/// Builder for creating test memory buffers
///
/// Offsets are relative to the base address; use [`MockMemoryBuilder::address_of`]
/// to turn an offset into the absolute address a pointer field should hold.
#[derive(Debug, Clone)]
pub struct MockMemoryBuilder {
    data: Vec<u8>,
    base: u64,
    short_reads: Vec<u64>,
}

impl Default for MockMemoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMemoryBuilder {
    /// Create a new builder with default base address (0x1000)
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            base: 0x1000,
            short_reads: Vec::new(),
        }
    }

    /// Set the base address for the mock reader
    pub fn base(mut self, base: u64) -> Self {
        self.base = base;
        self
    }

    /// Absolute address of `offset` once built.
    pub fn address_of(&self, offset: usize) -> u64 {
        self.base + offset as u64
    }

    /// Pre-allocate buffer with zeros up to the specified size
    pub fn with_size(mut self, size: usize) -> Self {
        self.ensure_size(size);
        self
    }

    pub fn write_i32(self, offset: usize, value: i32) -> Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    pub fn write_u32(self, offset: usize, value: u32) -> Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    pub fn write_u64(self, offset: usize, value: u64) -> Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    pub fn write_f32(self, offset: usize, value: f32) -> Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    pub fn write_vec3(self, offset: usize, value: Vector3) -> Self {
        self.write_f32(offset, value.x)
            .write_f32(offset + 4, value.y)
            .write_f32(offset + 8, value.z)
    }

    /// Write 16 row-major floats
    pub fn write_matrix(mut self, offset: usize, value: &Matrix4x4) -> Self {
        for (i, cell) in value.m.iter().flatten().enumerate() {
            self = self.write_f32(offset + i * 4, *cell);
        }
        self
    }

    /// Write raw bytes at the specified offset from base
    pub fn write_bytes(mut self, offset: usize, bytes: &[u8]) -> Self {
        self.ensure_size(offset + bytes.len());
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Write a null-terminated UTF-8 string at the specified offset
    pub fn write_utf8(self, offset: usize, text: &str) -> Self {
        let len = text.len();
        self.write_bytes(offset, text.as_bytes())
            .write_bytes(offset + len, &[0])
    }

    /// Any read covering `address` returns half the requested bytes.
    pub fn short_read_at(mut self, address: u64) -> Self {
        self.short_reads.push(address);
        self
    }

    /// Build the MockMemoryReader
    pub fn build(self) -> MockMemoryReader {
        MockMemoryReader {
            data: self.data,
            base: self.base,
            short_reads: self.short_reads,
        }
    }

    fn ensure_size(&mut self, required: usize) {
        if self.data.len() < required {
            self.data.resize(required, 0);
        }
    }
}
