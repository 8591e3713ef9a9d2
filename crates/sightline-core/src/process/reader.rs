#![cfg_attr(not(target_os = "windows"), allow(dead_code, unused_variables))]

use crate::error::{Error, Result};
use crate::math::{Matrix4x4, Vector3};
use crate::process::{ByteBuffer, Pod, ProcessHandle};

#[cfg(target_os = "windows")]
use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;

/// Upper bound on string reads through [`ReadMemory::read_string_via_pointer`].
pub const MAX_STRING_LEN: usize = 128;

/// Strings are fetched in blocks of this size until a NUL shows up.
const STRING_CHUNK: usize = 32;

/// Trait for reading memory from a process or buffer
///
/// Only `read_bytes` touches the source. Every typed read is built on a single
/// `read_bytes` call of exactly the type's width, and a short result is an
/// error rather than something to retry or pad.
pub trait ReadMemory {
    /// Read raw bytes from memory at the given address
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>>;

    /// Read one fixed-layout value.
    fn read<T: Pod>(&self, address: u64) -> Result<T> {
        let bytes = self.read_bytes(address, T::SIZE)?;
        if bytes.len() != T::SIZE {
            return Err(Error::PartialRead {
                address,
                expected: T::SIZE,
                actual: bytes.len(),
            });
        }
        let mut buf = ByteBuffer::new(&bytes);
        let value = T::decode(&mut buf)?;
        debug_assert_eq!(buf.remaining(), 0, "decode left bytes unread at {:#x}", address);
        Ok(value)
    }

    fn read_i32(&self, address: u64) -> Result<i32> {
        self.read(address)
    }

    fn read_u32(&self, address: u64) -> Result<u32> {
        self.read(address)
    }

    fn read_i64(&self, address: u64) -> Result<i64> {
        self.read(address)
    }

    fn read_u64(&self, address: u64) -> Result<u64> {
        self.read(address)
    }

    fn read_f32(&self, address: u64) -> Result<f32> {
        self.read(address)
    }

    fn read_f64(&self, address: u64) -> Result<f64> {
        self.read(address)
    }

    /// Read a pointer-sized (64-bit) address.
    fn read_ptr(&self, address: u64) -> Result<u64> {
        self.read(address)
    }

    fn read_vec3(&self, address: u64) -> Result<Vector3> {
        self.read(address)
    }

    fn read_matrix(&self, address: u64) -> Result<Matrix4x4> {
        self.read(address)
    }

    /// Read a NUL-terminated UTF-8 string of at most `max_len` bytes.
    ///
    /// Text is fetched in small blocks so a short string near the end of a
    /// mapped region does not fail on bytes past its terminator. A string cut
    /// off by `max_len` in the middle of a character keeps its complete prefix.
    fn read_c_string(&self, address: u64, max_len: usize) -> Result<String> {
        let mut text = Vec::new();
        let mut terminated = false;

        while text.len() < max_len {
            let want = STRING_CHUNK.min(max_len - text.len());
            let chunk_address = address.wrapping_add(text.len() as u64);
            let chunk = self.read_bytes(chunk_address, want)?;
            if chunk.len() != want {
                return Err(Error::PartialRead {
                    address: chunk_address,
                    expected: want,
                    actual: chunk.len(),
                });
            }

            match chunk.iter().position(|&b| b == 0) {
                Some(end) => {
                    text.extend_from_slice(&chunk[..end]);
                    terminated = true;
                    break;
                }
                None => text.extend_from_slice(&chunk),
            }
        }

        match String::from_utf8(text) {
            Ok(text) => Ok(text),
            Err(e) if !terminated && e.utf8_error().error_len().is_none() => {
                let valid = e.utf8_error().valid_up_to();
                let mut bytes = e.into_bytes();
                bytes.truncate(valid);
                String::from_utf8(bytes).map_err(|e| {
                    Error::Decode(format!("Invalid UTF-8 string at {:#x}: {}", address, e))
                })
            }
            Err(e) => Err(Error::Decode(format!(
                "Invalid UTF-8 string at {:#x}: {}",
                address, e
            ))),
        }
    }

    /// Follow the pointer stored at `address` and read the string it points to.
    fn read_string_via_pointer(&self, address: u64, max_len: usize) -> Result<String> {
        let target = self.read_ptr(address)?;
        if target == 0 {
            return Err(Error::NullPointer { address });
        }
        self.read_c_string(target, max_len)
    }
}

pub struct MemoryReader<'a> {
    process: &'a ProcessHandle,
}

impl<'a> MemoryReader<'a> {
    pub fn new(process: &'a ProcessHandle) -> Self {
        Self { process }
    }

    #[cfg(target_os = "windows")]
    fn read_bytes_impl(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; size];
        let mut bytes_read = 0;

        // SAFETY: ReadProcessMemory is called with:
        // - A valid process handle from ProcessHandle (opened with PROCESS_VM_READ)
        // - A properly allocated buffer of the requested size
        // - A pointer to receive the actual bytes read
        // Invalid remote addresses make the call fail, which is surfaced as an error.
        unsafe {
            ReadProcessMemory(
                self.process.handle(),
                address as *const _,
                buffer.as_mut_ptr() as *mut _,
                size,
                Some(&mut bytes_read),
            )
            .map_err(|e| Error::MemoryReadFailed {
                address,
                message: e.to_string(),
            })?;
        }

        // All-or-nothing: a torn read means the layout or handle can no longer be trusted.
        if bytes_read != size {
            return Err(Error::PartialRead {
                address,
                expected: size,
                actual: bytes_read,
            });
        }

        Ok(buffer)
    }

    #[cfg(not(target_os = "windows"))]
    fn read_bytes_impl(&self, address: u64, _size: usize) -> Result<Vec<u8>> {
        Err(Error::MemoryReadFailed {
            address,
            message: "Windows only: memory reading not supported on this platform".to_string(),
        })
    }
}

impl ReadMemory for MemoryReader<'_> {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        self.read_bytes_impl(address, size)
    }
}
