//! Fixed-size value types that can be decoded from remote memory.

use crate::error::Result;
use crate::process::ByteBuffer;

/// A value with a fixed little-endian byte layout in the remote process.
///
/// `SIZE` is the exact number of bytes one remote read must return; `decode`
/// receives a buffer of exactly that length.
pub trait Pod: Sized {
    const SIZE: usize;

    fn decode(buf: &mut ByteBuffer<'_>) -> Result<Self>;
}

macro_rules! impl_pod_scalar {
    ($($ty:ty => $read:ident),* $(,)?) => {
        $(
            impl Pod for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn decode(buf: &mut ByteBuffer<'_>) -> Result<Self> {
                    buf.$read()
                }
            }
        )*
    };
}

impl_pod_scalar! {
    i32 => read_i32,
    u32 => read_u32,
    i64 => read_i64,
    u64 => read_u64,
    f32 => read_f32,
    f64 => read_f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_sizes() {
        assert_eq!(<i32 as Pod>::SIZE, 4);
        assert_eq!(<u64 as Pod>::SIZE, 8);
        assert_eq!(<f32 as Pod>::SIZE, 4);
        assert_eq!(<f64 as Pod>::SIZE, 8);
    }

    #[test]
    fn test_scalar_decode() {
        let data = (-7i32).to_le_bytes();
        let mut buf = ByteBuffer::new(&data);
        assert_eq!(i32::decode(&mut buf).unwrap(), -7);
    }
}
