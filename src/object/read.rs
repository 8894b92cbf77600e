//! Aligned reads of typed values from flash.
//!
//! Flash may only be read with certain access widths. [`read_value`] picks the
//! access path from the width of the value: single byte, half word, or whole
//! aligned 32-bit words. Any other width is rejected when the read is
//! instantiated, not at runtime.

use crate::memory::FlashMemory;
use crate::object::types::FlashAddr;
use crate::object::utils::{is_aligned, is_permitted_width};
use std::fmt;

/// Plain value stored inline in a payload.
///
/// Implemented for the fixed-width integers, `f32`, `f64` and fixed-size
/// arrays of scalars (table rows). Records of other shapes may implement it
/// as long as their width is 1, 2 or a multiple of 4 bytes.
pub trait Scalar: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Evaluated whenever a read of `Self` is instantiated.
    const ACCESS_CHECK: () = assert!(
        is_permitted_width(Self::WIDTH),
        "flash values must be 1, 2 or a multiple of 4 bytes wide"
    );

    /// Decode from exactly `WIDTH` little-endian bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Append the little-endian encoding to `out`.
    fn write_le(&self, out: &mut Vec<u8>);

    /// Value returned for out-of-range accesses.
    fn zero() -> Self;
}

macro_rules! impl_scalar {
    ($($t:ty => $zero:expr),* $(,)?) => {
        $(
            impl Scalar for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                #[inline(always)]
                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$t>()];
                    raw.copy_from_slice(&bytes[..Self::WIDTH]);
                    <$t>::from_le_bytes(raw)
                }

                fn write_le(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }

                #[inline(always)]
                fn zero() -> Self {
                    $zero
                }
            }
        )*
    };
}

impl_scalar! {
    u8 => 0, i8 => 0,
    u16 => 0, i16 => 0,
    u32 => 0, i32 => 0,
    u64 => 0, i64 => 0,
    f32 => 0.0, f64 => 0.0,
}

impl<T: Scalar, const N: usize> Scalar for [T; N] {
    const WIDTH: usize = T::WIDTH * N;

    fn from_le_slice(bytes: &[u8]) -> Self {
        std::array::from_fn(|i| T::from_le_slice(&bytes[i * T::WIDTH..(i + 1) * T::WIDTH]))
    }

    fn write_le(&self, out: &mut Vec<u8>) {
        for value in self {
            value.write_le(out);
        }
    }

    fn zero() -> Self {
        [T::zero(); N]
    }
}

/// Read a typed value from flash memory ensuring correct alignment of access.
///
/// Multi-word values must start on a 4-byte boundary; this is checked in debug
/// builds only since a violation means the placement tooling produced a bad
/// layout. Values falling outside the region read as [`Scalar::zero`].
#[inline]
pub fn read_value<T: Scalar>(flash: &dyn FlashMemory, addr: FlashAddr) -> T {
    #[allow(clippy::let_unit_value)]
    let () = T::ACCESS_CHECK;

    match T::WIDTH {
        1 => T::from_le_slice(&[flash.read_byte(addr)]),
        2 => T::from_le_slice(&flash.read_word(addr).to_le_bytes()),
        width => {
            debug_assert!(
                is_aligned(addr),
                "misaligned {}-byte flash read at {:#010x}",
                width,
                addr
            );
            if width == 4 {
                return T::from_le_slice(&flash.read_dword(addr).to_le_bytes());
            }
            let bytes = flash.slice(addr, width);
            if bytes.len() == width {
                T::from_le_slice(bytes)
            } else {
                T::zero()
            }
        }
    }
}
