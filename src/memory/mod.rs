//! Foreign memory regions.
//!
//! Object views never dereference raw pointers. Every byte they look at comes
//! from a [`FlashMemory`] region: either the directly addressable view
//! returned by [`FlashMemory::as_bytes`] (the cached path) or the device path
//! behind [`FlashMemory::flash_read`]. Reads are bounded by the region and
//! never panic; anything outside the region reads as zero.

pub mod error;
pub mod mmap;

use crate::memory::error::{MemoryError, Result};
use crate::object::types::{FlashAddr, COPY_BIT};
use bytes::Bytes;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{trace, warn};

pub use mmap::MmapFlash;

/// Read-only region of foreign memory holding placed records.
///
/// Implementations must be immutable for their whole lifetime; any number of
/// threads may read concurrently.
pub trait FlashMemory: Send + Sync {
    /// Human readable name used in diagnostics.
    fn name(&self) -> &str;

    /// Runtime address of the first byte of the region.
    fn base_address(&self) -> FlashAddr;

    /// The whole region, directly addressable.
    fn as_bytes(&self) -> &[u8];

    /// Read `buf.len()` bytes starting at `addr` through the device path.
    ///
    /// Returns the number of bytes copied, clipped to the region. The default
    /// implementation copies from [`FlashMemory::as_bytes`].
    fn flash_read(&self, addr: FlashAddr, buf: &mut [u8]) -> usize {
        let src = self.slice(addr, buf.len());
        buf[..src.len()].copy_from_slice(src);
        src.len()
    }

    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One past the last address of the region.
    fn end_address(&self) -> u64 {
        self.base_address() as u64 + self.len() as u64
    }

    /// Offset of `addr` into the region, if it lies within it.
    fn offset_of(&self, addr: FlashAddr) -> Option<usize> {
        let offset = addr.checked_sub(self.base_address())? as usize;
        (offset <= self.len()).then_some(offset)
    }

    /// Check if `[addr, addr + len)` lies entirely inside the region.
    fn contains(&self, addr: FlashAddr, len: usize) -> bool {
        match self.offset_of(addr) {
            Some(offset) => offset
                .checked_add(len)
                .is_some_and(|end| end <= self.len()),
            None => false,
        }
    }

    /// Up to `len` bytes starting at `addr`, clipped to the region.
    fn slice(&self, addr: FlashAddr, len: usize) -> &[u8] {
        let bytes = self.as_bytes();
        match self.offset_of(addr) {
            Some(offset) => {
                let end = offset.saturating_add(len).min(bytes.len());
                &bytes[offset..end]
            }
            None => &[],
        }
    }

    /// Single-byte access path.
    fn read_byte(&self, addr: FlashAddr) -> u8 {
        match self.slice(addr, 1) {
            [b] => *b,
            _ => {
                out_of_region(self.name(), addr, 1);
                0
            }
        }
    }

    /// Two-byte access path.
    fn read_word(&self, addr: FlashAddr) -> u16 {
        match self.slice(addr, 2) {
            [a, b] => u16::from_le_bytes([*a, *b]),
            _ => {
                out_of_region(self.name(), addr, 2);
                0
            }
        }
    }

    /// Word access path used for every 4-byte value; callers are expected
    /// to pass aligned addresses.
    fn read_dword(&self, addr: FlashAddr) -> u32 {
        match self.slice(addr, 4) {
            [a, b, c, d] => u32::from_le_bytes([*a, *b, *c, *d]),
            _ => {
                out_of_region(self.name(), addr, 4);
                0
            }
        }
    }
}

#[cold]
fn out_of_region(region: &str, addr: FlashAddr, len: usize) {
    warn!(region, addr, len, "Read outside flash region");
}

/// Check that a region fits below the indirection bit.
pub(crate) fn check_address_space(base: FlashAddr, len: u64) -> Result<()> {
    if base as u64 + len > COPY_BIT as u64 {
        return Err(MemoryError::AddressSpaceExhausted { base, len });
    }
    Ok(())
}

/// In-memory region, typically built with [`crate::image::ImageBuilder`].
///
/// Device reads are counted so callers can observe which path was taken.
#[derive(Debug)]
pub struct MemoryFlash {
    name: String,
    base: FlashAddr,
    data: Bytes,
    device_reads: AtomicU64,
}

impl MemoryFlash {
    /// Wrap `data` as a region starting at `base`.
    pub fn new(name: impl Into<String>, base: FlashAddr, data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        check_address_space(base, data.len() as u64)?;
        Ok(Self {
            name: name.into(),
            base,
            data,
            device_reads: AtomicU64::new(0),
        })
    }

    /// Region whose extent the caller has already checked.
    pub(crate) fn from_checked(name: impl Into<String>, base: FlashAddr, data: Bytes) -> Self {
        Self {
            name: name.into(),
            base,
            data,
            device_reads: AtomicU64::new(0),
        }
    }

    /// Number of reads served through the device path so far.
    pub fn device_reads(&self) -> u64 {
        self.device_reads.load(Ordering::Relaxed)
    }

    /// Hex-encoded BLAKE3 digest of the region contents.
    pub fn fingerprint(&self) -> String {
        hex::encode(blake3::hash(&self.data).as_bytes())
    }
}

impl FlashMemory for MemoryFlash {
    fn name(&self) -> &str {
        &self.name
    }

    fn base_address(&self) -> FlashAddr {
        self.base
    }

    fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn flash_read(&self, addr: FlashAddr, buf: &mut [u8]) -> usize {
        self.device_reads.fetch_add(1, Ordering::Relaxed);
        let src = self.slice(addr, buf.len());
        buf[..src.len()].copy_from_slice(src);
        trace!(
            region = %self.name,
            addr = addr,
            len = src.len(),
            "Device read"
        );
        src.len()
    }
}
