//! Placement of records into a flash image.

use crate::memory::MemoryFlash;
use crate::object::read::Scalar;
use crate::object::types::{FlashAddr, Header, COPY_BIT, HEADER_SIZE, NULL_ADDR};
use crate::object::utils::{align4_usize, is_aligned};
use tracing::debug;

/// Appends records to an image and hands out their addresses.
///
/// Records are placed back to back, each header 4-byte aligned and each
/// payload zero-padded to a multiple of 4 bytes. Every `add_*` method returns
/// the address of the header it wrote; references between records are
/// expressed by passing those addresses to later calls.
///
/// # Panics
///
/// The `add_*` methods panic if the image would grow into the indirection
/// bit, since such addresses cannot be encoded in an indirection record.
#[derive(Debug, Clone)]
pub struct ImageBuilder {
    base: FlashAddr,
    data: Vec<u8>,
    records: usize,
}

impl ImageBuilder {
    /// Start an image that will be mapped at `base`.
    ///
    /// Nothing is ever placed at the null address; an image based at zero
    /// starts with a word of padding.
    pub fn new(base: FlashAddr) -> Self {
        assert!(is_aligned(base), "image base {:#010x} is not 4-byte aligned", base);
        assert!(base < COPY_BIT, "image base {:#010x} collides with the indirection bit", base);
        let data = if base == NULL_ADDR {
            vec![0; HEADER_SIZE as usize]
        } else {
            Vec::new()
        };
        Self {
            base,
            data,
            records: 0,
        }
    }

    pub fn base(&self) -> FlashAddr {
        self.base
    }

    /// Address the next record will be placed at.
    pub fn next_address(&self) -> FlashAddr {
        self.base + self.data.len() as u32
    }

    /// Number of records placed so far.
    pub fn record_count(&self) -> usize {
        self.records
    }

    fn push_record(&mut self, header: Header, payload: &[u8]) -> FlashAddr {
        let addr = self.next_address();
        let end = addr as u64 + HEADER_SIZE as u64 + align4_usize(payload.len()) as u64;
        assert!(
            end <= COPY_BIT as u64,
            "record at {:#010x} of {} bytes does not fit below the indirection bit",
            addr,
            payload.len()
        );
        self.data.extend_from_slice(&header.word().to_le_bytes());
        self.data.extend_from_slice(payload);
        self.data.resize(align4_usize(self.data.len()), 0);
        self.records += 1;
        addr
    }

    /// Raw byte payload.
    pub fn add_bytes(&mut self, payload: &[u8]) -> FlashAddr {
        self.push_record(Header::Length(payload.len() as u32), payload)
    }

    pub fn add_str(&mut self, value: &str) -> FlashAddr {
        self.add_bytes(value.as_bytes())
    }

    /// Packed array of scalars.
    pub fn add_array<T: Scalar>(&mut self, values: &[T]) -> FlashAddr {
        #[allow(clippy::let_unit_value)]
        let () = T::ACCESS_CHECK;
        let mut payload = Vec::with_capacity(values.len() * T::WIDTH);
        for value in values {
            value.write_le(&mut payload);
        }
        self.add_bytes(&payload)
    }

    /// Vector of references; [`NULL_ADDR`] entries decode as empty objects.
    pub fn add_vector(&mut self, items: &[FlashAddr]) -> FlashAddr {
        self.add_array(items)
    }

    /// Map whose keys and contents are both references.
    pub fn add_map(&mut self, entries: &[(FlashAddr, FlashAddr)]) -> FlashAddr {
        let mut payload = Vec::with_capacity(entries.len() * 8);
        for (key, content) in entries {
            key.write_le(&mut payload);
            content.write_le(&mut payload);
        }
        self.add_bytes(&payload)
    }

    /// Map with inline scalar keys and reference contents.
    ///
    /// # Panics
    ///
    /// Panics if the key width is not a multiple of 4, which would leave the
    /// content slots misaligned.
    pub fn add_keyed_map<K: Scalar>(&mut self, entries: &[(K, FlashAddr)]) -> FlashAddr {
        assert!(
            K::WIDTH % 4 == 0,
            "inline map keys must be a multiple of 4 bytes wide, got {}",
            K::WIDTH
        );
        let mut payload = Vec::with_capacity(entries.len() * (K::WIDTH + 4));
        for (key, content) in entries {
            key.write_le(&mut payload);
            content.write_le(&mut payload);
        }
        self.add_bytes(&payload)
    }

    /// Indirection record standing in for the record at `target`.
    pub fn add_indirection(&mut self, target: FlashAddr) -> FlashAddr {
        self.push_record(Header::Indirect(target), &[])
    }

    /// The image bytes, starting at [`ImageBuilder::base`].
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Freeze the image into an in-memory region.
    pub fn finish(self, name: impl Into<String>) -> MemoryFlash {
        let name = name.into();
        debug!(
            region = %name,
            base = self.base,
            records = self.records,
            size = self.data.len(),
            "Image finished"
        );
        MemoryFlash::from_checked(name, self.base, self.data.into())
    }
}
