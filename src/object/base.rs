//! Length-prefixed records and their cheap copies.
//!
//! A record in flash is a 32-bit header followed by its payload. A runtime
//! handle on a record is an [`ObjectBase`], which is either a direct reference
//! to the record or an indirection standing in for it. Cloning a handle never
//! copies payload bytes: it produces an indirection to the resolved record,
//! so indirections are never chained.

use crate::memory::FlashMemory;
use crate::object::read::read_value;
use crate::object::types::{FlashAddr, Header, HEADER_SIZE, NULL_ADDR};
use crate::object::utils::align4;
use std::fmt;

/// Location of a record, as held by a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRef {
    /// The record itself, with its length already decoded.
    Direct { addr: FlashAddr, length: u32 },
    /// Stands in for the record at `target`.
    Indirect { target: FlashAddr },
}

/// Untyped handle on a record in flash.
pub struct ObjectBase<'f> {
    flash: &'f dyn FlashMemory,
    repr: ObjectRef,
}

impl<'f> ObjectBase<'f> {
    /// Handle on the record at `addr`.
    ///
    /// If the header there is an indirection record, the handle is an
    /// indirection to its target. A null address yields the empty object.
    pub fn at(flash: &'f dyn FlashMemory, addr: FlashAddr) -> Self {
        if addr == NULL_ADDR {
            return Self::empty(flash);
        }
        let repr = match Header::from(read_value::<u32>(flash, addr)) {
            Header::Length(length) => ObjectRef::Direct { addr, length },
            Header::Indirect(target) => ObjectRef::Indirect { target },
        };
        Self { flash, repr }
    }

    /// The zero-length object. It occupies no flash.
    pub fn empty(flash: &'f dyn FlashMemory) -> Self {
        Self {
            flash,
            repr: ObjectRef::Direct {
                addr: NULL_ADDR,
                length: 0,
            },
        }
    }

    /// Region this handle reads from.
    pub fn flash(&self) -> &'f dyn FlashMemory {
        self.flash
    }

    pub fn repr(&self) -> ObjectRef {
        self.repr
    }

    /// Address and payload length of the record this handle refers to.
    fn resolve(&self) -> (FlashAddr, u32) {
        match self.repr {
            ObjectRef::Direct { addr, length } => (addr, length),
            ObjectRef::Indirect { target } if target == NULL_ADDR => (NULL_ADDR, 0),
            ObjectRef::Indirect { target } => {
                match Header::from(read_value::<u32>(self.flash, target)) {
                    Header::Length(length) => (target, length),
                    Header::Indirect(next) => {
                        debug_assert!(
                            false,
                            "chained indirection at {:#010x} -> {:#010x}",
                            target, next
                        );
                        (target, 0)
                    }
                }
            }
        }
    }

    /// Address of the resolved record.
    pub fn address(&self) -> FlashAddr {
        self.resolve().0
    }

    /// Whether this handle is an indirection rather than the record itself.
    pub fn is_copy(&self) -> bool {
        matches!(self.repr, ObjectRef::Indirect { .. })
    }

    /// Whether this is the empty object.
    pub fn is_null(&self) -> bool {
        self.address() == NULL_ADDR
    }

    /// Payload length in bytes.
    pub fn length(&self) -> u32 {
        self.resolve().1
    }

    /// Payload size in bytes including padding.
    ///
    /// Always an integer multiple of 4 bytes.
    pub fn size(&self) -> u32 {
        align4(self.length())
    }

    /// Address of the first payload byte.
    pub fn data_address(&self) -> FlashAddr {
        let (addr, _) = self.resolve();
        if addr == NULL_ADDR {
            NULL_ADDR
        } else {
            addr + HEADER_SIZE
        }
    }

    /// Payload bytes, read through the cached path.
    pub fn data(&self) -> &'f [u8] {
        let (addr, length) = self.resolve();
        if addr == NULL_ADDR || length == 0 {
            return &[];
        }
        self.flash.slice(addr + HEADER_SIZE, length as usize)
    }

    /// The header word this handle would occupy if written out.
    pub fn header_word(&self) -> u32 {
        match self.repr {
            ObjectRef::Direct { length, .. } => Header::Length(length).word(),
            ObjectRef::Indirect { target } => Header::Indirect(target).word(),
        }
    }

    /// Number of bytes a read of `count` bytes at `offset` can return.
    fn clip(&self, offset: usize, count: usize) -> usize {
        let length = self.length() as usize;
        if offset >= length {
            0
        } else {
            count.min(length - offset)
        }
    }

    /// Read payload bytes into `buffer`, starting at `offset`.
    ///
    /// Returns the number of bytes actually read; reading at or past the end
    /// of the payload returns 0.
    pub fn read(&self, offset: usize, buffer: &mut [u8]) -> usize {
        let data = self.data();
        let count = self
            .clip(offset, buffer.len())
            .min(data.len().saturating_sub(offset));
        if count == 0 {
            return 0;
        }
        buffer[..count].copy_from_slice(&data[offset..offset + count]);
        count
    }

    /// Same as [`ObjectBase::read`] but through the device read path.
    ///
    /// PROGMEM-style data is normally read through the CPU data cache; use
    /// this for large, infrequently accessed payloads to avoid evicting hot
    /// data.
    pub fn read_flash(&self, offset: usize, buffer: &mut [u8]) -> usize {
        let count = self.clip(offset, buffer.len());
        if count == 0 {
            return 0;
        }
        self.flash
            .flash_read(self.data_address() + offset as u32, &mut buffer[..count])
    }

    /// Compare payload bytes with another object.
    pub fn content_eq(&self, other: &ObjectBase<'_>) -> bool {
        self.data() == other.data()
    }
}

impl Clone for ObjectBase<'_> {
    /// Produce an indirection to the resolved record.
    ///
    /// A copy of a copy takes over the target verbatim.
    fn clone(&self) -> Self {
        let target = match self.repr {
            ObjectRef::Direct { addr, .. } => addr,
            ObjectRef::Indirect { target } => target,
        };
        Self {
            flash: self.flash,
            repr: ObjectRef::Indirect { target },
        }
    }
}

impl fmt::Debug for ObjectBase<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBase")
            .field("region", &self.flash.name())
            .field("repr", &self.repr)
            .finish()
    }
}
