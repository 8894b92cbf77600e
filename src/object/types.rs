//! Wire-format constants shared by every object kind.
//!
//! ```text
//! offset 0 : u32 length-or-indirection field (little-endian)
//! offset 4 : payload, (field & LENGTH_MASK) bytes, padded to a multiple of 4
//! ```

/// Runtime address inside a flash region.
pub type FlashAddr = u32;

/// Top bit of the header word: the remaining bits are an address, not a length.
pub const COPY_BIT: u32 = 0x8000_0000;

/// Bits of the header word holding the payload length (or target address).
pub const LENGTH_MASK: u32 = !COPY_BIT;

/// Size of the header word preceding every payload.
pub const HEADER_SIZE: u32 = 4;

/// Width of a reference slot in vector and map payloads.
pub const REF_SIZE: usize = 4;

/// Address stored in a reference slot that refers to nothing.
pub const NULL_ADDR: FlashAddr = 0;

/// Decoded header word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    /// Payload length in bytes.
    Length(u32),
    /// Address of the record this one stands in for.
    Indirect(FlashAddr),
}

impl From<u32> for Header {
    fn from(word: u32) -> Self {
        if word & COPY_BIT != 0 {
            Header::Indirect(word & LENGTH_MASK)
        } else {
            Header::Length(word)
        }
    }
}

impl Header {
    /// Encode back into the wire representation.
    pub fn word(self) -> u32 {
        match self {
            Header::Length(len) => len & LENGTH_MASK,
            Header::Indirect(addr) => addr | COPY_BIT,
        }
    }
}
