//! Error types for flash object access.
//!
//! The accessors on object views are total and never return these errors.
//! They are used at the fallible boundary only: opening an image, loading
//! configuration and validating records placed by external tooling.

use crate::memory::error::MemoryError;
use thiserror::Error;

/// Main error type for flash image operations.
#[derive(Debug, Error)]
pub enum FlashError {
    /// Record does not start on a 4-byte boundary
    #[error("Record at {addr:#010x} is not 4-byte aligned")]
    Misaligned { addr: u32 },

    /// Address range not covered by the region
    #[error("Range {addr:#010x}+{len} lies outside flash region '{region}'")]
    OutOfBounds {
        addr: u32,
        len: usize,
        region: String,
    },

    /// Indirection record pointing at another indirection record
    #[error("Indirection at {addr:#010x} points to another indirection at {target:#010x}")]
    ChainedIndirection { addr: u32, target: u32 },

    /// Payload length collides with the indirection bit
    #[error("Length field {word:#010x} at {addr:#010x} overflows the payload length range")]
    LengthOverflow { addr: u32, word: u32 },

    /// Payload is not a whole number of elements
    #[error(
        "Payload of {length} bytes at {addr:#010x} is not a multiple of the element size {element_size}"
    )]
    ElementMismatch {
        addr: u32,
        length: u32,
        element_size: usize,
    },

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Region construction errors
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration (de)serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for flash image operations
pub type Result<T> = std::result::Result<T, FlashError>;
