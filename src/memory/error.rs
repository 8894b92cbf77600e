//! Custom error types for the memory module.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Image size of {found} bytes exceeds the maximum allowed size of {limit} bytes.")]
    FileTooLarge { limit: u64, found: u64 },

    #[error(
        "Region at {base:#010x} with {len} bytes does not fit below the indirection bit."
    )]
    AddressSpaceExhausted { base: u32, len: u64 },

    #[error("An underlying I/O error occurred.")]
    StdIo(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MemoryError>;
