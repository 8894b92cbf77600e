//! File-backed flash images.
//!
//! The image is memory-mapped read-only for the cached path. The device path
//! uses positional reads on the file descriptor instead of touching the
//! mapping, in chunks of `device_read_chunk` bytes.

use crate::config::FlashConfig;
use crate::memory::error::{MemoryError, Result};
use crate::memory::{check_address_space, FlashMemory};
use crate::object::types::FlashAddr;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// A read-only flash image mapped from a file.
#[derive(Debug)]
pub struct MmapFlash {
    path: PathBuf,
    name: String,
    base: FlashAddr,
    file: File,
    // None when the file size is zero; memmap cannot map empty files.
    mmap: Option<Mmap>,
    chunk: usize,
}

impl MmapFlash {
    /// Opens an image file and maps it at `config.base_address`.
    ///
    /// This function will fail if the file size exceeds
    /// `config.limits.max_image_size` or if the mapped range would reach the
    /// indirection bit.
    pub fn open<P: AsRef<Path>>(path: P, config: &FlashConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();

        debug!(
            path = %path.display(),
            size = file_size,
            base = config.base_address,
            limits.max_image_size = config.limits.max_image_size,
            "Opening flash image"
        );

        if file_size > config.limits.max_image_size {
            warn!(
                path = %path.display(),
                size = file_size,
                limit = config.limits.max_image_size,
                "Flash image is too large"
            );
            return Err(MemoryError::FileTooLarge {
                limit: config.limits.max_image_size,
                found: file_size,
            });
        }
        check_address_space(config.base_address, file_size)?;

        let mmap = if file_size == 0 {
            None
        } else {
            // Safety: the mapping is read-only and images are never modified while open.
            Some(unsafe { Mmap::map(&file)? })
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            base: config.base_address,
            file,
            mmap,
            chunk: config.device_read_chunk.max(1),
        })
    }

    /// Path of the underlying image file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(unix)]
    fn pread(&self, offset: usize, buf: &mut [u8]) -> std::io::Result<()> {
        use std::os::unix::fs::FileExt;

        for (i, chunk) in buf.chunks_mut(self.chunk).enumerate() {
            let pos = (offset + i * self.chunk) as u64;
            self.file.read_exact_at(chunk, pos)?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn pread(&self, offset: usize, buf: &mut [u8]) -> std::io::Result<()> {
        let end = offset + buf.len();
        buf.copy_from_slice(&self.as_bytes()[offset..end]);
        Ok(())
    }
}

impl FlashMemory for MmapFlash {
    fn name(&self) -> &str {
        &self.name
    }

    fn base_address(&self) -> FlashAddr {
        self.base
    }

    fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    fn flash_read(&self, addr: FlashAddr, buf: &mut [u8]) -> usize {
        let offset = match self.offset_of(addr) {
            Some(offset) => offset,
            None => return 0,
        };
        let count = buf.len().min(self.len() - offset);
        if count == 0 {
            return 0;
        }

        if let Err(e) = self.pread(offset, &mut buf[..count]) {
            warn!(
                path = %self.path.display(),
                offset,
                error = %e,
                "Device read failed, falling back to mapped copy"
            );
            buf[..count].copy_from_slice(&self.as_bytes()[offset..offset + count]);
        }

        trace!(path = %self.path.display(), offset, len = count, "Device read");
        count
    }
}
