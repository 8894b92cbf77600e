//! `std::io` adapter over an object's payload.

use crate::object::base::ObjectBase;
use std::io::{self, Read, Seek, SeekFrom};

/// Sequential reader over a payload.
///
/// Reads go through the cached path unless device reads are enabled, which
/// suits large payloads that are streamed once.
#[derive(Debug, Clone)]
pub struct FlashStream<'f> {
    object: ObjectBase<'f>,
    position: usize,
    device_reads: bool,
}

impl<'f> FlashStream<'f> {
    pub fn new(object: ObjectBase<'f>) -> Self {
        Self {
            object,
            position: 0,
            device_reads: false,
        }
    }

    /// Read through [`ObjectBase::read_flash`] instead of the cached path.
    pub fn with_device_reads(mut self, enabled: bool) -> Self {
        self.device_reads = enabled;
        self
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left before the end of the payload.
    pub fn remaining(&self) -> usize {
        (self.object.length() as usize).saturating_sub(self.position)
    }

    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }
}

impl Read for FlashStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let count = if self.device_reads {
            self.object.read_flash(self.position, buf)
        } else {
            self.object.read(self.position, buf)
        };
        self.position += count;
        Ok(count)
    }
}

impl Seek for FlashStream<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let length = self.object.length() as i64;
        let target = match pos {
            SeekFrom::Start(offset) => i64::try_from(offset).ok(),
            SeekFrom::Current(delta) => (self.position as i64).checked_add(delta),
            SeekFrom::End(delta) => length.checked_add(delta),
        };
        match target {
            Some(target) if (0..=length).contains(&target) => {
                self.position = target as usize;
                Ok(target as u64)
            }
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek outside object payload",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageBuilder;

    #[test]
    fn test_read_to_end() {
        let mut builder = ImageBuilder::new(0x100);
        let addr = builder.add_str("streamed content");
        let flash = builder.finish("stream");

        let mut stream = FlashStream::new(ObjectBase::at(&flash, addr));
        let mut out = String::new();
        stream.read_to_string(&mut out).unwrap();
        assert_eq!(out, "streamed content");
        assert!(stream.is_finished());
        assert_eq!(flash.device_reads(), 0);
    }

    #[test]
    fn test_device_reads() {
        let mut builder = ImageBuilder::new(0x100);
        let addr = builder.add_bytes(&[7u8; 100]);
        let flash = builder.finish("stream");

        let mut stream = FlashStream::new(ObjectBase::at(&flash, addr)).with_device_reads(true);
        let mut buf = [0u8; 64];
        assert_eq!(stream.read(&mut buf).unwrap(), 64);
        assert_eq!(stream.read(&mut buf).unwrap(), 36);
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
        assert_eq!(flash.device_reads(), 2);
    }

    #[test]
    fn test_seek() {
        let mut builder = ImageBuilder::new(0x100);
        let addr = builder.add_str("0123456789");
        let flash = builder.finish("stream");
        let mut stream = FlashStream::new(ObjectBase::at(&flash, addr));

        assert_eq!(stream.seek(SeekFrom::Start(4)).unwrap(), 4);
        assert_eq!(stream.seek(SeekFrom::Current(2)).unwrap(), 6);
        assert_eq!(stream.seek(SeekFrom::End(-1)).unwrap(), 9);
        let mut buf = [0u8; 4];
        assert_eq!(stream.read(&mut buf).unwrap(), 1);
        assert_eq!(buf[0], b'9');

        assert_eq!(stream.seek(SeekFrom::End(0)).unwrap(), 10);
        assert!(stream.seek(SeekFrom::End(1)).is_err());
        assert!(stream.seek(SeekFrom::Current(-11)).is_err());
        assert!(stream.seek(SeekFrom::Start(11)).is_err());
        // A failed seek leaves the position alone
        assert_eq!(stream.position(), 10);
    }
}
