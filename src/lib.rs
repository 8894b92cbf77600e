//! Read-only, zero-copy views over records packed into flash memory.
//!
//! Records are stored as a 32-bit length header followed by a payload padded
//! to a multiple of 4 bytes. A header with its top bit set is an indirection
//! record standing in for another record. On top of this layout the crate
//! provides typed views: [`FlashString`], [`Array`] of inline scalars,
//! [`Vector`] of references and [`Map`] of key/content pairs.
//!
//! ```
//! use flash_objects::{Array, FlashObject, ImageBuilder, ObjectView};
//!
//! let mut builder = ImageBuilder::new(0x4020_0000);
//! let addr = builder.add_array(&[3.14f64, 53.0, 100.0, 1e8, 47.0]);
//! let flash = builder.finish("doc");
//!
//! let values: Array<f64> = Array::at(&flash, addr);
//! assert_eq!(values.length(), 5);
//! assert_eq!(values.index_of(&47.0), Some(4));
//! assert_eq!(values.value_at(9), 0.0);
//! ```

pub mod config;
pub mod error;
pub mod image;
pub mod logging;
pub mod memory;
pub mod object;

pub use config::{FlashConfig, ImageLimits, DEFAULT_FLASH_BASE};
pub use error::{FlashError, Result};
pub use image::{FlashImage, ImageBuilder, RecordInfo};
pub use memory::{FlashMemory, MemoryFlash, MmapFlash};
pub use object::{
    Array, ArrayPrinter, Element, FlashAddr, FlashObject, FlashStream, FlashString, Map,
    ObjectBase, ObjectIter, ObjectRef, ObjectView, Pair, Scalar, Vector,
};
