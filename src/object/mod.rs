//! Typed views over records packed into flash.
//!
//! Records are laid out by an [`ImageBuilder`](crate::image::ImageBuilder)
//! or by external placement tooling and never modified at runtime. Views
//! borrow the flash region and decode on access.

pub mod array;
pub mod base;
pub mod element;
pub mod map;
pub mod printer;
pub mod read;
pub mod stream;
pub mod string;
pub mod types;
pub mod utils;
pub mod vector;
pub mod view;

pub use array::Array;
pub use base::{ObjectBase, ObjectRef};
pub use element::{Element, FlashObject};
pub use map::{Map, Pair};
pub use printer::ArrayPrinter;
pub use read::{read_value, Scalar};
pub use stream::FlashStream;
pub use string::FlashString;
pub use types::{FlashAddr, Header, COPY_BIT, HEADER_SIZE, NULL_ADDR, REF_SIZE};
pub use vector::Vector;
pub use view::{ObjectIter, ObjectView};
