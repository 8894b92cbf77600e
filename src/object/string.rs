//! Byte strings stored as records.

use crate::error::Result;
use crate::memory::FlashMemory;
use crate::object::base::ObjectBase;
use crate::object::element::{check_ref, decode_ref, is_null_ref, Element, FlashObject};
use crate::object::types::{FlashAddr, REF_SIZE};
use crate::object::view::{ObjectIter, ObjectView};
use std::borrow::Cow;
use std::fmt;

/// A string whose payload is its bytes, without a terminator.
///
/// Content is not required to be UTF-8.
#[derive(Debug, Clone)]
pub struct FlashString<'f> {
    base: ObjectBase<'f>,
}

impl<'f> FlashObject<'f> for FlashString<'f> {
    fn from_base(base: ObjectBase<'f>) -> Self {
        Self { base }
    }

    fn base(&self) -> &ObjectBase<'f> {
        &self.base
    }
}

impl<'f> ObjectView<'f> for FlashString<'f> {
    type Element = u8;
}

impl<'f> Element<'f> for FlashString<'f> {
    const SIZE: usize = REF_SIZE;
    const IS_REFERENCE: bool = true;

    fn decode_at(flash: &'f dyn FlashMemory, addr: FlashAddr) -> Self {
        decode_ref(flash, addr)
    }

    fn empty_value(flash: &'f dyn FlashMemory) -> Self {
        Self::empty(flash)
    }

    fn is_null_at(flash: &'f dyn FlashMemory, addr: FlashAddr) -> bool {
        is_null_ref(flash, addr)
    }

    fn check_slot(flash: &'f dyn FlashMemory, addr: FlashAddr) -> Result<()> {
        check_ref(flash, addr)
    }
}

impl<'f> FlashString<'f> {
    pub fn as_bytes(&self) -> &'f [u8] {
        self.base.data()
    }

    pub fn to_string_lossy(&self) -> Cow<'f, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// ASCII case-insensitive comparison.
    pub fn equals_ignore_case(&self, other: impl AsRef<[u8]>) -> bool {
        self.as_bytes().eq_ignore_ascii_case(other.as_ref())
    }
}

impl PartialEq<[u8]> for FlashString<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8]> for FlashString<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl PartialEq<str> for FlashString<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for FlashString<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<'g> PartialEq<FlashString<'g>> for FlashString<'_> {
    fn eq(&self, other: &FlashString<'g>) -> bool {
        self.base.content_eq(&other.base)
    }
}

impl fmt::Display for FlashString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl<'a, 'f> IntoIterator for &'a FlashString<'f> {
    type Item = u8;
    type IntoIter = ObjectIter<'a, 'f, FlashString<'f>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
