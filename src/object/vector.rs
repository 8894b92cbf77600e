//! Vectors of references to other records.

use crate::error::Result;
use crate::memory::FlashMemory;
use crate::object::base::ObjectBase;
use crate::object::element::{check_ref, decode_ref, is_null_ref, Element, FlashObject};
use crate::object::string::FlashString;
use crate::object::types::{FlashAddr, REF_SIZE};
use crate::object::view::{ObjectIter, ObjectView};
use std::fmt;
use std::marker::PhantomData;

/// A record whose payload is a sequence of record addresses.
///
/// Each element is decoded as an `O` handle on the record it points at. Null
/// slots decode as the empty object.
pub struct Vector<'f, O> {
    base: ObjectBase<'f>,
    _element: PhantomData<fn() -> O>,
}

impl<O> Clone for Vector<'_, O> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            _element: PhantomData,
        }
    }
}

impl<O> fmt::Debug for Vector<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector").field("base", &self.base).finish()
    }
}

impl<'f, O> FlashObject<'f> for Vector<'f, O> {
    fn from_base(base: ObjectBase<'f>) -> Self {
        Self {
            base,
            _element: PhantomData,
        }
    }

    fn base(&self) -> &ObjectBase<'f> {
        &self.base
    }
}

impl<'f, O: FlashObject<'f> + Element<'f>> ObjectView<'f> for Vector<'f, O> {
    type Element = O;
}

impl<'f, O> Element<'f> for Vector<'f, O> {
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

impl<'f> Vector<'f, FlashString<'f>> {
    /// Index of the first string equal to `value`, optionally ignoring ASCII
    /// case.
    pub fn index_of_str(&self, value: impl AsRef<[u8]>, ignore_case: bool) -> Option<usize> {
        let value = value.as_ref();
        self.iter().position(|s| {
            if ignore_case {
                s.equals_ignore_case(value)
            } else {
                s.as_bytes() == value
            }
        })
    }
}

impl<'f, O> fmt::Display for Vector<'f, O>
where
    O: FlashObject<'f> + Element<'f> + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.printer(", "), f)
    }
}

impl<'a, 'f, O: FlashObject<'f> + Element<'f>> IntoIterator for &'a Vector<'f, O> {
    type Item = O;
    type IntoIter = ObjectIter<'a, 'f, Vector<'f, O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
