//! Arrays of inline scalar values.

use crate::error::Result;
use crate::memory::FlashMemory;
use crate::object::base::ObjectBase;
use crate::object::element::{check_ref, decode_ref, is_null_ref, Element, FlashObject};
use crate::object::read::Scalar;
use crate::object::types::{FlashAddr, REF_SIZE};
use crate::object::view::{ObjectIter, ObjectView};
use std::fmt;
use std::marker::PhantomData;

/// A record whose payload is a packed sequence of `T`.
///
/// Any trailing bytes that do not make up a whole element are ignored.
#[derive(Debug)]
pub struct Array<'f, T> {
    base: ObjectBase<'f>,
    _element: PhantomData<T>,
}

impl<T> Clone for Array<'_, T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            _element: PhantomData,
        }
    }
}

impl<'f, T: Scalar> FlashObject<'f> for Array<'f, T> {
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

impl<'f, T: Scalar + Element<'f>> ObjectView<'f> for Array<'f, T> {
    type Element = T;
}

impl<'f, T: Scalar> Element<'f> for Array<'f, T> {
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

impl<'f, T: Scalar + Element<'f>> Array<'f, T> {
    /// Decode elements starting at `index` into `out`.
    ///
    /// Returns the number of elements written.
    pub fn read_values(&self, index: usize, out: &mut [T]) -> usize {
        let data = self.base.data();
        let Some(start) = index.checked_mul(T::WIDTH) else {
            return 0;
        };
        let Some(tail) = data.get(start..) else {
            return 0;
        };
        let mut count = 0;
        for (slot, chunk) in out.iter_mut().zip(tail.chunks_exact(T::WIDTH)) {
            *slot = T::from_le_slice(chunk);
            count += 1;
        }
        count
    }

    /// All elements, decoded.
    pub fn to_vec(&self) -> Vec<T> {
        self.base
            .data()
            .chunks_exact(T::WIDTH)
            .map(T::from_le_slice)
            .collect()
    }
}

impl<'f, T> fmt::Display for Array<'f, T>
where
    T: Scalar + Element<'f> + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.printer(", "), f)
    }
}

impl<'a, 'f, T: Scalar + Element<'f>> IntoIterator for &'a Array<'f, T> {
    type Item = T;
    type IntoIter = ObjectIter<'a, 'f, Array<'f, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
