//! Typed, indexed access to record payloads.
//!
//! [`ObjectView`] is implemented by every container kind. The provided
//! methods do the work; a container only names its element type. All
//! accessors are total: out-of-range indices yield the element's empty value
//! and reads past the end are clipped.

use crate::memory::FlashMemory;
use crate::object::element::{Element, FlashObject};
use crate::object::printer::ArrayPrinter;
use crate::object::stream::FlashStream;
use crate::object::types::FlashAddr;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// A record payload decoded as a sequence of elements.
pub trait ObjectView<'f>: FlashObject<'f> {
    type Element: Element<'f>;

    /// Number of elements.
    fn length(&self) -> usize {
        self.base().length() as usize / self.element_size()
    }

    /// Width of one element in bytes.
    fn element_size(&self) -> usize {
        <Self::Element as Element<'f>>::SIZE
    }

    fn is_empty(&self) -> bool {
        self.length() == 0
    }

    /// Payload size in bytes including padding.
    fn size(&self) -> u32 {
        self.base().size()
    }

    /// Whether this handle is an indirection to the record.
    fn is_copy(&self) -> bool {
        self.base().is_copy()
    }

    /// Address of the resolved record.
    fn address(&self) -> FlashAddr {
        self.base().address()
    }

    fn flash(&self) -> &'f dyn FlashMemory {
        self.base().flash()
    }

    /// Decoded element at `index`, or the element's empty value when
    /// `index >= length()`.
    fn value_at(&self, index: usize) -> Self::Element {
        let base = self.base();
        let size = self.element_size();
        if index < self.length() {
            let addr = base.data_address() + (index * size) as u32;
            <Self::Element as Element<'f>>::decode_at(base.flash(), addr)
        } else {
            <Self::Element as Element<'f>>::empty_value(base.flash())
        }
    }

    /// Copy whole elements starting at `index` into `buffer`.
    ///
    /// Returns the number of elements actually copied.
    fn read(&self, index: usize, buffer: &mut [u8]) -> usize {
        let size = self.element_size();
        let Some(offset) = index.checked_mul(size) else {
            return 0;
        };
        let count = whole_bytes(self.length() * size, offset, buffer.len(), size);
        self.base().read(offset, &mut buffer[..count]) / size
    }

    /// Same as [`ObjectView::read`] through the device read path.
    fn read_flash(&self, index: usize, buffer: &mut [u8]) -> usize {
        let size = self.element_size();
        let Some(offset) = index.checked_mul(size) else {
            return 0;
        };
        let count = whole_bytes(self.length() * size, offset, buffer.len(), size);
        self.base().read_flash(offset, &mut buffer[..count]) / size
    }


    fn iter(&self) -> ObjectIter<'_, 'f, Self> {
        ObjectIter::new(self, 0)
    }

    /// Iterator positioned at the first element.
    fn begin(&self) -> ObjectIter<'_, 'f, Self> {
        ObjectIter::new(self, 0)
    }

    /// Iterator positioned one past the last element.
    fn end(&self) -> ObjectIter<'_, 'f, Self> {
        ObjectIter::new(self, self.length())
    }

    /// Index of the first element equal to `value` (case-sensitive for
    /// strings).
    fn index_of<Q: ?Sized>(&self, value: &Q) -> Option<usize>
    where
        Self::Element: PartialEq<Q>,
    {
        self.iter().position(|element| element.eq(value))
    }

    /// Displays the elements joined by `separator`.
    fn printer<'a>(&'a self, separator: &'a str) -> ArrayPrinter<'a, 'f, Self> {
        ArrayPrinter::new(self, separator)
    }

    /// Byte stream over the payload.
    fn stream(&self) -> FlashStream<'f> {
        FlashStream::new(self.base().clone())
    }
}

/// Bytes of whole elements between `offset` and the end of the elements,
/// capped by a buffer of `capacity` bytes.
fn whole_bytes(elements_len: usize, offset: usize, capacity: usize, size: usize) -> usize {
    (capacity / size * size).min(elements_len.saturating_sub(offset))
}

/// Forward iterator over the elements of a view.
///
/// Yields decoded values, not references. Two iterators compare equal when
/// they are at the same position, whichever container they walk.
pub struct ObjectIter<'a, 'f, V: ?Sized> {
    view: &'a V,
    index: usize,
    _flash: PhantomData<&'f ()>,
}

impl<'a, 'f, V: ObjectView<'f> + ?Sized> ObjectIter<'a, 'f, V> {
    fn new(view: &'a V, index: usize) -> Self {
        Self {
            view,
            index,
            _flash: PhantomData,
        }
    }

    /// Index of the element the next call to `next` yields.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<'f, V: ObjectView<'f> + ?Sized> Iterator for ObjectIter<'_, 'f, V> {
    type Item = V::Element;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.view.length() {
            return None;
        }
        let value = self.view.value_at(self.index);
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.view.length().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'f, V: ObjectView<'f> + ?Sized> ExactSizeIterator for ObjectIter<'_, 'f, V> {}

impl<'f, V: ObjectView<'f> + ?Sized> FusedIterator for ObjectIter<'_, 'f, V> {}

impl<V: ?Sized> Clone for ObjectIter<'_, '_, V> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            index: self.index,
            _flash: PhantomData,
        }
    }
}

impl<'b, V: ?Sized> PartialEq<ObjectIter<'b, '_, V>> for ObjectIter<'_, '_, V> {
    fn eq(&self, other: &ObjectIter<'b, '_, V>) -> bool {
        self.index == other.index
    }
}

impl<V: ?Sized> fmt::Debug for ObjectIter<'_, '_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectIter")
            .field("index", &self.index)
            .finish()
    }
}
