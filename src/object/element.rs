//! Decodable payload elements.
//!
//! Containers decode their payload slot by slot. An [`Element`] knows its slot
//! width, how to decode a slot, and what to return when an index is out of
//! range. Scalars are stored inline; objects are stored as reference slots
//! holding the address of another record.

use crate::error::Result;
use crate::image::validate::validate_record;
use crate::memory::FlashMemory;
use crate::object::base::ObjectBase;
use crate::object::read::{read_value, Scalar};
use crate::object::types::{FlashAddr, NULL_ADDR, REF_SIZE};

/// Typed handle over a record.
pub trait FlashObject<'f>: Sized {
    fn from_base(base: ObjectBase<'f>) -> Self;

    fn base(&self) -> &ObjectBase<'f>;

    /// Typed handle on the record at `addr`.
    fn at(flash: &'f dyn FlashMemory, addr: FlashAddr) -> Self {
        Self::from_base(ObjectBase::at(flash, addr))
    }

    /// The canonical empty instance of this type.
    fn empty(flash: &'f dyn FlashMemory) -> Self {
        Self::from_base(ObjectBase::empty(flash))
    }
}

/// A value occupying one fixed-width payload slot.
pub trait Element<'f>: Sized {
    /// Slot width in bytes.
    const SIZE: usize;

    /// Whether slots hold addresses of other records.
    const IS_REFERENCE: bool = false;

    /// Decode the slot starting at `addr`.
    fn decode_at(flash: &'f dyn FlashMemory, addr: FlashAddr) -> Self;

    /// Value for indices past the end: zero for scalars, the empty object
    /// for references.
    fn empty_value(flash: &'f dyn FlashMemory) -> Self;

    /// Whether the slot at `addr` holds a null reference.
    fn is_null_at(_flash: &'f dyn FlashMemory, _addr: FlashAddr) -> bool {
        false
    }

    /// Check that whatever the slot at `addr` refers to is a well-formed
    /// record. Inline values have nothing to check.
    fn check_slot(_flash: &'f dyn FlashMemory, _addr: FlashAddr) -> Result<()> {
        Ok(())
    }
}

macro_rules! impl_scalar_element {
    ($($t:ty),* $(,)?) => {
        $(
            impl<'f> Element<'f> for $t {
                const SIZE: usize = <$t as Scalar>::WIDTH;

                #[inline(always)]
                fn decode_at(flash: &'f dyn FlashMemory, addr: FlashAddr) -> Self {
                    read_value::<$t>(flash, addr)
                }

                #[inline(always)]
                fn empty_value(_flash: &'f dyn FlashMemory) -> Self {
                    <$t as Scalar>::zero()
                }
            }
        )*
    };
}

impl_scalar_element!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

impl<'f, T: Scalar, const N: usize> Element<'f> for [T; N] {
    const SIZE: usize = <[T; N] as Scalar>::WIDTH;

    fn decode_at(flash: &'f dyn FlashMemory, addr: FlashAddr) -> Self {
        read_value::<[T; N]>(flash, addr)
    }

    fn empty_value(_flash: &'f dyn FlashMemory) -> Self {
        <[T; N] as Scalar>::zero()
    }
}

/// Follow the reference slot at `addr`; null slots give the empty object.
pub fn decode_ref<'f, O: FlashObject<'f>>(flash: &'f dyn FlashMemory, addr: FlashAddr) -> O {
    match read_value::<u32>(flash, addr) {
        NULL_ADDR => O::empty(flash),
        target => O::at(flash, target),
    }
}

/// Whether the reference slot at `addr` is null.
pub fn is_null_ref(flash: &dyn FlashMemory, addr: FlashAddr) -> bool {
    read_value::<u32>(flash, addr) == NULL_ADDR
}

/// Validate the record a reference slot points at, if any.
pub fn check_ref(flash: &dyn FlashMemory, addr: FlashAddr) -> Result<()> {
    match read_value::<u32>(flash, addr) {
        NULL_ADDR => Ok(()),
        target => validate_record(flash, target).map(drop),
    }
}

const _: () = assert!(REF_SIZE == std::mem::size_of::<u32>());
