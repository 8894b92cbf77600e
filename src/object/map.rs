//! Key/value maps stored as sequences of pairs.
//!
//! A map payload is a packed sequence of (key, content) slots. Lookups are
//! linear and compare keys only. Keys may be objects (reference slots) or
//! scalars stored inline.

use crate::error::Result;
use crate::memory::FlashMemory;
use crate::object::base::ObjectBase;
use crate::object::element::{check_ref, decode_ref, is_null_ref, Element, FlashObject};
use crate::object::types::{FlashAddr, REF_SIZE};
use crate::object::utils::is_permitted_width;
use crate::object::view::{ObjectIter, ObjectView};
use std::fmt;
use std::iter;
use std::marker::PhantomData;

/// One entry of a [`Map`].
///
/// A pair looked up past the end of the map, or whose key slot is null, is
/// the empty pair: both members are empty and [`Pair::is_present`] is false.
///
/// Pairs are packed without padding, so the key width must keep the content
/// slot readable. Content that is a reference or at least a word wide must
/// start on a word boundary, and the pair as a whole must have a permitted
/// access width. Other layouts are rejected at compile time:
///
/// ```compile_fail
/// use flash_objects::{FlashObject, FlashString, ImageBuilder, Map, ObjectView};
///
/// let flash = ImageBuilder::new(0x1000).finish("pairs");
/// let map: Map<FlashString, u16> = Map::at(&flash, 0x1000);
/// map.length();
/// ```
#[derive(Debug, Clone)]
pub struct Pair<K, V> {
    key: K,
    content: V,
    present: bool,
}

impl<K, V> Pair<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn content(&self) -> &V {
        &self.content
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.content)
    }
}

impl<'f, K: Element<'f>, V: Element<'f>> Element<'f> for Pair<K, V> {
    const SIZE: usize = pair_width(K::SIZE, V::SIZE, V::IS_REFERENCE || V::SIZE >= 4);

    fn decode_at(flash: &'f dyn FlashMemory, addr: FlashAddr) -> Self {
        if K::is_null_at(flash, addr) {
            return Self::empty_value(flash);
        }
        Self {
            key: K::decode_at(flash, addr),
            content: V::decode_at(flash, addr + (Self::SIZE - V::SIZE) as u32),
            present: true,
        }
    }

    fn empty_value(flash: &'f dyn FlashMemory) -> Self {
        Self {
            key: K::empty_value(flash),
            content: V::empty_value(flash),
            present: false,
        }
    }

    fn check_slot(flash: &'f dyn FlashMemory, addr: FlashAddr) -> Result<()> {
        K::check_slot(flash, addr)?;
        V::check_slot(flash, addr + (Self::SIZE - V::SIZE) as u32)
    }
}

/// Width of a packed (key, content) pair, failing const evaluation for
/// layouts that would need unaligned reads.
const fn pair_width(key: usize, content: usize, content_is_word: bool) -> usize {
    assert!(
        is_permitted_width(key + content),
        "map pairs must be 1, 2 or a multiple of 4 bytes wide"
    );
    assert!(
        !content_is_word || key % 4 == 0,
        "map content slots must start on a word boundary"
    );
    key + content
}

/// A record whose payload is a sequence of [`Pair`]s.
pub struct Map<'f, K, V> {
    base: ObjectBase<'f>,
    _entries: PhantomData<fn() -> (K, V)>,
}

impl<K, V> Clone for Map<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            _entries: PhantomData,
        }
    }
}

impl<K, V> fmt::Debug for Map<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map").field("base", &self.base).finish()
    }
}

impl<'f, K, V> FlashObject<'f> for Map<'f, K, V> {
    fn from_base(base: ObjectBase<'f>) -> Self {
        Self {
            base,
            _entries: PhantomData,
        }
    }

    fn base(&self) -> &ObjectBase<'f> {
        &self.base
    }
}

impl<'f, K: Element<'f>, V: Element<'f>> ObjectView<'f> for Map<'f, K, V> {
    type Element = Pair<K, V>;
}

impl<'f, K, V> Element<'f> for Map<'f, K, V> {
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

impl<'f, K: Element<'f>, V: Element<'f>> Map<'f, K, V> {
    fn key_address(&self, index: usize) -> FlashAddr {
        self.base.data_address() + (index * <Pair<K, V> as Element<'f>>::SIZE) as u32
    }

    /// Index of the first pair whose key equals `key`.
    ///
    /// Only key slots are decoded. Pairs with a null key never match.
    pub fn index_of<Q: ?Sized>(&self, key: &Q) -> Option<usize>
    where
        K: PartialEq<Q>,
    {
        let flash = self.base.flash();
        (0..self.length()).find(|&index| {
            let addr = self.key_address(index);
            !K::is_null_at(flash, addr) && K::decode_at(flash, addr) == *key
        })
    }

    /// The pair for `key`, or the empty pair if there is none.
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Pair<K, V>
    where
        K: PartialEq<Q>,
    {
        match self.index_of(key) {
            Some(index) => self.value_at(index),
            None => Pair::empty_value(self.base.flash()),
        }
    }

    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        K: PartialEq<Q>,
    {
        self.index_of(key).is_some()
    }

    pub fn keys(&self) -> iter::Map<ObjectIter<'_, 'f, Self>, fn(Pair<K, V>) -> K> {
        let key: fn(Pair<K, V>) -> K = |pair| pair.key;
        self.iter().map(key)
    }

    pub fn values(&self) -> iter::Map<ObjectIter<'_, 'f, Self>, fn(Pair<K, V>) -> V> {
        let content: fn(Pair<K, V>) -> V = |pair| pair.content;
        self.iter().map(content)
    }
}

impl<'a, 'f, K: Element<'f>, V: Element<'f>> IntoIterator for &'a Map<'f, K, V> {
    type Item = Pair<K, V>;
    type IntoIter = ObjectIter<'a, 'f, Map<'f, K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
