// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Strongly Typed Indices and Arenas
//!
//! The revenue engine addresses vertices, edges, trains and bonuses by dense
//! integer ids. Raw `usize` invites accidental swaps (a vertex id used to index
//! the edge table compiles just fine), so every id space gets its own
//! phantom-tagged wrapper, and every table indexed by such an id is an
//! `IndexedVec` that only accepts the matching index type.
//!
//! Both types are `#[repr(transparent)]` wrappers and compile down to plain
//! `usize` / `Vec<V>` access.
//!
//! ## Usage
//!
//! ```rust
//! use railhead_core::utils::index::{IndexedVec, TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone, Copy)]
//! struct StopTag;
//! impl TypedIndexTag for StopTag { const NAME: &'static str = "StopIndex"; }
//!
//! type StopIndex = TypedIndex<StopTag>;
//!
//! let mut names: IndexedVec<StopTag, &str> = IndexedVec::new();
//! let berlin: StopIndex = names.push("Berlin");
//! assert_eq!(names[berlin], "Berlin");
//! assert_eq!(format!("{}", berlin), "StopIndex(0)");
//! ```

/// A trait to tag typed indices with a name for debugging and display purposes.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A strongly typed index that is associated with a specific tag type `T`.
///
/// Equality, ordering and hashing are those of the wrapped `usize`, so typed
/// indices can be sorted and used as keys exactly like plain ids.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new `TypedIndex` with the given `usize` index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns the index directly following this one.
    #[inline(always)]
    pub const fn next(&self) -> Self {
        Self::new(self.index + 1)
    }

    /// Returns an iterator over all indices in `start..=end`.
    ///
    /// Yields nothing if `start > end`.
    #[inline]
    pub fn range_inclusive(start: Self, end: Self) -> impl DoubleEndedIterator<Item = Self> {
        (start.index..=end.index).map(Self::new)
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

#[cfg(feature = "serde")]
impl<T> serde::Serialize for TypedIndex<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.index as u64)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for TypedIndex<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <usize as serde::Deserialize>::deserialize(deserializer).map(Self::new)
    }
}

/// A flat, index-addressed arena whose slots can only be addressed with
/// `TypedIndex<T>`.
///
/// This is the replacement for the parallel `int[][]` tables a naive
/// implementation would use: one `IndexedVec` per attribute, all indexed by the
/// same id space, without the risk of indexing the edge table with a vertex id.
#[repr(transparent)]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IndexedVec<T, V> {
    items: Vec<V>,
    _marker: std::marker::PhantomData<T>,
}

impl<T, V> Default for IndexedVec<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> IndexedVec<T, V> {
    /// Creates an empty arena.
    #[inline]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Creates an empty arena with room for `capacity` items.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            _marker: std::marker::PhantomData,
        }
    }

    /// Creates an arena holding `len` clones of `value`.
    #[inline]
    pub fn filled(value: V, len: usize) -> Self
    where
        V: Clone,
    {
        Self {
            items: vec![value; len],
            _marker: std::marker::PhantomData,
        }
    }

    /// Appends `value` and returns the index it was stored under.
    #[inline]
    pub fn push(&mut self, value: V) -> TypedIndex<T> {
        let index = TypedIndex::new(self.items.len());
        self.items.push(value);
        index
    }

    /// Returns the number of items in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the arena holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if `index` addresses an existing slot.
    #[inline]
    pub fn contains_index(&self, index: TypedIndex<T>) -> bool {
        index.get() < self.items.len()
    }

    /// Returns a reference to the item at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: TypedIndex<T>) -> Option<&V> {
        self.items.get(index.get())
    }

    /// Returns a mutable reference to the item at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: TypedIndex<T>) -> Option<&mut V> {
        self.items.get_mut(index.get())
    }

    /// Iterates over all valid indices in ascending order.
    #[inline]
    pub fn indices(&self) -> impl DoubleEndedIterator<Item = TypedIndex<T>> + ExactSizeIterator {
        (0..self.items.len()).map(TypedIndex::new)
    }

    /// Iterates over `(index, &item)` pairs in ascending index order.
    #[inline]
    pub fn iter_enumerated(&self) -> impl DoubleEndedIterator<Item = (TypedIndex<T>, &V)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (TypedIndex::new(i), item))
    }

    /// Iterates over the items in ascending index order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.items.iter()
    }

    /// Iterates mutably over the items in ascending index order.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, V> {
        self.items.iter_mut()
    }

    /// Returns the items as a plain slice.
    #[inline]
    pub fn as_slice(&self) -> &[V] {
        &self.items
    }

    /// Returns the items as a plain mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [V] {
        &mut self.items
    }
}

impl<T, V> From<Vec<V>> for IndexedVec<T, V> {
    fn from(items: Vec<V>) -> Self {
        Self {
            items,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T, V> FromIterator<V> for IndexedVec<T, V> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T, V> std::ops::Index<TypedIndex<T>> for IndexedVec<T, V> {
    type Output = V;

    #[inline(always)]
    fn index(&self, index: TypedIndex<T>) -> &Self::Output {
        &self.items[index.get()]
    }
}

impl<T, V> std::ops::IndexMut<TypedIndex<T>> for IndexedVec<T, V> {
    #[inline(always)]
    fn index_mut(&mut self, index: TypedIndex<T>) -> &mut Self::Output {
        &mut self.items[index.get()]
    }
}

impl<'a, T, V> IntoIterator for &'a IndexedVec<T, V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T, V> std::fmt::Debug for IndexedVec<T, V>
where
    T: TypedIndexTag,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.iter_enumerated().map(|(i, v)| (i, v)))
            .finish()
    }
}
