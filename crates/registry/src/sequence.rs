//! Owning sequential container.
//!
//! Elements live in a Slab arena. Slots are only ever appended and the whole
//! arena is only ever cleared, so slot keys are dense and ascending and
//! iteration order is insertion order.

use std::fmt;

use slab::Slab;

/// Ordered container that exclusively owns its elements
///
/// - grown only by [`append`](Self::append) at the tail
/// - shrunk only by [`clear`](Self::clear)
/// - `Clone` is a deep, order-preserving copy; `clone_from` clears the destination first
pub struct OwningSequence<T> {
    slots: Slab<T>,
}

impl<T> OwningSequence<T> {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self { slots: Slab::new() }
    }

    /// Append a value at the tail, returning its stable slot index
    #[inline]
    pub fn append(&mut self, value: T) -> usize {
        self.slots.insert(value)
    }

    /// Append a value at the tail and return a mutable reference to it
    pub fn append_mut(&mut self, value: T) -> &mut T {
        self.slots.vacant_entry().insert(value)
    }

    /// Number of elements
    #[inline]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// First element, without removing it
    pub fn head(&self) -> Option<&T> {
        self.iter().next()
    }

    /// Element at a slot index returned by `append`
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    /// First element matching `pred`
    pub fn find_by<P>(&self, mut pred: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|v| pred(v))
    }

    pub fn find_by_mut<P>(&mut self, mut pred: P) -> Option<&mut T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter_mut().find(|v| pred(v))
    }

    /// Apply `op` to every element in insertion order
    pub fn for_each<F>(&self, mut op: F)
    where
        F: FnMut(&T),
    {
        for value in self.iter() {
            op(value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().map(|(_, v)| v)
    }

    /// Mutable traversal; elements can be updated in place but not removed or reordered
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.slots.iter_mut().map(|(_, v)| v)
    }

    /// Release every element
    ///
    /// Idempotent. Slot indices restart from zero afterwards.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<T: PartialEq> OwningSequence<T> {
    /// First element equal to `value`
    pub fn find(&self, value: &T) -> Option<&T> {
        self.find_by(|v| v == value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }
}

impl<T> Default for OwningSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for OwningSequence<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source.iter().cloned());
    }
}

impl<T: fmt::Debug> fmt::Debug for OwningSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for OwningSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> FromIterator<T> for OwningSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<T> Extend<T> for OwningSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T> IntoIterator for OwningSequence<T> {
    type Item = T;
    type IntoIter = std::iter::Map<slab::IntoIter<T>, fn((usize, T)) -> T>;

    fn into_iter(self) -> Self::IntoIter {
        fn value<T>((_, v): (usize, T)) -> T {
            v
        }
        self.slots.into_iter().map(value::<T> as fn((usize, T)) -> T)
    }
}

impl<'a, T> IntoIterator for &'a OwningSequence<T> {
    type Item = &'a T;
    type IntoIter = std::iter::Map<slab::Iter<'a, T>, fn((usize, &'a T)) -> &'a T>;

    fn into_iter(self) -> Self::IntoIter {
        fn value<T>((_, v): (usize, &T)) -> &T {
            v
        }
        self.slots.iter().map(value::<T> as fn((usize, &'a T)) -> &'a T)
    }
}
