use std::borrow::Borrow;
use std::fmt::{Debug, Display, Formatter};
use std::iter::FusedIterator;

use super::llrb_map::{self, LlrbMap};
use crate::error::{Error, Result, Violation};

/// A sorted set of keys.
///
/// The implementation is a thin wrapper around [`LlrbMap`].  Unlike the map,
/// inserting a key that is already present is an error.
///
/// # Examples
/// ```
/// use llrb_collections::{Error, LlrbSet};
///
/// let mut s = LlrbSet::new();
/// assert_eq!(s.insert(42), Ok(()));
/// assert_eq!(s.insert(42), Err(Error::DuplicateKey));
/// assert_eq!(s.len(), 1);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LlrbSet<K> {
    map: LlrbMap<K, ()>,
}

impl<K> LlrbSet<K> {
    /// Creates a new, empty set.
    pub fn new() -> Self {
        LlrbSet { map: LlrbMap::new() }
    }

    /// Removes all the keys from self.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns the number of keys in self.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if self is the empty set, false otherwise.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the height of the underlying tree.
    pub fn height(&self) -> usize {
        self.map.height()
    }

    /// Returns the least key in the set, or [`Error::EmptyTree`].
    pub fn min(&self) -> Result<&K> {
        self.map.min()
    }

    /// Returns the greatest key in the set, or [`Error::EmptyTree`].
    pub fn max(&self) -> Result<&K> {
        self.map.max()
    }

    /// Returns an iterator over self's keys in sorted order.
    pub fn iter(&self) -> SetIter<'_, K> {
        SetIter {
            iter: self.map.iter(),
        }
    }
}

impl<K: Ord> LlrbSet<K> {
    /// Inserts `key`, or returns [`Error::DuplicateKey`] and leaves self
    /// untouched if it is already present.
    pub fn insert(&mut self, key: K) -> Result<()> {
        if self.map.contains(&key) {
            return Err(Error::DuplicateKey);
        }

        self.map.insert(key, ());
        Ok(())
    }

    /// Removes `key` and returns true if it was present.  Removing an absent
    /// key is a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.remove(key).is_some()
    }

    /// Tests if self contains `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.contains(key)
    }

    /// Returns a reference to the stored key matching `key`, or
    /// [`Error::KeyNotFound`].
    pub fn get<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map
            .get_key_value(key)
            .map(|(k, _)| k)
            .ok_or(Error::KeyNotFound)
    }

    /// Verifies the red-black invariants and the cached length.
    pub fn check(&self) -> std::result::Result<(), Violation> {
        self.map.check()
    }
}

impl<K> Default for LlrbSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Display> LlrbSet<K> {
    /// Writes the keys, in order, to stdout.
    pub fn print(&self) {
        println!("{}", self);
    }
}

impl<K: Debug> Debug for LlrbSet<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Display> Display for LlrbSet<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut sep = "";
        for k in self.iter() {
            write!(f, "{}<{}>", sep, k)?;
            sep = " ";
        }
        Ok(())
    }
}

// duplicates are skipped, keeping the first occurrence
impl<K: Ord> Extend<K> for LlrbSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for k in iter {
            let _ = self.insert(k);
        }
    }
}

impl<K: Ord> FromIterator<K> for LlrbSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut s = LlrbSet::new();
        s.extend(iter);
        s
    }
}

impl<'a, K> IntoIterator for &'a LlrbSet<K> {
    type Item = &'a K;
    type IntoIter = SetIter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over the keys of an [`LlrbSet`].
pub struct SetIter<'a, K> {
    iter: llrb_map::Iter<'a, K, ()>,
}

impl<'a, K> Iterator for SetIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, K> ExactSizeIterator for SetIter<'a, K> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<'a, K> FusedIterator for SetIter<'a, K> {}
