//! A sorted map holding one value per key.

use std::borrow::Borrow;
use std::fmt::{Debug, Display, Formatter};
use std::iter::FusedIterator;

use super::{Inserted, Single, Tree};
use crate::error::{Error, Result, Violation};

/// A map from keys to values sorted by key.
///
/// The map is a left-leaning red-black tree.  Every update rebalances on the
/// way back up, so the tree height stays below `2·log2(n + 1)` and `insert`,
/// `remove`, `get` and `contains` all run in logarithmic time.
///
/// Re-inserting a key that is already present replaces its value.
///
/// # Examples
/// ```
/// use llrb_collections::{Error, LlrbMap};
///
/// let mut m = LlrbMap::new();
/// m.insert(8, 93);
/// m.insert(3, 42);
///
/// assert_eq!(m.get(&8), Ok(&93));
/// assert_eq!(m.get(&5), Err(Error::KeyNotFound));
/// assert_eq!(m.min(), Ok(&3));
/// ```
#[derive(Clone)]
pub struct LlrbMap<K, V> {
    tree: Tree<K, Single<V>>,
}

impl<K, V> LlrbMap<K, V> {
    /// Creates a new, empty map.
    pub fn new() -> Self {
        LlrbMap { tree: Tree::new() }
    }

    /// Drops all entries from the map.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the number of keys in the map.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    /// Returns the height of the underlying tree (0 for an empty map).
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns the least key in the map, or [`Error::EmptyTree`].
    pub fn min(&self) -> Result<&K> {
        self.tree.min()
    }

    /// Returns the greatest key in the map, or [`Error::EmptyTree`].
    pub fn max(&self) -> Result<&K> {
        self.tree.max()
    }

    /// Creates an iterator over the map entries, sorted by key.
    ///
    /// # Examples
    /// ```
    /// use llrb_collections::LlrbMap;
    ///
    /// let m = LlrbMap::from([(0, 1), (1, 2), (2, 3)]);
    /// for (i, (k, v)) in m.iter().enumerate() {
    ///     assert_eq!(&i, k);
    ///     assert_eq!(&(i + 1), v);
    /// }
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    /// Returns an iterator over the keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over the values, sorted by their keys.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Calls `f` on every entry in key order.
    ///
    /// Recursive, so it skips the explicit stack that [`iter`](#method.iter)
    /// maintains.
    pub fn for_each<F: FnMut((&K, &V))>(&self, mut f: F) {
        self.tree.for_each(|k, v| f((k, &v.0)));
    }
}

impl<K: Ord, V> LlrbMap<K, V> {
    /// Inserts `val` under `key` and returns the value it replaced, if any.
    ///
    /// # Examples
    /// ```
    /// use llrb_collections::LlrbMap;
    ///
    /// let mut m = LlrbMap::new();
    /// assert_eq!(m.insert(8, 93), None);
    /// assert_eq!(m.insert(8, 100), Some(93));
    /// assert_eq!(m.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, val: V) -> Option<V> {
        match self.tree.insert(key, val) {
            Inserted::Created => None,
            Inserted::Absorbed(old) => old,
        }
    }

    /// Removes `key` and returns its value.  Removing an absent key is a
    /// no-op that returns `None`.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key).map(|removed| removed.into_item())
    }

    /// Tests if the map holds an entry for `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains(key)
    }

    /// Returns the value stored under `key`, or [`Error::KeyNotFound`].
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree
            .find(key)
            .map(|n| &n.val.0)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns the stored key and its value, if `key` is present.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key).map(|n| (&n.key, &n.val.0))
    }

    /// Verifies the red-black invariants and the cached length.
    pub fn check(&self) -> std::result::Result<(), Violation> {
        self.tree.check()
    }
}

impl<K: Display, V: Display> LlrbMap<K, V> {
    /// Writes the map's entries, in key order, to stdout.
    pub fn print(&self) {
        println!("{}", self);
    }
}

impl<K, V> Default for LlrbMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, V: Debug> Debug for LlrbMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("LlrbMap({:?})", self.tree))
    }
}

impl<K: Display, V: Display> Display for LlrbMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Keys    Values")?;
        for (k, v) in self.iter() {
            writeln!(f, "<{}>     <{}>", k, v)?;
        }
        Ok(())
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for LlrbMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for LlrbMap<K, V> {}

impl<K, Q, V> std::ops::Index<&Q> for LlrbMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Output = V;

    fn index(&self, index: &Q) -> &Self::Output {
        match self.get(index) {
            Ok(v) => v,
            Err(_) => panic!("Key not found in LlrbMap"),
        }
    }
}

impl<K: Ord, V> Extend<(K, V)> for LlrbMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for LlrbMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut m = LlrbMap::new();
        m.extend(iter);
        m
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for LlrbMap<K, V> {
    fn from(vs: [(K, V); N]) -> Self {
        LlrbMap::from_iter(vs)
    }
}

impl<'a, K, V> IntoIterator for &'a LlrbMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over the entries of an [`LlrbMap`].
pub struct Iter<'a, K, V> {
    inner: super::Iter<'a, K, Single<V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, &v.0))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}
