//! A sorted map from each key to an ordered sequence of values.

use std::borrow::Borrow;
use std::collections::VecDeque;
use std::fmt::{Debug, Display, Formatter};
use std::iter::FusedIterator;

use super::{Removed, Tree};
use crate::error::{Error, Result, Violation};

/// A sorted multimap: every key owns a non-empty queue of values.
///
/// Inserting under an existing key appends to that key's queue without
/// touching the tree's shape.  [`get`](#method.get) returns the oldest value
/// and [`remove`](#method.remove) drops it, so a key behaves as a FIFO.  The
/// node disappears once its last value is removed.
///
/// # Examples
/// ```
/// use llrb_collections::LlrbMultimap;
///
/// let mut m = LlrbMultimap::new();
/// m.insert(8, 93);
/// m.insert(8, 100);
/// assert_eq!(m.len(), 1);
/// assert_eq!(m.get(&8), Ok(&93));
///
/// assert_eq!(m.remove(&8), Some(93));
/// assert_eq!(m.get(&8), Ok(&100));
/// ```
#[derive(Clone)]
pub struct LlrbMultimap<K, V> {
    tree: Tree<K, VecDeque<V>>,
    values: usize,
}

impl<K, V> LlrbMultimap<K, V> {
    /// Creates a new, empty multimap.
    pub fn new() -> Self {
        LlrbMultimap {
            tree: Tree::new(),
            values: 0,
        }
    }

    /// Drops all keys and values.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.values = 0;
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns the number of values across all keys.
    pub fn value_count(&self) -> usize {
        self.values
    }

    /// Returns true if the multimap holds no keys.
    pub fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    /// Returns the height of the underlying tree.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns the least key, or [`Error::EmptyTree`].
    pub fn min(&self) -> Result<&K> {
        self.tree.min()
    }

    /// Returns the greatest key, or [`Error::EmptyTree`].
    pub fn max(&self) -> Result<&K> {
        self.tree.max()
    }

    /// Iterates over each key and its queue of values, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    /// Returns an iterator over the distinct keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }
}

impl<K: Ord, V> LlrbMultimap<K, V> {
    /// Appends `val` to the values of `key`, creating the key if needed.
    pub fn insert(&mut self, key: K, val: V) {
        self.tree.insert(key, val);
        self.values += 1;
    }

    /// Removes the oldest value stored under `key` and returns it.  The key
    /// itself goes away with its last value.  Removing an absent key is a
    /// no-op that returns `None`.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let removed = self.tree.remove(key)?;
        self.values -= 1;
        Some(removed.into_item())
    }

    /// Removes `key` with all of its values, returning how many values went
    /// with it.
    pub fn remove_all<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut n = 0;
        while let Some(removed) = self.tree.remove(key) {
            n += 1;
            if let Removed::Unlinked(..) = removed {
                break;
            }
        }
        self.values -= n;
        n
    }

    /// Tests if the multimap holds `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains(key)
    }

    /// Returns the oldest value stored under `key`, or
    /// [`Error::KeyNotFound`].
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree
            .find(key)
            .and_then(|n| n.val.front())
            .ok_or(Error::KeyNotFound)
    }

    /// Returns every value stored under `key`, oldest first.
    pub fn get_all<Q>(&self, key: &Q) -> Result<&VecDeque<V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree
            .find(key)
            .map(|n| &n.val)
            .ok_or(Error::KeyNotFound)
    }

    /// Verifies the red-black invariants, that no key is left without values,
    /// and the cached counts.
    pub fn check(&self) -> std::result::Result<(), Violation> {
        self.tree.check()?;

        let mut actual = 0;
        for (_, vals) in self.tree.iter() {
            if vals.is_empty() {
                return Err(Violation::EmptyValues);
            }
            actual += vals.len();
        }

        if actual != self.values {
            return Err(Violation::LenMismatch {
                cached: self.values,
                actual,
            });
        }

        Ok(())
    }
}

impl<K: Display, V: Display> LlrbMultimap<K, V> {
    /// Writes every key and its values, in key order, to stdout.
    pub fn print(&self) {
        println!("{}", self);
    }
}

impl<K, V> Default for LlrbMultimap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, V: Debug> Debug for LlrbMultimap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("LlrbMultimap({:?})", self.tree))
    }
}

impl<K: Display, V: Display> Display for LlrbMultimap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Keys    Values")?;
        for (k, vals) in self.iter() {
            write!(f, "<{}>    ", k)?;
            for v in vals {
                write!(f, " <{}>", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<K: Ord, V> Extend<(K, V)> for LlrbMultimap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for LlrbMultimap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut m = LlrbMultimap::new();
        m.extend(iter);
        m
    }
}

impl<'a, K, V> IntoIterator for &'a LlrbMultimap<K, V> {
    type Item = (&'a K, &'a VecDeque<V>);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over the keys of an [`LlrbMultimap`] and their values.
pub struct Iter<'a, K, V> {
    inner: super::Iter<'a, K, VecDeque<V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a VecDeque<V>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
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

#[cfg(test)]
mod test {
    extern crate quickcheck;
    use super::*;
    use quickcheck::quickcheck;
    use std::collections::BTreeMap;

    // model: a BTreeMap of VecDeques with empty queues pruned
    fn cmp_with_model(ops: Vec<(bool, u8, u16)>) {
        let mut m = LlrbMultimap::new();
        let mut model: BTreeMap<u8, VecDeque<u16>> = BTreeMap::new();

        for (is_insert, k, v) in ops {
            let k = k % 16;
            if is_insert {
                m.insert(k, v);
                model.entry(k).or_default().push_back(v);
            } else {
                let expected = model.get_mut(&k).and_then(|q| q.pop_front());
                if model.get(&k).is_some_and(|q| q.is_empty()) {
                    model.remove(&k);
                }
                assert_eq!(m.remove(&k), expected);
            }

            m.check().unwrap();
            assert_eq!(m.len(), model.len());
            assert!(m.iter().eq(model.iter()));
        }
    }

    #[test]
    fn fifo_within_a_key() {
        let mut m = LlrbMultimap::new();
        m.insert(8, "v1");
        m.insert(8, "v2");

        assert_eq!(m.get(&8), Ok(&"v1"));
        assert_eq!(m.remove(&8), Some("v1"));
        assert_eq!(m.get(&8), Ok(&"v2"));
        assert_eq!(m.remove(&8), Some("v2"));
        assert_eq!(m.get(&8), Err(Error::KeyNotFound));
        assert!(m.is_empty());
    }

    #[test]
    fn append_keeps_shape_and_len() {
        let keys = 1..=9;
        let vals = [2, 18, 42, 43, 51, 54, 74, 93, 99];
        let mut m: LlrbMultimap<_, _> = keys.clone().zip(vals).collect();
        let shape: Vec<_> = format!("{:?}", m)
            .chars()
            .filter(|c| *c == 'R' || *c == 'B')
            .collect();

        m.insert(8, 100);
        assert_eq!(m.len(), 9);
        assert_eq!(m.value_count(), 10);
        assert_eq!(m.get(&8), Ok(&93));
        let shape2: Vec<_> = format!("{:?}", m)
            .chars()
            .filter(|c| *c == 'R' || *c == 'B')
            .collect();
        assert_eq!(shape, shape2);

        // a second round of values for every key, then three rounds of removal
        m.extend(keys.clone().zip([5, 6, 7, 8, 12, 39, -49, 19, -2]));
        for round in 0..3 {
            for k in [4, 9, 1, 7, 3, 8, 2, 6, 5] {
                m.remove(&k);
                m.check().unwrap();
            }
            if round == 0 {
                assert_eq!(m.get(&8), Ok(&100));
            }
        }

        // key 8 carried three values; everything else is gone
        assert_eq!(m.len(), 0);
        assert_eq!(m.value_count(), 0);
    }

    #[test]
    fn remove_all_drops_every_value() {
        let mut m: LlrbMultimap<_, _> =
            [(1, 'a'), (2, 'b'), (1, 'c'), (1, 'd')].into_iter().collect();

        assert_eq!(m.remove_all(&1), 3);
        assert_eq!(m.remove_all(&1), 0);
        assert_eq!(m.value_count(), 1);
        assert!(m.keys().copied().eq([2]));
        m.check().unwrap();
    }

    #[test]
    fn display_lists_values_in_order() {
        let m: LlrbMultimap<_, _> = [(2, 5), (1, 3), (2, 7)].into_iter().collect();
        assert_eq!(m.to_string(), "Keys    Values\n<1>     <3>\n<2>     <5> <7>\n");
    }

    #[test]
    fn empty_multimap_signals() {
        let mut m: LlrbMultimap<u32, u32> = LlrbMultimap::new();
        assert_eq!(m.min(), Err(Error::EmptyTree));
        assert_eq!(m.max(), Err(Error::EmptyTree));
        assert_eq!(m.get(&5), Err(Error::KeyNotFound));
        assert_eq!(m.remove(&5), None);
    }

    quickcheck! {
        fn qc_cmp_with_model(ops: Vec<(bool, u8, u16)>) -> () {
            cmp_with_model(ops);
        }
    }
}
