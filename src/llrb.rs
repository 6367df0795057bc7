#![warn(missing_docs)]
//! The left-leaning red-black node store shared by [`LlrbMap`], [`LlrbSet`]
//! and [`LlrbMultimap`].
//!
//! Links are uniquely owned (`Option<Box<Node>>`).  Every recursive step
//! consumes the subtree it works on and hands back the (possibly re-rooted)
//! replacement, so rotations only move boxes around and never copy or alias
//! a subtree.
//!
//! What a node carries next to its key is abstracted by [`Payload`]: maps and
//! sets keep exactly one value per key, multimaps keep a FIFO queue of them.
//! The balancing code does not care which.
//!
//! [`LlrbMap`]: llrb_map::LlrbMap
//! [`LlrbSet`]: llrb_set::LlrbSet
//! [`LlrbMultimap`]: llrb_multimap::LlrbMultimap

use std::borrow::Borrow;
use std::cmp::Ordering::*;
use std::collections::VecDeque;
use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;
use std::mem::replace;

use crate::error::{Error, Violation};

pub mod llrb_map;
pub mod llrb_multimap;
pub mod llrb_set;

pub(crate) type OptNode<K, S> = Option<Box<Node<K, S>>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// What a node stores alongside its key.
pub(crate) trait Payload: Sized {
    type Item;

    fn seed(item: Self::Item) -> Self;

    /// Folds `item` into the payload of an existing key and returns whatever
    /// it displaced.
    fn absorb(&mut self, item: Self::Item) -> Option<Self::Item>;

    /// Takes one item out while the node stays, or `None` if removing an item
    /// must unlink the node.
    fn detach(&mut self) -> Option<Self::Item>;

    fn into_item(self) -> Self::Item;
}

/// Exactly one value per key; re-insertion replaces it.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Single<V>(pub(crate) V);

impl<V> Payload for Single<V> {
    type Item = V;

    fn seed(item: V) -> Self {
        Single(item)
    }

    fn absorb(&mut self, item: V) -> Option<V> {
        Some(replace(&mut self.0, item))
    }

    fn detach(&mut self) -> Option<V> {
        None
    }

    fn into_item(self) -> V {
        self.0
    }
}

impl<V: Debug> Debug for Single<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// values are kept in insertion order; the front is the one `get` returns and
// `remove` drops
impl<V> Payload for VecDeque<V> {
    type Item = V;

    fn seed(item: V) -> Self {
        VecDeque::from([item])
    }

    fn absorb(&mut self, item: V) -> Option<V> {
        self.push_back(item);
        None
    }

    fn detach(&mut self) -> Option<V> {
        if self.len() > 1 {
            self.pop_front()
        } else {
            None
        }
    }

    fn into_item(mut self) -> V {
        self.pop_front()
            .expect("a multimap key always holds at least one value")
    }
}

pub(crate) enum Inserted<T> {
    /// A new red leaf was linked in.
    Created,
    /// The key existed; carries whatever its payload displaced.
    Absorbed(Option<T>),
}

pub(crate) enum Removed<K, T> {
    /// One item left the payload; the node is still in the tree.
    Detached(T),
    /// The node left the tree.
    Unlinked(K, T),
}

impl<K, T> Removed<K, T> {
    pub(crate) fn into_item(self) -> T {
        match self {
            Removed::Detached(item) => item,
            Removed::Unlinked(_, item) => item,
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node<K, S> {
    pub(crate) key: K,
    pub(crate) val: S,
    color: Color,
    pub(crate) left: OptNode<K, S>,
    pub(crate) right: OptNode<K, S>,
}

impl<K, S> Node<K, S> {
    fn new_red(key: K, val: S) -> Box<Self> {
        Box::new(Node {
            key,
            val,
            color: Color::Red,
            left: None,
            right: None,
        })
    }

    fn for_each<'a, F>(&'a self, g: &mut F)
    where
        F: FnMut(&'a K, &'a S),
    {
        if let Some(l) = self.left.as_deref() {
            l.for_each(g);
        }

        g(&self.key, &self.val);

        if let Some(r) = self.right.as_deref() {
            r.for_each(g);
        }
    }
}

impl<K: Debug, S: Debug> Debug for Node<K, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let color = match self.color {
            Color::Red => 'R',
            Color::Black => 'B',
        };
        f.write_fmt(format_args!("({} {{{:?}: {:?}}} ", color, self.key, self.val))?;

        match &self.left {
            None => f.write_str(".")?,
            Some(l) => l.fmt(f)?,
        }

        f.write_str(" ")?;

        match &self.right {
            None => f.write_str(".")?,
            Some(r) => r.fmt(f)?,
        }

        f.write_str(")")
    }
}

// A null link is black.
fn is_red<K, S>(node: &OptNode<K, S>) -> bool {
    matches!(node.as_deref(), Some(n) if n.color == Color::Red)
}

fn is_red_left_left<K, S>(n: &Node<K, S>) -> bool {
    n.left.as_deref().is_some_and(|l| is_red(&l.left))
}

fn is_red_right_left<K, S>(n: &Node<K, S>) -> bool {
    n.right.as_deref().is_some_and(|r| is_red(&r.left))
}

// prerequisite: n has both children
fn flip_colors<K, S>(n: &mut Node<K, S>) {
    n.color = n.color.flipped();

    let l = n.left.as_deref_mut().expect("flip_colors without a left child");
    l.color = l.color.flipped();

    let r = n.right.as_deref_mut().expect("flip_colors without a right child");
    r.color = r.color.flipped();
}

fn rot_lf<K, S>(mut a: Box<Node<K, S>>) -> Box<Node<K, S>> {
    // We want the following transformation:
    //    a(x, b(y, z))   =>   b(a(x, y), z)
    // x and z retain the same parents.  b takes over a's color and a turns
    // red.

    let mut b = a.right.take().expect("rot_lf without a right child");

    // move y from b to a
    a.right = b.left.take();

    b.color = a.color;
    a.color = Color::Red;

    // make a be b's left child
    b.left = Some(a);
    b
}

fn rot_rt<K, S>(mut a: Box<Node<K, S>>) -> Box<Node<K, S>> {
    // We want the following transformation:
    //    a(b(x, y), z)   =>   b(x, a(y, z))
    // x and z retain the same parents.

    let mut b = a.left.take().expect("rot_rt without a left child");

    // move y from b to a
    a.left = b.right.take();

    b.color = a.color;
    a.color = Color::Red;

    // make a be b's right child
    b.right = Some(a);
    b
}

// Restores the left-leaning invariants on the way back up.  The three steps
// must run in this order to produce the canonical shape.
fn fix_up<K, S>(mut n: Box<Node<K, S>>) -> Box<Node<K, S>> {
    if is_red(&n.right) && !is_red(&n.left) {
        n = rot_lf(n);
    }

    if is_red(&n.left) && is_red_left_left(&n) {
        n = rot_rt(n);
    }

    if is_red(&n.left) && is_red(&n.right) {
        flip_colors(&mut n);
    }

    n
}

// Makes n.left or one of its children red by borrowing from the right.
fn move_red_left<K, S>(mut n: Box<Node<K, S>>) -> Box<Node<K, S>> {
    flip_colors(&mut n);

    if is_red_right_left(&n) {
        let r = n.right.take().expect("checked by is_red_right_left");
        n.right = Some(rot_rt(r));
        n = rot_lf(n);
        flip_colors(&mut n);
    }

    n
}

// Mirror of move_red_left.
fn move_red_right<K, S>(mut n: Box<Node<K, S>>) -> Box<Node<K, S>> {
    flip_colors(&mut n);

    if is_red_left_left(&n) {
        n = rot_rt(n);
        flip_colors(&mut n);
    }

    n
}

// Inserts key into the subtree rooted at node and returns the new root of the
// subtree along with what happened to the key.
fn ins<K, S>(
    node: OptNode<K, S>,
    key: K,
    item: S::Item,
) -> (Box<Node<K, S>>, Inserted<S::Item>)
where
    K: Ord,
    S: Payload,
{
    let mut n = match node {
        None => {
            return (Node::new_red(key, S::seed(item)), Inserted::Created); // *** EARLY RETURN ***
        }
        Some(n) => n,
    };

    let outcome = match key.cmp(&n.key) {
        Less => {
            let (l, outcome) = ins(n.left.take(), key, item);
            n.left = Some(l);
            outcome
        }

        Greater => {
            let (r, outcome) = ins(n.right.take(), key, item);
            n.right = Some(r);
            outcome
        }

        Equal => Inserted::Absorbed(n.val.absorb(item)),
    };

    (fix_up(n), outcome)
}

// Unlinks the leftmost node of the subtree and returns the new subtree root
// along with the unlinked node.
fn delete_min<K, S>(mut n: Box<Node<K, S>>) -> (OptNode<K, S>, Box<Node<K, S>>) {
    if n.left.is_none() {
        // n is the minimum; in a valid tree it has no right child either
        let right = n.right.take();
        return (right, n);
    }

    if !is_red(&n.left) && !is_red_left_left(&n) {
        n = move_red_left(n);
    }

    let l = n.left.take().expect("left child survives move_red_left");
    let (l, min) = delete_min(l);
    n.left = l;

    (Some(fix_up(n)), min)
}

// Removes one item stored under key from the subtree rooted at n.  Red links
// are pushed down ahead of the search so the search never ends on a lone
// black node.
//
// prerequisite: key is in the subtree
fn rm<K, S, Q>(
    mut n: Box<Node<K, S>>,
    key: &Q,
) -> (OptNode<K, S>, Option<Removed<K, S::Item>>)
where
    K: Borrow<Q> + Ord,
    S: Payload,
    Q: Ord + ?Sized,
{
    if key < n.key.borrow() {
        if n.left.is_none() {
            return (Some(n), None); // *** EARLY RETURN ***
        }

        if !is_red(&n.left) && !is_red_left_left(&n) {
            n = move_red_left(n);
        }

        let l = n.left.take().expect("left child survives move_red_left");
        let (l, removed) = rm(l, key);
        n.left = l;
        return (Some(fix_up(n)), removed);
    }

    if is_red(&n.left) {
        n = rot_rt(n);
    }

    if key == n.key.borrow() && n.right.is_none() {
        // n is a leaf
        return match n.val.detach() {
            Some(item) => (Some(n), Some(Removed::Detached(item))),
            None => {
                let Node { key, val, .. } = *n;
                (None, Some(Removed::Unlinked(key, val.into_item())))
            }
        };
    }

    if n.right.is_none() {
        return (Some(n), None); // *** EARLY RETURN ***
    }

    if !is_red(&n.right) && !is_red_right_left(&n) {
        n = move_red_right(n);
    }

    let removed = if key == n.key.borrow() {
        match n.val.detach() {
            Some(item) => Some(Removed::Detached(item)),
            None => {
                // replace n's entry with its in-order successor's, then drop
                // the successor's node
                let r = n.right.take().expect("right child survives move_red_right");
                let (r, succ) = delete_min(r);
                n.right = r;

                let Node { key: succ_key, val: succ_val, .. } = *succ;
                let old_key = replace(&mut n.key, succ_key);
                let old_val = replace(&mut n.val, succ_val);
                Some(Removed::Unlinked(old_key, old_val.into_item()))
            }
        }
    } else {
        let r = n.right.take().expect("right child survives move_red_right");
        let (r, removed) = rm(r, key);
        n.right = r;
        removed
    };

    (Some(fix_up(n)), removed)
}

fn height<K, S>(node: &OptNode<K, S>) -> usize {
    node.as_deref()
        .map_or(0, |n| 1 + height(&n.left).max(height(&n.right)))
}

// Walks the subtree, verifying order against the (exclusive) bounds inherited
// from its ancestors.  Returns the node count and the black height.
fn chk<'a, K: Ord, S>(
    node: &'a OptNode<K, S>,
    lo: Option<&'a K>,
    hi: Option<&'a K>,
) -> Result<(usize, usize), Violation> {
    let n = match node.as_deref() {
        None => return Ok((0, 1)),
        Some(n) => n,
    };

    if lo.is_some_and(|lo| lo >= &n.key) || hi.is_some_and(|hi| hi <= &n.key) {
        return Err(Violation::Unordered);
    }

    if is_red(&n.right) {
        return Err(Violation::RedRightLink);
    }

    if n.color == Color::Red && is_red(&n.left) {
        return Err(Violation::ConsecutiveReds);
    }

    let (lf_len, lf_ht) = chk(&n.left, lo, Some(&n.key))?;
    let (rt_len, rt_ht) = chk(&n.right, Some(&n.key), hi)?;
    if lf_ht != rt_ht {
        return Err(Violation::BlackHeight {
            left: lf_ht,
            right: rt_ht,
        });
    }

    let own = (n.color == Color::Black) as usize;
    Ok((lf_len + rt_len + 1, lf_ht + own))
}

/// The tree proper: a root link and the count of keys below it.
#[derive(Clone)]
pub(crate) struct Tree<K, S> {
    len: usize,
    root: OptNode<K, S>,
}

impl<K, S> Tree<K, S> {
    pub(crate) fn new() -> Self {
        Tree { len: 0, root: None }
    }

    pub(crate) fn clear(&mut self) {
        self.len = 0;
        self.root = None;
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn height(&self) -> usize {
        height(&self.root)
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, S> {
        let mut work = Vec::new();
        let mut curr = self.root.as_deref();
        while let Some(n) = curr {
            work.push(n);
            curr = n.left.as_deref();
        }

        Iter {
            work,
            len: self.len,
        }
    }

    pub(crate) fn for_each<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a K, &'a S),
    {
        if let Some(n) = self.root.as_deref() {
            n.for_each(&mut f);
        }
    }

    pub(crate) fn min(&self) -> Result<&K, Error> {
        let mut n = self.root.as_deref().ok_or(Error::EmptyTree)?;
        while let Some(l) = n.left.as_deref() {
            n = l;
        }
        Ok(&n.key)
    }

    pub(crate) fn max(&self) -> Result<&K, Error> {
        let mut n = self.root.as_deref().ok_or(Error::EmptyTree)?;
        while let Some(r) = n.right.as_deref() {
            n = r;
        }
        Ok(&n.key)
    }
}

impl<K: Ord, S: Payload> Tree<K, S> {
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<&Node<K, S>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut curr = self.root.as_deref();
        while let Some(n) = curr {
            match key.cmp(n.key.borrow()) {
                Less => curr = n.left.as_deref(),
                Equal => return Some(n),
                Greater => curr = n.right.as_deref(),
            }
        }

        None
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    pub(crate) fn insert(&mut self, key: K, item: S::Item) -> Inserted<S::Item> {
        let (mut root, outcome) = ins(self.root.take(), key, item);
        root.color = Color::Black;
        self.root = Some(root);

        if let Inserted::Created = outcome {
            self.len += 1;
        }

        outcome
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<Removed<K, S::Item>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        // an absent key must leave the shape untouched, and rm relies on the
        // key being present
        if !self.contains(key) {
            return None;
        }

        let root = self.root.take()?;
        let (root, removed) = rm(root, key);
        self.root = root;
        if let Some(r) = self.root.as_deref_mut() {
            r.color = Color::Black;
        }

        if let Some(Removed::Unlinked(..)) = removed {
            self.len -= 1;
        }

        removed
    }
}

impl<K: Ord, S> Tree<K, S> {
    pub(crate) fn check(&self) -> Result<(), Violation> {
        if is_red(&self.root) {
            return Err(Violation::RedRoot);
        }

        let (actual, _) = chk(&self.root, None, None)?;
        if actual != self.len {
            return Err(Violation::LenMismatch {
                cached: self.len,
                actual,
            });
        }

        Ok(())
    }
}

impl<K: Debug, S: Debug> Debug for Tree<K, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.root.as_deref() {
            None => f.write_str("EMPTY"),
            Some(n) => f.write_fmt(format_args!("#{}, {:?}", self.len, n)),
        }
    }
}

/// In-order traversal over the nodes of a tree.
pub(crate) struct Iter<'a, K, S> {
    work: Vec<&'a Node<K, S>>,
    len: usize,
}

impl<'a, K, S> Iterator for Iter<'a, K, S> {
    type Item = (&'a K, &'a S);

    fn next(&mut self) -> Option<Self::Item> {
        self.work.pop().map(|n| {
            self.len -= 1;
            let entry = (&n.key, &n.val);
            let mut curr = n.right.as_deref();
            while let Some(m) = curr {
                self.work.push(m);
                curr = m.left.as_deref();
            }
            entry
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, S> ExactSizeIterator for Iter<'a, K, S> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, K, S> FusedIterator for Iter<'a, K, S> {}
