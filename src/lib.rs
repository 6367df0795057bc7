//! # Ordered collections on left-leaning red-black trees
//!
//! `llrb-collections` provides three sorted containers built on one
//! [left-leaning red-black](https://en.wikipedia.org/wiki/Left-leaning_red%E2%80%93black_tree)
//! node store:
//!
//! * [`LlrbMap`] keeps one value per key; re-inserting a key updates it.
//! * [`LlrbSet`] keeps keys only and rejects duplicates.
//! * [`LlrbMultimap`] keeps a FIFO queue of values per key.
//!
//! All three report failures through [`Error`]: `min`/`max` on an empty
//! container, `get` on an absent key, and (sets only) inserting a duplicate.
//! Removing an absent key is never an error.
//!
//! The [`sched`] module is a small consumer of the multimap: a fair-share
//! scheduling simulator that keeps runnable tasks on a timeline ordered by
//! virtual runtime.

mod error;
pub use error::{Error, Result, Violation};

mod llrb;
pub use llrb::llrb_map::LlrbMap;
pub use llrb::llrb_multimap::LlrbMultimap;
pub use llrb::llrb_set::LlrbSet;

/// Iterator types returned by the containers.
pub mod iter {
    pub use crate::llrb::llrb_map::Iter as MapIter;
    pub use crate::llrb::llrb_multimap::Iter as MultimapIter;
    pub use crate::llrb::llrb_set::SetIter;
}

pub mod sched;
