use thiserror::Error;

/// Failures reported by container queries and inserts.
///
/// A failed call never leaves a partial mutation behind; the container is
/// unchanged and safe to keep using.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `min`/`max` on a container with no entries.
    #[error("tree is empty")]
    EmptyTree,

    /// `get` on a key that is not present.
    #[error("key not found")]
    KeyNotFound,

    /// `insert` of a key that a set already holds.
    #[error("key already exists")]
    DuplicateKey,
}

/// A broken red-black invariant, as reported by the `check` methods.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A key is not strictly between the keys of its ancestors.
    #[error("keys out of order")]
    Unordered,

    /// A node has a red right child.
    #[error("red link leans right")]
    RedRightLink,

    /// A red node has a red child.
    #[error("two consecutive red links")]
    ConsecutiveReds,

    /// The two subtrees of a node have different black heights.
    #[error("unbalanced black heights: left {left}, right {right}")]
    BlackHeight { left: usize, right: usize },

    /// The root is red after an operation completed.
    #[error("root is red")]
    RedRoot,

    /// A multimap key with no values.
    #[error("key holds no values")]
    EmptyValues,

    /// The cached length disagrees with the number of nodes.
    #[error("cached length {cached} but tree holds {actual} keys")]
    LenMismatch { cached: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
