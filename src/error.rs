//! Control-tree error types

use thiserror::Error;

/// Structural misuse of the control tree. Surfaced synchronously by the
/// mutating operation; the tree is left unchanged on error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlTreeError {
    /// The control already has a live parent (or sits at the root) and
    /// must be detached before it can be attached again
    #[error("control is already attached")]
    AlreadyAttached,

    /// The control is not a child of this parent
    #[error("control is not attached to this parent")]
    NotAttached,
}
