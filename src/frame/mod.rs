//! Browsing Context Frames
//!
//! Navigational handles for nested frames. A client may be hosted several
//! levels deep inside frames owned by other origins; the resolver only ever
//! moves upward through `parent` links towards `top`.

pub mod ancestry;
pub mod tree;

pub use ancestry::{ancestor_at_level, ancestors, lineage, MAX_ANCESTRY_DEPTH};
pub use tree::{FrameTree, FrameTreeBuilder, StaticFrame};

use std::fmt::Debug;

/// Handle to a browsing context.
///
/// Equality must identify the same browsing context: the ancestry walk stops
/// when it reaches a frame equal to `top()`.
pub trait FrameRef: Clone + PartialEq + Debug + Send + Sync {
    /// Enclosing frame, or `None` for a top-level frame.
    ///
    /// Implementations mirroring the DOM may instead return the frame itself at
    /// the root; the ancestry walk treats that as the root as well.
    fn parent(&self) -> Option<Self>;

    /// Root of this frame's ancestry chain.
    fn top(&self) -> Self;
}
