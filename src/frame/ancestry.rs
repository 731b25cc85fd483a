//! Ancestry walk: enumerate the frames above a client, or index them from the top.

use super::FrameRef;
use tracing::warn;

/// Upper bound on parent hops. Real browsers nest far less deeply; a walk that
/// hits this is following a cyclic or inconsistent frame double.
pub const MAX_ANCESTRY_DEPTH: usize = 64;

/// Frames above `frame`, nearest first: `[parent, parent.parent, ..., top]`.
///
/// Empty when `frame` is itself a top-level frame.
pub fn ancestors<F: FrameRef>(frame: &F) -> Vec<F> {
    let top = frame.top();
    let mut chain: Vec<F> = Vec::new();
    let mut current = frame.clone();

    while current != top {
        let parent = match current.parent() {
            Some(parent) if parent != current => parent,
            _ => break,
        };
        if chain.len() == MAX_ANCESTRY_DEPTH {
            warn!(
                max_depth = MAX_ANCESTRY_DEPTH,
                "Frame ancestry walk did not reach the top frame; truncating"
            );
            break;
        }
        chain.push(parent.clone());
        current = parent;
    }

    chain
}

/// Full lineage indexed from the root: `[top, ..., parent, frame]`.
pub fn lineage<F: FrameRef>(frame: &F) -> Vec<F> {
    let mut chain = ancestors(frame);
    chain.reverse();
    chain.push(frame.clone());
    chain
}

/// Frame at root-relative `level` in the lineage of `frame` (0 = top).
pub fn ancestor_at_level<F: FrameRef>(frame: &F, level: usize) -> Option<F> {
    lineage(frame).into_iter().nth(level)
}
