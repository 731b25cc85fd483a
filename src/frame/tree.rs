//! In-memory frame topology.
//!
//! A `FrameTree` is an explicit, finite, rooted tree of named frames, each
//! served from an origin. `StaticFrame` handles into it implement `FrameRef`,
//! which makes the tree usable both as a test double and as the frame model
//! behind `MemoryTransport`.

use super::FrameRef;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct FrameNode {
    name: String,
    origin: String,
    parent: Option<usize>,
}

/// Builds a `FrameTree` top-down, starting from the top-level frame.
#[derive(Debug, Clone)]
pub struct FrameTreeBuilder {
    nodes: Vec<FrameNode>,
}

impl FrameTreeBuilder {
    /// Start a tree whose top-level frame is `name`, served from `origin`.
    pub fn new(name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            nodes: vec![FrameNode {
                name: name.into(),
                origin: origin.into(),
                parent: None,
            }],
        }
    }

    /// Index of the top-level frame.
    pub fn root(&self) -> usize {
        0
    }

    /// Add a frame nested inside `parent` and return its index.
    ///
    /// Returns `None`, adding nothing, if `parent` is not a frame of this tree.
    pub fn child(
        &mut self,
        parent: usize,
        name: impl Into<String>,
        origin: impl Into<String>,
    ) -> Option<usize> {
        if parent >= self.nodes.len() {
            return None;
        }
        self.nodes.push(FrameNode {
            name: name.into(),
            origin: origin.into(),
            parent: Some(parent),
        });
        Some(self.nodes.len() - 1)
    }

    pub fn build(self) -> Arc<FrameTree> {
        Arc::new(FrameTree { nodes: self.nodes })
    }
}

/// Immutable frame topology.
#[derive(Debug)]
pub struct FrameTree {
    nodes: Vec<FrameNode>,
}

impl FrameTree {
    /// Linear nesting: the first entry is the top-level frame, each following
    /// entry is nested in the previous one.
    pub fn nested(frames: &[(&str, &str)]) -> Arc<FrameTree> {
        let mut iter = frames.iter();
        let (name, origin) = iter.next().copied().unwrap_or(("top", "null"));
        let mut builder = FrameTreeBuilder::new(name, origin);
        let mut parent = builder.root();
        for (name, origin) in iter {
            if let Some(index) = builder.child(parent, *name, *origin) {
                parent = index;
            }
        }
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn frame(self: &Arc<Self>, index: usize) -> Option<StaticFrame> {
        (index < self.nodes.len()).then(|| StaticFrame {
            tree: Arc::clone(self),
            index,
        })
    }

    pub fn find(self: &Arc<Self>, name: &str) -> Option<StaticFrame> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .and_then(|index| self.frame(index))
    }

    /// Most recently added frame; for `nested` trees, the innermost one.
    pub fn innermost(self: &Arc<Self>) -> StaticFrame {
        StaticFrame {
            tree: Arc::clone(self),
            index: self.nodes.len().saturating_sub(1),
        }
    }
}

/// Handle to one frame of a `FrameTree`.
#[derive(Clone)]
pub struct StaticFrame {
    tree: Arc<FrameTree>,
    index: usize,
}

impl StaticFrame {
    fn node(&self) -> &FrameNode {
        &self.tree.nodes[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.node().name
    }

    pub fn origin(&self) -> &str {
        &self.node().origin
    }
}

impl FrameRef for StaticFrame {
    fn parent(&self) -> Option<Self> {
        self.node().parent.map(|index| StaticFrame {
            tree: Arc::clone(&self.tree),
            index,
        })
    }

    fn top(&self) -> Self {
        // Builders only ever nest under existing frames, so index 0 is the root
        // of every frame in the tree.
        StaticFrame {
            tree: Arc::clone(&self.tree),
            index: 0,
        }
    }
}

impl PartialEq for StaticFrame {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tree, &other.tree) && self.index == other.index
    }
}

impl Eq for StaticFrame {}

impl Hash for StaticFrame {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.tree) as usize).hash(state);
        self.index.hash(state);
    }
}

impl fmt::Debug for StaticFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticFrame")
            .field("name", &self.name())
            .field("origin", &self.origin())
            .finish()
    }
}

impl fmt::Display for StaticFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.origin())
    }
}
