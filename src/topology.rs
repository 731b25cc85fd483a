//! Simulated frame topologies.
//!
//! A topology file describes a tree of frames, which origin each is served
//! from, and which of them answer `requestConfig`:
//!
//! ```toml
//! client = "sidebar"
//!
//! [[frames]]
//! name = "lms"
//! origin = "https://lms.example"
//! config = { services = [{ apiUrl = "https://lms.example/api/", grantToken = "t" }] }
//!
//! [[frames]]
//! name = "sidebar"
//! parent = "lms"
//! origin = "https://client.example"
//! ```

use crate::error::ClientError;
use crate::frame::{FrameTree, FrameTreeBuilder, StaticFrame};
use crate::merge::ConfigMap;
use crate::rpc::MemoryTransport;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Parsed topology file
#[derive(Debug, Clone, Deserialize)]
pub struct TopologySpec {
    /// Name of the frame the client runs in
    pub client: String,

    #[serde(default)]
    pub frames: Vec<FrameSpec>,
}

/// One frame of a topology file
#[derive(Debug, Clone, Deserialize)]
pub struct FrameSpec {
    pub name: String,

    /// Enclosing frame; absent for the top-level frame
    #[serde(default)]
    pub parent: Option<String>,

    pub origin: String,

    /// Configuration this frame answers `requestConfig` with; absent means it never answers
    #[serde(default)]
    pub config: Option<ConfigMap>,

    /// Response delay in milliseconds
    #[serde(default)]
    pub delay_ms: u64,
}

/// A built topology: the frame tree, a transport serving it, and the client frame.
pub struct Topology {
    pub tree: Arc<FrameTree>,
    pub transport: Arc<MemoryTransport>,
    pub client: StaticFrame,
}

impl TopologySpec {
    pub fn load(path: &Path) -> Result<Self, ClientError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
            .map_err(|e| ClientError::Topology(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(contents: &str) -> Result<Self, ClientError> {
        toml::from_str(contents).map_err(|e| ClientError::Topology(e.to_string()))
    }

    /// Check names, parents and the client reference.
    pub fn validate(&self) -> Result<(), ClientError> {
        let mut names = HashSet::new();
        for frame in &self.frames {
            if !names.insert(frame.name.as_str()) {
                return Err(ClientError::Topology(format!(
                    "Duplicate frame name '{}'",
                    frame.name
                )));
            }
        }

        let roots: Vec<&str> = self
            .frames
            .iter()
            .filter(|frame| frame.parent.is_none())
            .map(|frame| frame.name.as_str())
            .collect();
        if roots.len() != 1 {
            return Err(ClientError::Topology(format!(
                "Expected exactly one top-level frame, found {}",
                roots.len()
            )));
        }

        for frame in &self.frames {
            if let Some(parent) = &frame.parent {
                if !names.contains(parent.as_str()) {
                    return Err(ClientError::Topology(format!(
                        "Frame '{}' has unknown parent '{}'",
                        frame.name, parent
                    )));
                }
            }
        }

        if !names.contains(self.client.as_str()) {
            return Err(ClientError::Topology(format!(
                "Client frame '{}' is not defined",
                self.client
            )));
        }
        Ok(())
    }

    /// Build the frame tree and a transport that answers for frames with `config`.
    pub fn build(&self) -> Result<Topology, ClientError> {
        self.validate()?;

        let root = self
            .frames
            .iter()
            .find(|frame| frame.parent.is_none())
            .ok_or_else(|| ClientError::Topology("No top-level frame".to_string()))?;
        let mut builder = FrameTreeBuilder::new(&root.name, &root.origin);
        let mut indices: HashMap<&str, usize> = HashMap::new();
        indices.insert(root.name.as_str(), builder.root());

        // Parents may be listed after their children; attach frames level by level.
        let mut remaining: Vec<&FrameSpec> = self
            .frames
            .iter()
            .filter(|frame| frame.parent.is_some())
            .collect();
        while !remaining.is_empty() {
            let before = remaining.len();
            remaining.retain(|frame| {
                let parent = frame.parent.as_deref().unwrap_or_default();
                match indices.get(parent).copied() {
                    Some(parent_index) => {
                        match builder.child(parent_index, &frame.name, &frame.origin) {
                            Some(index) => {
                                indices.insert(frame.name.as_str(), index);
                                false
                            }
                            None => true,
                        }
                    }
                    None => true,
                }
            });
            if remaining.len() == before {
                return Err(ClientError::Topology(
                    "Frame parents form a cycle".to_string(),
                ));
            }
        }

        let tree = builder.build();
        let transport = Arc::new(MemoryTransport::new());
        for frame in &self.frames {
            if let Some(config) = &frame.config {
                let handle = tree.find(&frame.name).ok_or_else(|| {
                    ClientError::Topology(format!("Frame '{}' missing from tree", frame.name))
                })?;
                transport.serve_config(
                    &handle,
                    config.clone(),
                    Duration::from_millis(frame.delay_ms),
                );
            }
        }

        let client = tree.find(&self.client).ok_or_else(|| {
            ClientError::Topology(format!("Client frame '{}' is not defined", self.client))
        })?;

        Ok(Topology {
            tree,
            transport,
            client,
        })
    }
}
