//! Conversation node — a directory in the conversation tree.
//!
//! Each directory under the watched root is one conversational turn. A node
//! holds at most one request artifact (the prompt document written by the
//! user) and one reply artifact (the model's raw answer). Branching the
//! conversation means creating a child directory.
//!
//! A node's identity is its directory path and never changes; nodes are
//! discovered dynamically as the tree grows.

use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Default filename of the request artifact (the prompt document).
pub const REQUEST_ARTIFACT: &str = "prompt.txt";
/// Default filename of the reply artifact (the raw model answer).
pub const REPLY_ARTIFACT: &str = "response.txt";
/// Filename of the conversation summary written by `summarize`.
pub const SUMMARY_ARTIFACT: &str = "summary.txt";
/// Filename of the per-node processing metrics.
pub const METRICS_ARTIFACT: &str = "metrics.json";

/// The per-node artifact filenames, configurable at the tree level.
#[derive(Debug, Clone)]
pub struct ArtifactNames {
    pub request: String,
    pub reply: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            request: REQUEST_ARTIFACT.into(),
            reply: REPLY_ARTIFACT.into(),
        }
    }
}

/// A node in the conversation tree, identified by its directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationNode {
    dir: PathBuf,
}

impl ConversationNode {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The node's directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the request artifact inside this node.
    pub fn request_path(&self, names: &ArtifactNames) -> PathBuf {
        self.dir.join(&names.request)
    }

    /// Path of the reply artifact inside this node.
    pub fn reply_path(&self, names: &ArtifactNames) -> PathBuf {
        self.dir.join(&names.reply)
    }

    /// The chain of nodes from the tree root down to this node, inclusive.
    ///
    /// Walks parent directories until `root` is reached (included once, at
    /// position zero) or until the filesystem root cuts the walk short,
    /// whichever comes first. The result is strictly root-to-leaf ordered.
    pub fn ancestry(&self, root: &Path) -> Vec<ConversationNode> {
        let mut chain = Vec::new();
        let mut current: &Path = &self.dir;
        loop {
            chain.push(ConversationNode::new(current));
            if current == root {
                break;
            }
            match current.parent() {
                Some(parent) => current = parent,
                // Hit the filesystem root without passing the tree root.
                None => break,
            }
        }
        chain.reverse();
        chain
    }

    /// Create a child node directory named `<sanitized-descriptor>_<uuid>`.
    pub fn create_child(&self, descriptor: &str) -> io::Result<ConversationNode> {
        let dir_name = format!("{}_{}", sanitize_descriptor(descriptor), Uuid::new_v4());
        let child = self.dir.join(dir_name);
        std::fs::create_dir(&child)?;
        Ok(ConversationNode::new(child))
    }
}

/// Replace characters that would break a directory name.
fn sanitize_descriptor(descriptor: &str) -> String {
    descriptor
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect()
}
