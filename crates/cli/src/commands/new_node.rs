//! `promptree new` — Create a child node under a parent directory.

use promptree_core::node::{ConversationNode, REQUEST_ARTIFACT};
use std::path::PathBuf;

pub fn run(parent: PathBuf, descriptor: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !parent.is_dir() {
        return Err(format!("parent is not a directory: {}", parent.display()).into());
    }

    // No request artifact is seeded: writing one would trigger a running
    // watcher on an empty document.
    let child = ConversationNode::new(&parent).create_child(descriptor)?;

    println!("Created {}", child.dir().display());
    println!("Write a {REQUEST_ARTIFACT} there to start this branch.");
    Ok(())
}
