//! Declared input-file resolution.
//!
//! Input paths in the `In` header are relative to the **parent of the
//! watched tree** — not the node, and not the tree root — so a prompt can
//! attach files living next to (or above) the conversational structure.
//!
//! Resolution is all-or-nothing: one unreadable file aborts the node
//! before the model is called.

use promptree_core::error::AttachmentError;
use promptree_protocol::section::attachment_block;
use std::path::Path;

/// Resolve declared input files and render them as concatenated `<IN>`
/// blocks, in declared order. Returns an empty string for an empty list.
pub fn resolve(in_files: &[String], watch_root: &Path) -> Result<String, AttachmentError> {
    let parent = watch_root.parent().unwrap_or(watch_root);
    let mut rendered = String::new();

    for rel_path in in_files {
        let abs_path = parent.join(rel_path);
        let content = std::fs::read_to_string(&abs_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AttachmentError::NotFound {
                    path: rel_path.clone(),
                }
            } else {
                AttachmentError::Unreadable {
                    path: rel_path.clone(),
                    source: e,
                }
            }
        })?;
        rendered.push_str(&attachment_block(rel_path, &content));
    }

    Ok(rendered)
}
