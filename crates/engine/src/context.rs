//! Conversational context assembly.
//!
//! Walks the chain of ancestor nodes from the tree root down to the
//! current node and turns each node's surviving artifacts into role-tagged
//! messages: the request artifact becomes a user message, the reply
//! artifact an assistant message, in that order per node. Nodes with a
//! missing artifact contribute nothing for that slot — no placeholder.
//!
//! The sequence is rebuilt fresh on every invocation rather than cached:
//! any ancestor's artifacts may have been edited since the last turn.

use promptree_core::message::Message;
use promptree_core::node::{ArtifactNames, ConversationNode};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Assembles ancestor context for a node. Stateless — create one and
/// reuse it.
pub struct ContextAssembler {
    root: PathBuf,
    names: ArtifactNames,
}

impl ContextAssembler {
    pub fn new(root: impl Into<PathBuf>, names: ArtifactNames) -> Self {
        Self {
            root: root.into(),
            names,
        }
    }

    /// Build the flat, strictly root-to-leaf ordered message sequence for
    /// the given node.
    pub fn assemble(&self, node_dir: &Path) -> Vec<Message> {
        let node = ConversationNode::new(node_dir);
        let mut messages = Vec::new();

        for ancestor in node.ancestry(&self.root) {
            if let Ok(request) = std::fs::read_to_string(ancestor.request_path(&self.names)) {
                messages.push(Message::user(request));
            }
            if let Ok(reply) = std::fs::read_to_string(ancestor.reply_path(&self.names)) {
                messages.push(Message::assistant(reply));
            }
        }

        trace!(
            node = %node_dir.display(),
            messages = messages.len(),
            "Assembled ancestor context"
        );
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptree_core::message::Role;
    use std::fs;

    fn write_node(dir: &Path, request: Option<&str>, reply: Option<&str>) {
        fs::create_dir_all(dir).unwrap();
        if let Some(r) = request {
            fs::write(dir.join("prompt.txt"), r).unwrap();
        }
        if let Some(r) = reply {
            fs::write(dir.join("response.txt"), r).unwrap();
        }
    }

    #[test]
    fn three_levels_full_artifacts_yield_six_messages() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("tree");
        let mid = root.join("mid");
        let leaf = mid.join("leaf");
        write_node(&root, Some("q1"), Some("a1"));
        write_node(&mid, Some("q2"), Some("a2"));
        write_node(&leaf, Some("q3"), Some("a3"));

        let assembler = ContextAssembler::new(&root, ArtifactNames::default());
        let messages = assembler.assemble(&leaf);

        assert_eq!(messages.len(), 6);
        let expected = [
            (Role::User, "q1"),
            (Role::Assistant, "a1"),
            (Role::User, "q2"),
            (Role::Assistant, "a2"),
            (Role::User, "q3"),
            (Role::Assistant, "a3"),
        ];
        for (msg, (role, content)) in messages.iter().zip(expected) {
            assert_eq!(msg.role, role);
            assert_eq!(msg.content, content);
        }
    }

    #[test]
    fn missing_artifacts_contribute_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("tree");
        let mid = root.join("mid");
        let leaf = mid.join("leaf");
        // Root has only a reply, mid has nothing, leaf has only a request.
        write_node(&root, None, Some("a1"));
        write_node(&mid, None, None);
        write_node(&leaf, Some("q3"), None);

        let assembler = ContextAssembler::new(&root, ArtifactNames::default());
        let messages = assembler.assemble(&leaf);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::Assistant);
        assert_eq!(messages[0].content, "a1");
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "q3");
    }

    #[test]
    fn root_node_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("tree");
        write_node(&root, Some("q"), None);

        let assembler = ContextAssembler::new(&root, ArtifactNames::default());
        let messages = assembler.assemble(&root);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "q");
    }

    #[test]
    fn rebuilt_fresh_after_edits() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("tree");
        write_node(&root, Some("original"), None);

        let assembler = ContextAssembler::new(&root, ArtifactNames::default());
        assert_eq!(assembler.assemble(&root)[0].content, "original");

        fs::write(root.join("prompt.txt"), "edited").unwrap();
        assert_eq!(assembler.assemble(&root)[0].content, "edited");
    }

    #[test]
    fn custom_artifact_names_respected() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("tree");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("ask.md"), "q").unwrap();
        fs::write(root.join("answer.md"), "a").unwrap();

        let names = ArtifactNames {
            request: "ask.md".into(),
            reply: "answer.md".into(),
        };
        let assembler = ContextAssembler::new(&root, names);
        assert_eq!(assembler.assemble(&root).len(), 2);
    }
}
