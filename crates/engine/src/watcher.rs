//! Filesystem watcher for the conversation tree.
//!
//! Watches the tree root recursively and emits the node directory
//! whenever a request artifact is created or modified anywhere under it.
//! Recursive mode means directories created after startup (new branches)
//! are covered without re-registration.
//!
//! `notify` delivers events on its own thread over a blocking channel, so
//! a dedicated std thread bridges them into a tokio channel for the async
//! daemon loop.

use crate::processor::NodeProcessor;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use promptree_core::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Spawn the bridge thread and return the receiving end of node triggers.
///
/// Each received path is the directory of a node whose request artifact
/// just changed. Duplicate events for one save are possible and harmless;
/// the processor's lock serializes them.
pub fn watch_tree(root: &Path, request_name: &str) -> Result<mpsc::Receiver<PathBuf>> {
    let (tx, rx) = mpsc::channel::<PathBuf>(64);
    let (notify_tx, notify_rx) = std::sync::mpsc::channel();

    let mut watcher: RecommendedWatcher =
        notify::recommended_watcher(notify_tx).map_err(into_internal)?;
    watcher
        .watch(root, RecursiveMode::Recursive)
        .map_err(into_internal)?;

    let request_name = request_name.to_string();
    std::thread::spawn(move || {
        // Keep the watcher alive for the life of the thread.
        let _watcher = watcher;
        for res in notify_rx {
            match res {
                Ok(event) => {
                    for dir in node_dirs_from_event(&event, &request_name) {
                        if tx.blocking_send(dir).is_err() {
                            // Daemon gone; stop bridging.
                            return;
                        }
                    }
                }
                Err(e) => warn!(error = %e, "Watch error"),
            }
        }
    });

    Ok(rx)
}

/// Node directories whose request artifact this event touched.
fn node_dirs_from_event(event: &Event, request_name: &str) -> Vec<PathBuf> {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return Vec::new();
    }
    event
        .paths
        .iter()
        .filter(|p| {
            p.file_name()
                .map(|n| n.to_str() == Some(request_name))
                .unwrap_or(false)
        })
        .filter_map(|p| p.parent().map(Path::to_path_buf))
        .collect()
}

/// Run the daemon loop: process every triggered node until the watcher
/// channel closes. A failed node is logged and never stops the loop.
pub async fn run(processor: Arc<NodeProcessor>) -> Result<()> {
    let root = processor.watch_root().to_path_buf();
    let request_name = processor.artifact_names().request.clone();
    let mut rx = watch_tree(&root, &request_name)?;

    info!(root = %root.display(), artifact = %request_name, "Watching conversation tree");

    while let Some(node_dir) = rx.recv().await {
        debug!(node = %node_dir.display(), "Request artifact changed");
        match processor.process(&node_dir).await {
            Ok(outcome) => info!(
                node = %node_dir.display(),
                written = outcome.report.written.len(),
                "Node processed"
            ),
            Err(e) => error!(node = %node_dir.display(), error = %e, "Node failed"),
        }
    }

    Ok(())
}

fn into_internal(e: notify::Error) -> Error {
    Error::Internal(format!("watcher: {e}"))
}
