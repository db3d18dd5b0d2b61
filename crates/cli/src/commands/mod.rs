pub mod init;
pub mod new_node;
pub mod process;
pub mod status;
pub mod summarize;
pub mod watch;

use promptree_config::AppConfig;
use promptree_core::node::ArtifactNames;
use promptree_engine::NodeProcessor;
use std::path::PathBuf;

/// Build a processor from the loaded config plus any CLI overrides.
///
/// The watch root is canonicalized here, once. Node paths handed to the
/// processor are canonicalized too (in the commands), so the ancestry walk
/// compares one spelling of every path — a relative or symlinked root
/// would otherwise never match and the walk would escape the tree.
pub(crate) fn build_processor(
    config: &AppConfig,
    path: Option<PathBuf>,
    model: Option<String>,
) -> Result<NodeProcessor, Box<dyn std::error::Error>> {
    let provider = promptree_providers::build_from_config(config)?;
    let root = path
        .unwrap_or_else(|| config.watch.path.clone())
        .canonicalize()?;
    let names = ArtifactNames {
        request: config.watch.request_artifact.clone(),
        reply: config.watch.reply_artifact.clone(),
    };
    Ok(NodeProcessor::new(
        provider,
        root,
        names,
        model.unwrap_or_else(|| config.default_model.clone()),
        config.default_temperature,
        Some(config.default_max_tokens),
    ))
}

pub(crate) fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    AppConfig::load().map_err(|e| format!("Failed to load config: {e}").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.default_provider = "mock".into();
        config
    }

    #[test]
    fn build_processor_canonicalizes_relative_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("tree");
        std::fs::create_dir_all(&root).unwrap();
        let relative = root.join("..").join("tree");

        let processor = build_processor(&mock_config(), Some(relative), None).unwrap();
        assert_eq!(processor.watch_root(), root.canonicalize().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn build_processor_resolves_symlinked_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("tree");
        std::fs::create_dir_all(&root).unwrap();
        let link = tmp.path().join("tree-link");
        std::os::unix::fs::symlink(&root, &link).unwrap();

        let processor = build_processor(&mock_config(), Some(link), None).unwrap();
        assert_eq!(processor.watch_root(), root.canonicalize().unwrap());
    }

    #[test]
    fn build_processor_rejects_missing_root() {
        let tmp = tempfile::tempdir().unwrap();
        let gone = tmp.path().join("does-not-exist");
        assert!(build_processor(&mock_config(), Some(gone), None).is_err());
    }
}
