//! `promptree watch` — Watch a conversation tree and process changed nodes.

use promptree_engine::watcher;
use std::path::PathBuf;
use std::sync::Arc;

pub async fn run(
    path: Option<PathBuf>,
    model: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let model_name = model
        .clone()
        .unwrap_or_else(|| config.default_model.clone());
    let processor = Arc::new(super::build_processor(&config, path, model)?);

    let root = processor.watch_root();
    if !root.is_dir() {
        return Err(format!("watch path is not a directory: {}", root.display()).into());
    }

    println!("promptree — watching {}", root.display());
    println!(
        "   Provider: {}   Model: {}",
        config.default_provider, model_name
    );
    println!(
        "   Save a {} file under any node directory to trigger processing.",
        processor.artifact_names().request
    );

    // Blocks until the watcher channel closes.
    watcher::run(processor).await?;
    Ok(())
}
