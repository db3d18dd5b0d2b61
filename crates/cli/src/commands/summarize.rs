//! `promptree summarize` — Summarize the conversation up to a node.

use std::path::PathBuf;

pub async fn run(node: PathBuf, path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let node = node.canonicalize()?;
    let processor = super::build_processor(&config, path, None)?;

    let summary = processor.summarize(&node).await?;

    println!("{summary}");
    Ok(())
}
