//! `promptree process` — Process a single node once.

use std::path::PathBuf;

pub async fn run(
    node: PathBuf,
    path: Option<PathBuf>,
    model: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let node = node.canonicalize()?;
    let processor = super::build_processor(&config, path, model)?;

    let outcome = processor.process(&node).await?;

    println!("Processed {}", node.display());
    println!("   Context messages: {}", outcome.context_messages);
    println!("   Attachments:      {}", outcome.attachments);
    println!("   Sections found:   {}", outcome.report.sections_found);
    for name in &outcome.report.written {
        println!("   Wrote {name}");
    }
    for name in &outcome.report.missing {
        println!("   Missing declared output: {name}");
    }
    for name in &outcome.report.undeclared {
        println!("   Undeclared section (not written): {name}");
    }
    Ok(())
}
