//! Processing engine for the conversation tree.
//!
//! Ties the protocol layer to a provider: assembles context from node
//! ancestry, resolves attachments, runs the completion, and reconciles
//! declared outputs against the reply. The watcher turns filesystem
//! events into pipeline runs.

pub mod attachments;
pub mod context;
pub mod outputs;
pub mod processor;
pub mod watcher;

pub use context::ContextAssembler;
pub use outputs::ExtractionReport;
pub use processor::{NodeProcessor, ProcessOutcome};
