//! # promptree Protocol
//!
//! The wire formats of the prompt-document protocol:
//!
//! - [`header`] — header/body splitting and continuation-line folding,
//!   independent of header semantics
//! - [`document`] — the typed [`PromptDocument`] built from the header map
//! - [`section`] — nesting-safe extraction of `<OUT filename="...">`
//!   sections from model replies, and `<IN>` attachment block rendering
//!
//! Everything here is pure text handling; filesystem and provider concerns
//! live in the engine crate.

pub mod document;
pub mod header;
pub mod section;

pub use document::PromptDocument;
pub use header::RawDocument;
pub use section::{ExtractedSection, attachment_block, extract_sections};
