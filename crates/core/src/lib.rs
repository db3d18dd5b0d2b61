//! # promptree Core
//!
//! Domain types, traits, and error definitions for the promptree
//! conversation engine. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The LLM backend is a trait here; implementations live in the providers
//! crate and are injected into the engine. This enables:
//! - Swapping backends via configuration
//! - Testing the whole pipeline with a scripted stub
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod message;
pub mod node;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{AttachmentError, DocumentError, Error, ProviderError, Result};
pub use message::{Message, Role};
pub use node::{ArtifactNames, ConversationNode};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
