//! LLM Provider implementations for promptree.
//!
//! All providers implement the `promptree_core::Provider` trait.
//! The router builds the right backend from configuration; the engine only
//! ever sees `Arc<dyn Provider>`.

pub mod mock;
pub mod openai_compat;
pub mod router;

pub use mock::MockProvider;
pub use openai_compat::OpenAiCompatProvider;
pub use router::build_from_config;
