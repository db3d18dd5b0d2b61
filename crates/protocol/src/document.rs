//! The typed prompt document.
//!
//! Interprets the parsed header map into the fields the pipeline cares
//! about. Recognized header names are the fixed, case-sensitive set
//! `In`, `Out`, `Sysmsg`; anything else is ignored.

use crate::header;
use promptree_core::error::DocumentError;

/// Header carrying the declared input-file attachments.
pub const HEADER_IN: &str = "In";
/// Header carrying the declared expected output files.
pub const HEADER_OUT: &str = "Out";
/// Header carrying the system message.
pub const HEADER_SYSMSG: &str = "Sysmsg";

/// One conversational turn's parsed request description.
///
/// Immutable once parsed; owned by the node-processing operation that
/// parsed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptDocument {
    /// Declared attachments, in declared order. Duplicates are allowed but
    /// meaningless.
    pub in_files: Vec<String>,
    /// Declared expected result files, in declared order.
    pub out_files: Vec<String>,
    /// System message, or empty if no `Sysmsg` header was present.
    pub sysmsg: String,
    /// Free-text prompt body, used as-is.
    pub body: String,
}

impl PromptDocument {
    /// Parse a prompt document from raw text.
    ///
    /// A document with no `In`, `Out`, or `Sysmsg` header is valid and
    /// yields empty lists / an empty system message.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let raw = header::parse(text)?;

        let split_list = |name: &str| -> Vec<String> {
            raw.headers
                .get(name)
                .map(|v| v.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default()
        };

        Ok(Self {
            in_files: split_list(HEADER_IN),
            out_files: split_list(HEADER_OUT),
            sysmsg: raw.headers.get(HEADER_SYSMSG).cloned().unwrap_or_default(),
            body: raw.body,
        })
    }
}
