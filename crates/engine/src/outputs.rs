//! Declared/extracted output reconciliation and atomic writes.
//!
//! The declared output-file list and the sections extracted from a reply
//! are reconciled by exact filename match. Matched content is written to
//! its path (resolved against the parent of the watch root) via a
//! write-to-temporary-then-rename sequence, so a reader never observes a
//! partially written file. Everything that does not match is reported,
//! never written.

use promptree_protocol::section::ExtractedSection;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// The outcome of reconciling one reply against one declared output list.
///
/// Mismatches are warnings, not errors: they never abort sibling writes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionReport {
    /// Declared names that matched a section and were written.
    pub written: Vec<String>,
    /// Declared names with no matching section (`DeclaredOutputMissing`).
    pub missing: Vec<String>,
    /// Section names that were never declared (`UndeclaredOutputFound`).
    pub undeclared: Vec<String>,
    /// How many top-level sections the reply contained.
    pub sections_found: usize,
}

impl ExtractionReport {
    /// True when outputs were declared but the reply contained no sections
    /// at all (`NoSectionsFound`) — distinct from individual name misses.
    pub fn nothing_extracted(&self, declared_any: bool) -> bool {
        declared_any && self.sections_found == 0
    }
}

/// Reconcile extracted sections against the declared output list and write
/// every match.
///
/// Declared names are de-duplicated up front, first occurrence keeping its
/// position: one matching section satisfies a name however often it was
/// declared. Section names that repeat keep the last occurrence's content.
pub fn reconcile_and_write(
    sections: &[ExtractedSection],
    declared: &[String],
    watch_root: &Path,
) -> std::io::Result<ExtractionReport> {
    let parent = watch_root.parent().unwrap_or(watch_root);

    let mut by_name: HashMap<&str, &str> = HashMap::new();
    for section in sections {
        by_name.insert(&section.filename, &section.content);
    }

    let mut report = ExtractionReport {
        sections_found: sections.len(),
        ..Default::default()
    };

    let mut seen = HashSet::new();
    for name in declared {
        if !seen.insert(name.as_str()) {
            continue;
        }
        match by_name.get(name.as_str()) {
            Some(content) => {
                write_atomic(&parent.join(name), content)?;
                info!(file = %name, "Declared output written");
                report.written.push(name.clone());
            }
            None => report.missing.push(name.clone()),
        }
    }

    let declared_set: HashSet<&str> = declared.iter().map(String::as_str).collect();
    let mut reported = HashSet::new();
    for section in sections {
        if !declared_set.contains(section.filename.as_str())
            && reported.insert(section.filename.as_str())
        {
            report.undeclared.push(section.filename.clone());
        }
    }

    Ok(report)
}

/// Write `content` to `path` through a temporary file in the destination
/// directory, then rename into place.
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
