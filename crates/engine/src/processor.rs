//! Node processing pipeline.
//!
//! One `NodeProcessor` drives a request artifact from parse to written
//! outputs: parse the prompt document, assemble conversation context from
//! the node's ancestry, resolve attachments, call the provider, persist
//! the raw reply, then extract and reconcile declared outputs. A single
//! process-wide lock serializes node processing so two triggers can never
//! interleave writes to the tree.

use crate::attachments;
use crate::context::ContextAssembler;
use crate::outputs::{self, ExtractionReport};
use chrono::Utc;
use promptree_core::error::{Error, Result};
use promptree_core::message::Message;
use promptree_core::node::{ArtifactNames, ConversationNode, METRICS_ARTIFACT, SUMMARY_ARTIFACT};
use promptree_core::provider::{Provider, ProviderRequest};
use promptree_protocol::document::PromptDocument;
use promptree_protocol::section::extract_sections;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// What one completed pipeline run produced.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub context_messages: usize,
    pub attachments: usize,
    pub report: ExtractionReport,
}

pub struct NodeProcessor {
    provider: Arc<dyn Provider>,
    root: PathBuf,
    names: ArtifactNames,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    // One run at a time, tree-wide.
    lock: Mutex<()>,
}

impl NodeProcessor {
    pub fn new(
        provider: Arc<dyn Provider>,
        root: impl Into<PathBuf>,
        names: ArtifactNames,
        model: impl Into<String>,
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Self {
        Self {
            provider,
            root: root.into(),
            names,
            model: model.into(),
            temperature,
            max_tokens,
            lock: Mutex::new(()),
        }
    }

    pub fn watch_root(&self) -> &Path {
        &self.root
    }

    pub fn artifact_names(&self) -> &ArtifactNames {
        &self.names
    }

    /// Run the full pipeline for the node rooted at `node_dir`.
    ///
    /// Fatal failures (malformed document, missing attachment, provider
    /// error) abort before any output is written; the raw reply is always
    /// persisted before extraction so a failed extraction can never lose
    /// the provider's text.
    pub async fn process(&self, node_dir: &Path) -> Result<ProcessOutcome> {
        let _guard = self.lock.lock().await;

        let node = ConversationNode::new(node_dir);
        let request_path = node.request_path(&self.names);
        let raw = std::fs::read_to_string(&request_path)?;
        let doc = PromptDocument::parse(&raw)?;

        let assembler = ContextAssembler::new(&self.root, self.names.clone());
        let mut messages = assembler.assemble(node_dir);
        let context_messages = messages.len();

        if !doc.sysmsg.is_empty() {
            messages.push(Message::system(&doc.sysmsg));
        }

        // Attachments resolve all-or-nothing, before any provider call.
        let attachment_text = attachments::resolve(&doc.in_files, &self.root)?;

        let mut user_content = format!("{}\n\n", doc.body);
        if !doc.in_files.is_empty() {
            user_content.push_str("The following files are attached:\n");
            user_content.push_str(&attachment_text);
            user_content.push('\n');
        }
        messages.push(Message::user(&user_content));

        info!(
            node = %node_dir.display(),
            model = %self.model,
            context = context_messages,
            attachments = doc.in_files.len(),
            "Processing node"
        );

        let mut request = ProviderRequest::new(&self.model, messages);
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;

        let response = self.provider.complete(request).await?;
        let reply = response.message.content.clone();

        // Raw reply first, so extraction failures never lose it.
        std::fs::write(node.reply_path(&self.names), &reply)?;
        debug!(node = %node_dir.display(), bytes = reply.len(), "Reply persisted");

        let sections = extract_sections(&reply);
        let report = outputs::reconcile_and_write(&sections, &doc.out_files, &self.root)?;

        for name in &report.missing {
            warn!(file = %name, "Declared output {name} not found in reply");
        }
        for name in &report.undeclared {
            warn!(file = %name, "Reply contained undeclared output section {name}");
        }
        if report.nothing_extracted(!doc.out_files.is_empty()) {
            warn!(node = %node_dir.display(), "Outputs declared but reply contained no sections");
        }

        self.write_metrics(&node, context_messages, doc.in_files.len(), &report)?;

        Ok(ProcessOutcome {
            context_messages,
            attachments: doc.in_files.len(),
            report,
        })
    }

    /// Summarize the conversation up to and including `node_dir`, writing
    /// the provider's answer to the node's summary artifact.
    pub async fn summarize(&self, node_dir: &Path) -> Result<String> {
        let _guard = self.lock.lock().await;

        let assembler = ContextAssembler::new(&self.root, self.names.clone());
        let history = assembler.assemble(node_dir);
        if history.is_empty() {
            return Err(Error::Internal(format!(
                "no conversation artifacts under {}",
                node_dir.display()
            )));
        }

        let mut transcript = String::new();
        for msg in &history {
            transcript.push_str(&format!("{}: {}\n", msg.role, msg.content));
        }
        let prompt = format!(
            "Please provide a concise summary of the following conversation:\n\n{transcript}"
        );

        let mut request = ProviderRequest::new(&self.model, vec![Message::user(prompt)]);
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;

        let response = self.provider.complete(request).await?;
        let summary = response.message.content;
        std::fs::write(node_dir.join(SUMMARY_ARTIFACT), &summary)?;
        info!(node = %node_dir.display(), "Summary written");
        Ok(summary)
    }

    fn write_metrics(
        &self,
        node: &ConversationNode,
        context_messages: usize,
        attachments: usize,
        report: &ExtractionReport,
    ) -> Result<()> {
        let metrics = json!({
            "timestamp": Utc::now().to_rfc3339(),
            "model": self.model,
            "context_messages": context_messages,
            "attachments": attachments,
            "sections_found": report.sections_found,
            "outputs_written": report.written.len(),
            "outputs_missing": report.missing.len(),
            "outputs_undeclared": report.undeclared.len(),
        });
        let rendered = serde_json::to_string_pretty(&metrics)?;
        std::fs::write(node.dir().join(METRICS_ARTIFACT), rendered)?;
        Ok(())
    }
}
