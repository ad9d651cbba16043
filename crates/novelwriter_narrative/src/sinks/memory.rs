//! In-memory sink.

use async_trait::async_trait;
use novelwriter_core::IdeaDocument;
use novelwriter_error::NovelwriterResult;
use novelwriter_interface::DocumentSink;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Keeps every recorded document in a shared list.
///
/// Clones share the same list, so a test can hand one clone to the
/// controller and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentSink {
    documents: Arc<Mutex<Vec<IdeaDocument>>>,
}

impl MemoryDocumentSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded documents.
    pub fn documents(&self) -> Vec<IdeaDocument> {
        match self.documents.lock() {
            Ok(documents) => documents.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl DocumentSink for MemoryDocumentSink {
    async fn record(&self, document: IdeaDocument) -> NovelwriterResult<String> {
        let mut documents = match self.documents.lock() {
            Ok(documents) => documents,
            Err(poisoned) => poisoned.into_inner(),
        };
        documents.push(document);
        let location = format!("memory://ideas/{}", documents.len());
        debug!(location = %location, "Recorded idea in memory");
        Ok(location)
    }
}
