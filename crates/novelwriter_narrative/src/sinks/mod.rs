//! Document sinks.

mod markdown;
mod memory;
mod outline;

pub use markdown::{MarkdownDocumentSink, new_doc_id, render_document, sanitize_filename};
pub use memory::MemoryDocumentSink;
pub use outline::{default_outline_path, render_outline, write_outline};
