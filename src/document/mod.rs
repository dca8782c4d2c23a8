//! Document module - fills the policy PDF template.
//!
//! - `layout` - fixed page positions of every field
//! - `engine` - rendering capability and its lopdf implementation
//! - `template` - where the blank template bytes come from
//! - `assembler` - turns a validated policy request into the filled PDF

pub mod assembler;
pub mod engine;
pub mod layout;
mod metrics;
pub mod template;
pub mod traits;

pub use assembler::{policy_filename, PolicyDocumentGenerator, RenderedField};
pub use engine::{DocumentCanvas, PdfEngine, RenderEngine};
pub use layout::{placement_for, DocumentField, Placement};
pub use template::{BytesTemplateSource, FileTemplateSource, TemplateSource};
pub use traits::{Generator, Validator};

use thiserror::Error;

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("policy template not found: {0}")]
    TemplateNotFound(String),
    #[error("failed to read policy template: {0}")]
    TemplateIo(#[source] std::io::Error),
    #[error("failed to load policy template: {0}")]
    TemplateLoad(String),
    #[error("policy template has no page {0}")]
    MissingPage(usize),
    #[error("failed to render text: {0}")]
    Render(String),
    #[error("failed to save PDF: {0}")]
    Save(String),
}

/// Result of a successful document generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
    /// Every text drawn on the page, in drawing order.
    pub fields: Vec<RenderedField>,
}

impl GeneratedDocument {
    /// Text drawn for `field`, if any.
    pub fn text_of(&self, field: DocumentField) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.text.as_str())
    }
}
