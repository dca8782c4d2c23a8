//! Traits for the request validation / document generation split.

use super::{DocumentError, GeneratedDocument};
use crate::validation::ValidationErrors;

/// Trait for validating request objects.
pub trait Validator {
    /// Collect every problem with the object.
    fn validate(&self) -> ValidationErrors;
}

/// Trait for document generators.
pub trait Generator<Req> {
    /// Generate a document from the request.
    fn generate(&self, request: &Req) -> Result<GeneratedDocument, DocumentError>;
}
