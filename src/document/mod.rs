pub mod document;

pub use crate::types::identifiers::{Category, DocumentId, DocumentVersion};
pub use document::{Document, DocumentError};
