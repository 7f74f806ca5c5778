pub mod identifiers;
pub mod policy;
pub mod selection_bundle;

pub use identifiers::{Category, DocumentId, DocumentIdError, DocumentVersion};
pub use policy::FailurePolicy;
pub use selection_bundle::{
    Candidate, Capacity, CategorySelection, CategorySummary, SelectedDocument, Selection,
    SelectionError,
};
