pub mod manifest;
pub mod materializer;

pub use manifest::{ManifestDocumentEntry, ManifestError, RunManifest};
pub use materializer::{CopyError, MaterializeError, MaterializeReport, Materializer};
