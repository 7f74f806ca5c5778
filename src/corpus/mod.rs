//! Scanning a source directory into a [`CategoryPool`].

pub mod category;
pub mod pool;
pub mod scanner;
pub mod weighting;

pub use category::{category_from_file_name, DEFAULT_DELIMITER};
pub use pool::CategoryPool;
pub use scanner::{CorpusScanner, ScanError, ScanOptions, ScanReport, SkippedItem, DEFAULT_EXTENSION};
pub use weighting::{CharacterCounter, InvalidMode, WeightCounter, WeightMode, WordCounter};
