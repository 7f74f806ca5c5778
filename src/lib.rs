//! Deterministic per-genre corpus balancing.
//!
//! `corpus-balance` scans a folder of text files, groups them by the genre
//! prefix of their file name, weighs each file by characters or words, and
//! keeps, per genre, the largest number of files whose total weight fits a
//! shared capacity. Selection is exact (lightest-first is optimal when every
//! file counts as one) and deterministic: identical inputs always produce
//! identical selections.

pub mod config;
pub mod corpus;
pub mod document;
pub mod logging;
pub mod materialize;
pub mod pipeline;
pub mod selection;
pub mod types;

pub use config::{BalanceConfig, ConfigError};
pub use pipeline::{run, BalanceError, RunReport, RunSummary};
