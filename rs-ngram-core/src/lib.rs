//! Token n-gram "autocomplete plausibility" analysis for source code.
//!
//! This crate provides:
//! - A comment stripper and a heuristic, language-agnostic tokenizer
//! - A fixed-order token n-gram model trained from a corpus
//! - An annotation engine that inserts the most probable next token at
//!   every position of a target text and reports the top candidates
//! - Corpus I/O helpers (file selection, encoding fallback, output files)
//!
//! `Analyzer` ties these together for callers.

/// High-level facade over training, prediction and annotation.
pub mod analyzer;

/// Run parameters (model order, file extension, training mode).
pub mod config;

/// Crate error type.
pub mod error;

/// Corpus and target file helpers (listing, reading, writing).
pub mod io;

/// Comment stripping and tokenization.
pub mod lexer;

/// N-gram model, predictions and annotation.
pub mod model;

pub use analyzer::Analyzer;
pub use config::AnalysisConfig;
pub use error::{NgramError, Result};
