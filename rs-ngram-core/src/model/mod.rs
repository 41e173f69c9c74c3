//! Token n-gram model and the annotation engine built on it.
//!
//! - Fixed-order model (`NGramModel`): training, lookup, merge, persistence
//! - Context keys (`Context`) and follower tables (`Followers`)
//! - Ranked shortlists (`Prediction`)
//! - Per-position annotation of a target text (`annotator`)

/// Positional annotation of target lines with predicted tokens.
pub mod annotator;

/// Ordered, fixed-length lookup key.
pub mod context;

/// Insertion-ordered follower frequency table.
pub mod followers;

/// Fixed-order n-gram model (`n >= 1`).
///
/// Handles line ingestion, follower counting, top-3 lookup,
/// parallel training and model merging.
pub mod ngram_model;

/// Ranked candidate shortlist and percentage reporting.
pub mod prediction;
