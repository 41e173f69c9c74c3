use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the tokenizer pipeline, the n-gram model and the
/// corpus I/O helpers.
///
/// Tokenization itself never fails: malformed input only yields
/// best-effort tokens. Everything here is either invalid configuration or
/// a resource-level failure.
#[derive(Debug, Error)]
pub enum NgramError {
	/// The model order `n` must be at least 1.
	#[error("model order must be >= 1, got {0}")]
	InvalidOrder(usize),

	/// Two models (or a model and a request) disagree on the order `n`.
	#[error("model order mismatch: expected {expected}, found {found}")]
	OrderMismatch { expected: usize, found: usize },

	/// A file or directory that must exist could not be located.
	#[error("file '{}' not found", path.display())]
	MissingResource { path: PathBuf },

	/// Any other read or write failure.
	#[error("I/O error on '{}': {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// Persisted model could not be encoded or decoded.
	#[error("model serialization failed: {0}")]
	Serialization(#[from] postcard::Error),

	/// A training worker stopped before reporting its partial model.
	#[error("training worker failed: {0}")]
	Worker(String),
}

impl NgramError {
	/// Wraps an `io::Error` with the path it happened on.
	///
	/// `NotFound` becomes [`NgramError::MissingResource`].
	pub(crate) fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
		let path = path.into();
		if source.kind() == io::ErrorKind::NotFound {
			NgramError::MissingResource { path }
		} else {
			NgramError::Io { path, source }
		}
	}
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, NgramError>;
