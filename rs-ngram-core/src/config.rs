use crate::error::{NgramError, Result};

/// Default source file extension selected from corpus and input folders.
pub const DEFAULT_EXTENSION: &str = "java";

/// Parameters of one analysis run.
///
/// # Responsibilities
/// - Hold the model order `n` (validated, always >= 1)
/// - Hold the source file extension used to select corpus/input files
/// - Choose between sequential and multi-threaded training
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
	/// Context length of the model.
	order: usize,

	/// File extension, without the leading dot.
	extension: String,

	/// Train on all CPU cores.
	pub parallel: bool,
}

impl AnalysisConfig {
	/// Creates a configuration for order `order` with default settings.
	///
	/// # Errors
	/// Returns [`NgramError::InvalidOrder`] if `order == 0`.
	pub fn new(order: usize) -> Result<Self> {
		if order == 0 {
			return Err(NgramError::InvalidOrder(order));
		}
		Ok(Self { order, extension: DEFAULT_EXTENSION.to_owned(), parallel: true })
	}

	pub fn order(&self) -> usize {
		self.order
	}

	pub fn extension(&self) -> &str {
		&self.extension
	}

	/// Sets the model order.
	///
	/// # Errors
	/// Returns an error if the value is 0.
	pub fn set_order(&mut self, order: usize) -> Result<()> {
		if order == 0 {
			return Err(NgramError::InvalidOrder(order));
		}
		self.order = order;
		Ok(())
	}

	/// Sets the file extension; a leading dot is accepted and dropped.
	pub fn set_extension(&mut self, extension: &str) {
		self.extension = extension.trim_start_matches('.').to_owned();
	}
}
