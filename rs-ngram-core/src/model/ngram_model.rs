use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::context::Context;
use super::followers::Followers;
use super::prediction::{MAX_CANDIDATES, Prediction};
use crate::error::{NgramError, Result};
use crate::lexer::{Token, TokenizedLine};

/// Fixed-order token n-gram model.
///
/// Maps every context of `n` consecutive tokens seen in the corpus to the
/// tokens that followed it, duplicates counted.
///
/// # Responsibilities
/// - Build the model from tokenized lines (no context spans two lines)
/// - Rank the followers of a context
/// - Merge with another model of the same order
/// - Persist to / restore from disk
///
/// # Invariants
/// - `n` is always >= 1
/// - Every key in `contexts` holds exactly `n` tokens
/// - Every stored `Followers` is non-empty
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NGramModel {
	/// Context length.
	n: usize,

	/// Mapping from a context to the tokens observed after it.
	contexts: HashMap<Context, Followers>,
}

impl NGramModel {
	/// Creates an empty model of order `n`.
	///
	/// # Errors
	/// Returns [`NgramError::InvalidOrder`] if `n == 0`.
	pub fn new(n: usize) -> Result<Self> {
		if n == 0 {
			return Err(NgramError::InvalidOrder(n));
		}
		Ok(Self { n, contexts: HashMap::new() })
	}

	/// Trains a model from the whole corpus, in order.
	pub fn train(lines: &[TokenizedLine], n: usize) -> Result<Self> {
		let mut model = Self::new(n)?;
		for line in lines {
			model.add_line(line);
		}
		info!("trained order-{} model: {} contexts from {} lines", n, model.len(), lines.len());
		Ok(model)
	}

	/// Trains on worker threads and merges the partial models.
	///
	/// # Behavior
	/// - Splits the lines into ordered chunks (CPU cores * factor).
	/// - Each thread builds a partial model for one chunk.
	/// - Partial models are merged back in chunk order, which gives the
	///   same result as [`NGramModel::train`], tie-break order included.
	pub fn train_parallel(lines: &[TokenizedLine], n: usize) -> Result<Self> {
		let mut final_model = Self::new(n)?;
		if lines.is_empty() {
			return Ok(final_model);
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = lines.len().div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		let mut spawned = 0;
		for (index, chunk) in lines.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			let chunk: Vec<TokenizedLine> = chunk.to_vec();
			spawned += 1;

			thread::spawn(move || {
				// n was validated above, the model always builds
				let mut partial_model = NGramModel { n, contexts: HashMap::new() };
				for line in &chunk {
					partial_model.add_line(line);
				}
				// The receiver only goes away if the caller already failed
				let _ = tx.send((index, partial_model));
			});
		}
		drop(tx);

		let mut partial_models: Vec<(usize, NGramModel)> = rx.iter().collect();
		if partial_models.len() != spawned {
			return Err(NgramError::Worker(format!(
				"{} of {} chunks reported",
				partial_models.len(),
				spawned
			)));
		}
		partial_models.sort_by_key(|(index, _)| *index);

		for (_, partial_model) in &partial_models {
			final_model.merge(partial_model)?;
		}

		info!(
			"trained order-{} model on {} workers: {} contexts from {} lines",
			n,
			spawned,
			final_model.len(),
			lines.len()
		);
		Ok(final_model)
	}

	/// Adds one tokenized line to the model.
	///
	/// Every window of `n` tokens that has a token after it records that
	/// token as a follower. Lines shorter than `n + 1` add nothing.
	pub fn add_line(&mut self, tokens: &[Token]) {
		for window in tokens.windows(self.n + 1) {
			let (context, next) = window.split_at(self.n);
			self.contexts
				.entry(Context::new(context))
				.or_default()
				.add(&next[0]);
		}
	}

	/// Up to three most frequent followers of `context`.
	///
	/// Lookup is exact: an unknown context, or one whose length is not `n`,
	/// gives an empty prediction.
	pub fn predict(&self, context: &[Token]) -> Prediction {
		match self.contexts.get(context) {
			Some(followers) => Prediction::new(followers.ranked(MAX_CANDIDATES)),
			None => Prediction::default(),
		}
	}

	/// Raw follower table for `context`, if it was ever observed.
	pub fn followers(&self, context: &[Token]) -> Option<&Followers> {
		self.contexts.get(context)
	}

	/// The order `n` of the model.
	pub fn order(&self) -> usize {
		self.n
	}

	/// Number of distinct contexts.
	pub fn len(&self) -> usize {
		self.contexts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.contexts.is_empty()
	}

	/// Merges another model into this one.
	///
	/// # Notes
	/// - Follower counts of shared contexts are summed.
	/// - Followers new to a context are appended after the existing ones.
	///
	/// # Errors
	/// Returns [`NgramError::OrderMismatch`] if the orders differ.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.n != other.n {
			return Err(NgramError::OrderMismatch { expected: self.n, found: other.n });
		}

		for (context, followers) in &other.contexts {
			if let Some(existing) = self.contexts.get_mut(context) {
				existing.merge(followers);
			} else {
				self.contexts.insert(context.clone(), followers.clone());
			}
		}

		Ok(())
	}

	/// Serializes the model to `path` with `postcard`.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let path = path.as_ref();
		let bytes = postcard::to_stdvec(self)?;
		std::fs::write(path, bytes).map_err(|e| NgramError::from_io(path, e))?;
		debug!("saved model to {}", path.display());
		Ok(())
	}

	/// Loads a model previously written by [`NGramModel::save`].
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let bytes = std::fs::read(path).map_err(|e| NgramError::from_io(path, e))?;
		let model: Self = postcard::from_bytes(&bytes)?;
		if model.n == 0 {
			return Err(NgramError::InvalidOrder(0));
		}
		info!("loaded order-{} model with {} contexts from {}", model.n, model.len(), path.display());
		Ok(model)
	}

	/// Loads a model and checks that it has order `n`.
	pub fn load_with_order<P: AsRef<Path>>(path: P, n: usize) -> Result<Self> {
		let model = Self::load(path)?;
		if model.n != n {
			return Err(NgramError::OrderMismatch { expected: n, found: model.n });
		}
		Ok(model)
	}
}
