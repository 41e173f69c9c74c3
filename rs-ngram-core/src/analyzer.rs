use std::path::Path;

use log::info;

use crate::config::AnalysisConfig;
use crate::error::{NgramError, Result};
use crate::io;
use crate::lexer::{self, Token, TokenizedLine};
use crate::model::annotator::{self, Annotation};
use crate::model::ngram_model::NGramModel;
use crate::model::prediction::Prediction;

/// High-level entry point: a trained model plus the operations run on it.
///
/// # Responsibilities
/// - Train the model from a tokenized corpus or a corpus folder
/// - Answer next-token queries
/// - Annotate tokenized or raw target text
///
/// The model is never mutated after construction, so an `Analyzer` can be
/// shared read-only between threads.
#[derive(Debug, Clone)]
pub struct Analyzer {
	model: NGramModel,
}

impl Analyzer {
	/// Trains on an already tokenized corpus.
	pub fn train(corpus: &[TokenizedLine], config: &AnalysisConfig) -> Result<Self> {
		let model = if config.parallel {
			NGramModel::train_parallel(corpus, config.order())?
		} else {
			NGramModel::train(corpus, config.order())?
		};
		Ok(Self { model })
	}

	/// Tokenizes every matching file of `corpus_dir` and trains on the result.
	///
	/// # Errors
	/// - Returns an error if the folder does not exist or is not a directory.
	/// - Returns an error if a file fails to load.
	pub fn from_corpus_dir<P: AsRef<Path>>(corpus_dir: P, config: &AnalysisConfig) -> Result<Self> {
		let corpus_dir = corpus_dir.as_ref();
		if !corpus_dir.is_dir() {
			return Err(NgramError::MissingResource { path: corpus_dir.to_path_buf() });
		}
		let corpus = io::tokenize_directory(corpus_dir, config.extension())?;
		Self::train(&corpus, config)
	}

	/// Wraps an existing model (loaded from disk for instance).
	pub fn from_model(model: NGramModel) -> Self {
		Self { model }
	}

	pub fn model(&self) -> &NGramModel {
		&self.model
	}

	pub fn order(&self) -> usize {
		self.model.order()
	}

	/// Top candidates following `context`.
	pub fn predict(&self, context: &[Token]) -> Prediction {
		self.model.predict(context)
	}

	/// Annotates tokenized target lines (space separated tokens).
	pub fn annotate<S: AsRef<str>>(&self, lines: &[S]) -> Annotation {
		annotator::annotate(lines, &self.model)
	}

	/// Strips comments from raw source text, tokenizes it and annotates it.
	pub fn annotate_source(&self, text: &str) -> Annotation {
		let lines: Vec<String> = lexer::tokenize_source(text).iter().map(|l| lexer::join_tokens(l)).collect();
		self.annotate(&lines)
	}

	/// Reads a tokenized target file and annotates it.
	///
	/// Nothing is produced if the file cannot be read.
	pub fn annotate_file<P: AsRef<Path>>(&self, path: P) -> Result<Annotation> {
		let path = path.as_ref();
		let lines = io::read_lines(path)?;
		let annotation = self.annotate(&lines);
		info!("{}: {} predictions over {} lines", path.display(), annotation.insertions(), lines.len());
		Ok(annotation)
	}
}
