use log::debug;

use super::ngram_model::NGramModel;
use super::prediction::Prediction;
use crate::lexer::Token;

/// Result of annotating one non-blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedLine {
	/// Input tokens joined by single spaces.
	pub original: String,
	/// Input tokens with every inserted prediction, space joined.
	pub annotated: String,
	/// Number of predicted tokens inserted.
	pub insertions: usize,
	/// One `context : (tok pct%, ...)` entry per insertion, in position order.
	pub report: Vec<String>,
}

impl AnnotatedLine {
	/// Output lines for this input line, separators included.
	pub fn render_into(&self, out: &mut Vec<String>) {
		out.push(self.original.clone());
		out.push(self.annotated.clone());
		if self.insertions > 0 {
			out.push(format!("Total number of predictions: {}", self.insertions));
		}
		out.extend(self.report.iter().cloned());
		out.push(String::new());
		out.push(String::new());
	}
}

/// Annotation outcome for one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAnnotation {
	/// The input line was blank; it is echoed as a single empty line.
	Blank,
	Annotated(AnnotatedLine),
}

/// Annotation of a whole target text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
	pub lines: Vec<LineAnnotation>,
}

impl Annotation {
	/// Total insertions over all lines.
	pub fn insertions(&self) -> usize {
		self.lines
			.iter()
			.map(|line| match line {
				LineAnnotation::Blank => 0,
				LineAnnotation::Annotated(annotated) => annotated.insertions,
			})
			.sum()
	}

	/// The output text, one entry per physical line.
	pub fn render(&self) -> Vec<String> {
		let mut out = Vec::new();
		for line in &self.lines {
			match line {
				LineAnnotation::Blank => out.push(String::new()),
				LineAnnotation::Annotated(annotated) => annotated.render_into(&mut out),
			}
		}
		out
	}
}

/// Formats one report entry: `a b : (x 50.00%, y 25.00%, z 25.00%)`.
pub fn report_entry(context: &[Token], prediction: &Prediction) -> String {
	let options: Vec<String> = prediction
		.candidates()
		.iter()
		.map(|candidate| format!("{} {:.2}%", candidate.token, prediction.percentage(candidate)))
		.collect();
	format!("{} : ({})", context.join(" "), options.join(", "))
}

/// Annotates one tokenized line.
///
/// For each position the context is the current token and up to `n - 1`
/// tokens before it. When the model knows that context, its top candidate
/// is inserted right after the current token (shifted by the insertions
/// already made on this line) and a report entry is recorded. Inserted
/// tokens never become part of a later context, and a prediction that
/// repeats the next real token is inserted anyway.
pub fn annotate_line(tokens: &[Token], model: &NGramModel) -> AnnotatedLine {
	let n = model.order();
	let mut annotated: Vec<Token> = tokens.to_vec();
	// 1 means no insertion yet
	let mut offset = 1;
	let mut report = Vec::new();

	for index in 0..tokens.len() {
		let context = &tokens[(index + 1).saturating_sub(n)..=index];
		let prediction = model.predict(context);

		if let Some(top) = prediction.top() {
			annotated.insert(index + offset, top.token.clone());
			offset += 1;
			report.push(report_entry(context, &prediction));
		}
	}

	AnnotatedLine {
		original: tokens.join(" "),
		annotated: annotated.join(" "),
		insertions: offset - 1,
		report,
	}
}

/// Annotates every line of a tokenized target text.
///
/// Lines are split on whitespace; blank lines are kept as
/// [`LineAnnotation::Blank`]. The context length is the model's order.
pub fn annotate<S: AsRef<str>>(lines: &[S], model: &NGramModel) -> Annotation {
	let lines: Vec<LineAnnotation> = lines
		.iter()
		.map(|line| {
			let tokens: Vec<Token> = line.as_ref().split_whitespace().map(str::to_owned).collect();
			if tokens.is_empty() {
				LineAnnotation::Blank
			} else {
				LineAnnotation::Annotated(annotate_line(&tokens, model))
			}
		})
		.collect();

	let annotation = Annotation { lines };
	debug!("annotated {} lines with {} predictions", annotation.lines.len(), annotation.insertions());
	annotation
}
