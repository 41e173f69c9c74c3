use serde::{Deserialize, Serialize};

use crate::lexer::Token;

/// Maximum number of candidates returned for one context.
pub const MAX_CANDIDATES: usize = 3;

/// A follower token and how many times it was observed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
	pub token: Token,
	pub count: usize,
}

/// Ranked shortlist of next-token candidates for one context.
///
/// Sorted by descending count, ties in first-seen order. Holds at most
/// [`MAX_CANDIDATES`] entries and is empty when the context is unknown.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Prediction {
	candidates: Vec<Candidate>,
}

impl Prediction {
	pub(crate) fn new(candidates: Vec<Candidate>) -> Self {
		Self { candidates }
	}

	pub fn is_empty(&self) -> bool {
		self.candidates.is_empty()
	}

	pub fn len(&self) -> usize {
		self.candidates.len()
	}

	pub fn candidates(&self) -> &[Candidate] {
		&self.candidates
	}

	/// Most probable candidate, if any.
	pub fn top(&self) -> Option<&Candidate> {
		self.candidates.first()
	}

	/// Sum of the counts of the shortlisted candidates only.
	pub fn shortlist_total(&self) -> usize {
		self.candidates.iter().map(|c| c.count).sum()
	}

	/// Share of `candidate` in the shortlist, in percent.
	///
	/// The denominator is [`Prediction::shortlist_total`], not the number of
	/// times the context was seen: with more than three distinct followers
	/// the figures overstate each candidate's corpus-wide frequency.
	pub fn percentage(&self, candidate: &Candidate) -> f64 {
		let total = self.shortlist_total();
		if total == 0 {
			return 0.0;
		}
		(100 * candidate.count) as f64 / total as f64
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn candidate(token: &str, count: usize) -> Candidate {
		Candidate { token: token.to_owned(), count }
	}

	#[test]
	fn percentages_are_relative_to_the_shortlist() {
		let prediction = Prediction::new(vec![candidate("a", 2), candidate("b", 1), candidate("c", 1)]);
		assert_eq!(prediction.shortlist_total(), 4);
		assert_eq!(prediction.percentage(&prediction.candidates()[0]), 50.0);
		assert_eq!(prediction.percentage(&prediction.candidates()[2]), 25.0);
		assert_eq!(prediction.top().map(|c| c.token.as_str()), Some("a"));
	}

	#[test]
	fn empty_prediction_has_no_top() {
		let prediction = Prediction::default();
		assert!(prediction.is_empty());
		assert!(prediction.top().is_none());
	}
}
