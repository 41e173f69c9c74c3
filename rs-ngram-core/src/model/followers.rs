use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::lexer::Token;

use super::prediction::Candidate;

/// Tokens observed right after one context, with their counts.
///
/// Conceptually the multiset of followers of a context, stored as a
/// frequency table that remembers the order in which each distinct token
/// was first seen. That order breaks ties when ranking.
///
/// ## Invariants
/// - Each token appears at most once
/// - Every count is strictly positive
///
/// Two tables are equal only if they hold the same counts in the same
/// first-seen order.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Followers {
	/// token -> count, in first-seen order.
	/// Example: {"b": 2, "c": 1}
	counts: IndexMap<Token, usize>,
}

impl PartialEq for Followers {
	fn eq(&self, other: &Self) -> bool {
		self.counts.iter().eq(other.counts.iter())
	}
}

impl Eq for Followers {}

impl Followers {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one more occurrence of `token`.
	///
	/// - If the token is already known, its count is increased.
	/// - Otherwise it is appended with a count of 1.
	pub fn add(&mut self, token: &str) {
		self.add_count(token, 1);
	}

	fn add_count(&mut self, token: &str, count: usize) {
		match self.counts.get_mut(token) {
			Some(existing) => *existing += count,
			None => {
				self.counts.insert(token.to_owned(), count);
			}
		}
	}

	/// How many times `token` followed the context.
	pub fn count(&self, token: &str) -> usize {
		self.counts.get(token).copied().unwrap_or(0)
	}

	/// Size of the multiset (sum of all counts).
	pub fn total(&self) -> usize {
		self.counts.values().sum()
	}

	/// Number of distinct follower tokens.
	pub fn distinct(&self) -> usize {
		self.counts.len()
	}

	/// Iterates `(token, count)` in first-seen order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.counts.iter().map(|(token, count)| (token.as_str(), *count))
	}

	/// The `limit` most frequent followers, highest count first.
	///
	/// The sort is stable, so equal counts keep first-seen order.
	pub fn ranked(&self, limit: usize) -> Vec<Candidate> {
		let mut ranked: Vec<(&Token, &usize)> = self.counts.iter().collect();
		ranked.sort_by(|a, b| b.1.cmp(a.1));
		ranked
			.into_iter()
			.take(limit)
			.map(|(token, count)| Candidate { token: token.clone(), count: *count })
			.collect()
	}

	/// Adds every count of `other` into this table.
	///
	/// Tokens unknown to `self` are appended in `other`'s order, so merging
	/// tables built from consecutive corpus slices gives the same table as
	/// counting the whole corpus at once.
	pub fn merge(&mut self, other: &Self) {
		for (token, &count) in &other.counts {
			self.add_count(token, count);
		}
	}
}
