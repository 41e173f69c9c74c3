use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lexer::Token;

/// Lookup key of the n-gram model: an ordered run of exactly `n` tokens.
///
/// Equality and hashing are structural and order-sensitive. The key
/// borrows as `[Token]`, so the model can be queried with a plain slice.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Context(Vec<Token>);

impl Context {
	/// Copies a window of tokens into an owned key.
	pub fn new(tokens: &[Token]) -> Self {
		Self(tokens.to_vec())
	}
}

impl Borrow<[Token]> for Context {
	fn borrow(&self) -> &[Token] {
		&self.0
	}
}

impl fmt::Display for Context {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0.join(" "))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn tokens(s: &str) -> Vec<Token> {
		s.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn slice_lookup_matches_owned_key() {
		let mut map = HashMap::new();
		map.insert(Context::new(&tokens("a b")), 1);
		assert_eq!(map.get(tokens("a b").as_slice()), Some(&1));
		assert_eq!(map.get(tokens("b a").as_slice()), None);
	}

	#[test]
	fn displays_space_joined() {
		assert_eq!(Context::new(&tokens("x = y")).to_string(), "x = y");
	}
}
