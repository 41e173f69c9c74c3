use std::sync::LazyLock;

use regex::Regex;

use super::Token;

/// Characters that form punctuation runs. Each run is exploded into
/// one token per character.
const PUNCTUATION: &str = r"(){}\[\];,.+\-*/=<>!";

/// Word characters: letters, numbers and underscore. Narrower than the
/// regex crate's `\w`, which also takes combining marks and connector
/// punctuation, so `e\u{301}` gives the word `e` followed by a skipped mark.
const WORD: &str = r"\p{L}\p{N}_";

/// Coarse scanner. Alternation order matters: the leftmost alternative that
/// matches at a position wins.
static SHAPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(&format!(
		r#"(?P<dquote>".*?")|(?P<word>[{WORD}]+)|(?P<punct>[{PUNCTUATION}]+)|(?P<squote>'.*?')"#
	))
	.expect("shape pattern is valid")
});

/// Splits the inside of a double-quoted string.
static QUOTED_INNER_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(&format!(r"[%{WORD}]+|[^{WORD}\s%]")).expect("quoted pattern is valid"));

/// One match of the coarse scanner, before any fragmenting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape<'a> {
	/// `"..."`, quotes included.
	DoubleQuoted(&'a str),
	/// `'...'`, quotes included.
	SingleQuoted(&'a str),
	/// Run of alphanumerics and underscores.
	Word(&'a str),
	/// Run of characters from the punctuation set.
	Punctuation(&'a str),
}

/// First pass: finds the four token shapes left to right.
///
/// Characters outside every shape (`@`, `#`, `$`, `~`, backtick, lone
/// unmatched quotes) are skipped.
pub fn scan_shapes(line: &str) -> Vec<Shape<'_>> {
	SHAPE_PATTERN
		.captures_iter(line)
		.filter_map(|caps| {
			if let Some(m) = caps.name("dquote") {
				Some(Shape::DoubleQuoted(m.as_str()))
			} else if let Some(m) = caps.name("word") {
				Some(Shape::Word(m.as_str()))
			} else if let Some(m) = caps.name("punct") {
				Some(Shape::Punctuation(m.as_str()))
			} else {
				caps.name("squote").map(|m| Shape::SingleQuoted(m.as_str()))
			}
		})
		.collect()
}

/// Second pass: turns one shape into its final tokens.
///
/// - punctuation runs become one token per character
/// - double-quoted strings are re-split on their contents and every piece
///   is re-wrapped in quotes, so `"foo bar"` gives `"foo"` and `"bar"`
///   (an empty `""` gives nothing)
/// - words pass through unchanged
/// - single-quoted literals are not re-split, they are only broken at
///   whitespace so that `'x y'` gives `'x` and `y'`, exactly what reading
///   the space-joined tokenized output back would give
pub fn fragment(shape: Shape<'_>, out: &mut Vec<Token>) {
	match shape {
		Shape::Punctuation(run) => out.extend(run.chars().map(String::from)),
		Shape::DoubleQuoted(quoted) => {
			let inner = &quoted[1..quoted.len() - 1];
			out.extend(
				QUOTED_INNER_PATTERN
					.find_iter(inner)
					.map(|m| format!("\"{}\"", m.as_str())),
			);
		}
		Shape::SingleQuoted(quoted) => out.extend(quoted.split_whitespace().map(str::to_owned)),
		Shape::Word(word) => out.push(word.to_owned()),
	}
}

/// Splits one comment-free line into tokens.
///
/// Never fails: malformed input (unterminated quotes, unknown symbols)
/// produces best-effort tokens.
pub fn tokenize_line(line: &str) -> Vec<Token> {
	let mut tokens = Vec::new();
	for shape in scan_shapes(line) {
		fragment(shape, &mut tokens);
	}
	tokens
}
