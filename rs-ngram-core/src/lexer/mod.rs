//! Source text to token stream.
//!
//! Two stages run per line:
//! - `comments` removes `//` and `/* ... */` comments, carrying block state
//!   from one line to the next
//! - `tokenizer` splits what is left into language-agnostic tokens

/// Line and block comment removal.
pub mod comments;

/// Heuristic, C-family flavoured tokenizer.
pub mod tokenizer;

/// A single token. Never empty, never contains whitespace.
pub type Token = String;

/// Tokens of one non-empty, comment-free source line.
///
/// Empty only when the line held nothing but stray symbols (`@`, `#`),
/// which the tokenizer drops.
pub type TokenizedLine = Vec<Token>;

/// Splits `text` into lines ending in `\n`, `\r\n` or a lone `\r`.
///
/// Like [`str::lines`], a final line terminator does not produce an extra
/// empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
	let mut rest = text;
	std::iter::from_fn(move || {
		if rest.is_empty() {
			return None;
		}
		let line = match rest.find(['\r', '\n']) {
			Some(end) => {
				let line = &rest[..end];
				let width = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
				rest = &rest[end + width..];
				line
			}
			None => std::mem::take(&mut rest),
		};
		Some(line)
	})
}

/// Strips comments from every line of `text` and tokenizes what remains.
///
/// Comment state starts fresh, so call this once per source file.
/// Lines that are empty after stripping produce nothing. A line made of
/// stray symbols only still yields an (empty) entry, and shows up as a
/// blank line in the tokenized output.
pub fn tokenize_source(text: &str) -> Vec<TokenizedLine> {
	comments::strip_comments(split_lines(text))
		.into_iter()
		.map(tokenizer::tokenize_line)
		.collect()
}

/// Joins a tokenized line with single spaces, the on-disk corpus format.
pub fn join_tokens(tokens: &[Token]) -> String {
	tokens.join(" ")
}
