/// Comment tracking state carried from one line to the next within a
/// single source file.
///
/// Start every file from `CommentState::default()`; the value returned by
/// [`strip_line`] is fed into the call for the following line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CommentState {
	in_block: bool,
}

impl CommentState {
	/// Returns `true` while inside an unterminated `/* ... */` comment.
	pub fn in_block(&self) -> bool {
		self.in_block
	}
}

/// Removes comments from one raw line.
///
/// Returns the state for the next line, and the trimmed code left on this
/// line (`None` if nothing but comments or whitespace remains).
///
/// Processing order on a line:
/// 1. inside a block: keep only what follows the first `*/`, or drop the
///    whole line if there is none
/// 2. cut at the first `//`
/// 3. cut at the first `/*` and enter block state
///
/// Since step 2 runs before step 3, a `/*` behind `//` never opens a block.
/// A block opened in step 3 is never closed on the same line: anything
/// after the `/*`, a `*/` included, is dropped and the block stays open.
pub fn strip_line(state: CommentState, line: &str) -> (CommentState, Option<&str>) {
	let mut in_block = state.in_block;
	let mut code = line;

	if in_block {
		match code.split_once("*/") {
			Some((_, after)) => {
				in_block = false;
				code = after;
			}
			None => return (CommentState { in_block }, None),
		}
	}

	if let Some((before, _)) = code.split_once("//") {
		code = before;
	}

	if let Some((before, _)) = code.split_once("/*") {
		in_block = true;
		code = before;
	}

	let code = code.trim();
	let code = if code.is_empty() { None } else { Some(code) };
	(CommentState { in_block }, code)
}

/// Applies [`strip_line`] over all lines of one file.
///
/// Returns the surviving code, one entry per line that kept any.
pub fn strip_comments<'a, I>(lines: I) -> Vec<&'a str>
where
	I: IntoIterator<Item = &'a str>,
{
	let mut state = CommentState::default();
	lines
		.into_iter()
		.filter_map(|line| {
			let (next, code) = strip_line(state, line);
			state = next;
			code
		})
		.collect()
}
