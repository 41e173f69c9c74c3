use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{NgramError, Result};
use crate::lexer::{self, TokenizedLine};

/// Reads a text file.
///
/// - Decodes as UTF-8
/// - Falls back to ISO-8859-1 if the bytes are not valid UTF-8 (every byte
///   maps to the code point of the same value, so this cannot fail)
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
	let path = path.as_ref();
	let bytes = fs::read(path).map_err(|e| NgramError::from_io(path, e))?;
	match String::from_utf8(bytes) {
		Ok(text) => Ok(text),
		Err(err) => {
			warn!("{} is not valid UTF-8, reading it as ISO-8859-1", path.display());
			Ok(err.into_bytes().iter().map(|&b| char::from(b)).collect())
		}
	}
}

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// Splits on `\n`, `\r\n` and a lone `\r`.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
	Ok(lexer::split_lines(&read_text(path)?).map(str::to_owned).collect())
}

/// Writes one physical line per entry, blank entries included.
pub fn write_lines<P, S>(path: P, lines: &[S]) -> Result<()>
where
	P: AsRef<Path>,
	S: AsRef<str>,
{
	let path = path.as_ref();
	let file = fs::File::create(path).map_err(|e| NgramError::from_io(path, e))?;
	let mut out = BufWriter::new(file);
	for line in lines {
		writeln!(out, "{}", line.as_ref()).map_err(|e| NgramError::from_io(path, e))?;
	}
	out.flush().map_err(|e| NgramError::from_io(path, e))?;
	Ok(())
}

/// Builds an output path by prefixing the file name.
///
/// Example:
/// `out/tokenized_java.txt` + `"processed_"` → `out/processed_tokenized_java.txt`
pub fn build_output_path<P: AsRef<Path>>(input_path: P, prefix: &str) -> Result<PathBuf> {
	let input_path = input_path.as_ref();
	let file_name = input_path.file_name().ok_or_else(|| NgramError::Io {
		path: input_path.to_path_buf(),
		source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "Input path has no filename"),
	})?;

	let mut output = input_path.parent().map(Path::to_path_buf).unwrap_or_default();
	output.push(format!("{}{}", prefix, file_name.to_string_lossy()));
	Ok(output)
}

/// Lists the files with a given extension directly inside a directory.
///
/// Returns full paths sorted by file name, so corpus order does not depend
/// on the file system. Subdirectories are ignored.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
	let dir = dir.as_ref();
	let extension = extension.trim_start_matches('.');
	let mut files = Vec::new();

	for entry in fs::read_dir(dir).map_err(|e| NgramError::from_io(dir, e))? {
		let path = entry.map_err(|e| NgramError::from_io(dir, e))?.path();
		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			files.push(path);
		}
	}

	files.sort();
	Ok(files)
}

/// Strips comments from and tokenizes one source file.
pub fn tokenize_file<P: AsRef<Path>>(path: P) -> Result<Vec<TokenizedLine>> {
	let path = path.as_ref();
	let lines = lexer::tokenize_source(&read_text(path)?);
	debug!("{}: {} tokenized lines", path.display(), lines.len());
	Ok(lines)
}

/// Tokenizes every matching file of a directory, in file name order.
///
/// Comment state restarts with each file.
pub fn tokenize_directory<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<TokenizedLine>> {
	let dir = dir.as_ref();
	let files = list_files(dir, extension)?;
	let mut lines = Vec::new();
	for file in &files {
		lines.extend(tokenize_file(file)?);
	}
	info!("tokenized {} .{} files from {} into {} lines", files.len(), extension, dir.display(), lines.len());
	Ok(lines)
}
