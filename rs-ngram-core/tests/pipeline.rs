//! End-to-end runs over temporary corpus/input folders.

use std::fs;

use rs_ngram_core::io::{build_output_path, read_lines, tokenize_directory, write_lines};
use rs_ngram_core::lexer::join_tokens;
use rs_ngram_core::{AnalysisConfig, Analyzer, NgramError};
use tempfile::TempDir;

fn write(dir: &TempDir, sub: &str, name: &str, body: &str) {
	let folder = dir.path().join(sub);
	fs::create_dir_all(&folder).unwrap();
	fs::write(folder.join(name), body).unwrap();
}

#[test]
fn tokenize_train_and_annotate() {
	let dir = TempDir::new().unwrap();
	write(&dir, "corpus", "A.java", "/**\n * Adds.\n */\nint add(int a, int b) {\n\treturn a + b; // sum\n}\n");
	write(&dir, "corpus", "B.java", "int sub(int a, int b) {\n\treturn a - b;\n}\n");
	write(&dir, "corpus", "README.md", "int ignored ;\n");
	write(&dir, "input", "C.java", "int mul(int a, int b) {\n\treturn a * b;\n}\n");

	let corpus = tokenize_directory(dir.path().join("corpus"), "java").unwrap();
	let corpus_lines: Vec<String> = corpus.iter().map(|l| join_tokens(l)).collect();
	assert_eq!(
		corpus_lines,
		vec![
			"int add ( int a , int b ) {",
			"return a + b ;",
			"}",
			"int sub ( int a , int b ) {",
			"return a - b ;",
			"}",
		]
	);

	let target = tokenize_directory(dir.path().join("input"), "java").unwrap();
	let target_lines: Vec<String> = target.iter().map(|l| join_tokens(l)).collect();
	let target_path = dir.path().join("tokenized_java.txt");
	write_lines(&target_path, &target_lines).unwrap();

	let mut config = AnalysisConfig::new(2).unwrap();
	config.parallel = false;
	let analyzer = Analyzer::train(&corpus, &config).unwrap();
	let rendered = analyzer.annotate_file(&target_path).unwrap().render();

	let output_path = build_output_path(&target_path, "processed_").unwrap();
	write_lines(&output_path, &rendered).unwrap();
	let written = read_lines(&output_path).unwrap();

	assert_eq!(written[0], "int mul ( int a , int b ) {");
	// "int mul" is unseen, "( int" -> "a", "int a" -> ",", "a ," -> "int", ", int" -> "b", "int b" -> ")", "b )" -> "{"
	assert_eq!(written[1], "int mul ( int a a , , int int b b ) ) { {");
	assert_eq!(written[2], "Total number of predictions: 6");
	assert_eq!(written[3], "( int : (a 100.00%)");
	assert_eq!(written[8], "b ) : ({ 100.00%)");
	assert_eq!(&written[9..11], &["", ""]);

	// "return a" is followed by "+" then "-": equal counts, first seen wins
	assert_eq!(written[11], "return a * b ;");
	assert_eq!(written[12], "return a + * b ;");
	assert_eq!(written[14], "return a : (+ 50.00%, - 50.00%)");
}

#[test]
fn missing_input_folder_aborts() {
	let dir = TempDir::new().unwrap();
	let err = tokenize_directory(dir.path().join("input"), "java").unwrap_err();
	assert!(matches!(err, NgramError::MissingResource { .. }));
}

#[test]
fn percentages_only_cover_the_shortlist() {
	let corpus: Vec<Vec<String>> = ["k a", "k a", "k b", "k c", "k d", "k e"]
		.iter()
		.map(|l| l.split_whitespace().map(str::to_owned).collect())
		.collect();
	let mut config = AnalysisConfig::new(1).unwrap();
	config.parallel = false;
	let analyzer = Analyzer::train(&corpus, &config).unwrap();

	let rendered = analyzer.annotate(&["k"]).render();
	assert_eq!(rendered[3], "k : (a 50.00%, b 25.00%, c 25.00%)");
}
