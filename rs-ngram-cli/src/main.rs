use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rs_ngram_core::io::{build_output_path, tokenize_directory, write_lines};
use rs_ngram_core::lexer::join_tokens;
use rs_ngram_core::model::ngram_model::NGramModel;
use rs_ngram_core::{AnalysisConfig, Analyzer, NgramError};

/// Tokenize a corpus of source files, train a token n-gram model on it and
/// annotate the input files with the most probable next tokens.
#[derive(Parser, Debug)]
#[command(name = "rs-ngram", version)]
struct Cli {
    /// Model order: number of tokens of context.
    order: usize,

    /// Folder holding the training source files.
    #[arg(long, default_value = "corpus")]
    corpus: PathBuf,

    /// Folder holding the source files to annotate.
    #[arg(long, default_value = "input")]
    input: PathBuf,

    /// Extension of the source files to pick up.
    #[arg(long, default_value = "java")]
    extension: String,

    /// File receiving the tokenized corpus.
    #[arg(long, default_value = "tokenized_output.txt")]
    corpus_output: PathBuf,

    /// File receiving the tokenized input.
    #[arg(long, default_value = "tokenized_java.txt")]
    input_output: PathBuf,

    /// Folder where every output file is written.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Save the trained model to this file.
    #[arg(long)]
    save_model: Option<PathBuf>,

    /// Use a previously saved model instead of training on the corpus.
    #[arg(long)]
    load_model: Option<PathBuf>,

    /// Train on a single thread.
    #[arg(long)]
    sequential: bool,
}

impl Cli {
    fn config(&self) -> Result<AnalysisConfig> {
        let mut config = AnalysisConfig::new(self.order)?;
        config.set_extension(&self.extension);
        config.parallel = !self.sequential;
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Fail on a bad order before touching any file
    let config = cli.config()?;

    // A saved model stands in for the corpus, which is then never read
    let corpus = match &cli.load_model {
        Some(_) => None,
        None => Some(tokenize_directory(&cli.corpus, config.extension())?),
    };
    let target = tokenize_directory(&cli.input, config.extension())?;

    if let Some(corpus) = &corpus {
        let corpus_path = cli.output_dir.join(&cli.corpus_output);
        let corpus_lines: Vec<String> = corpus.iter().map(|l| join_tokens(l)).collect();
        write_lines(&corpus_path, &corpus_lines)?;
        println!("All Files Tokenized. Output saved to {}", corpus_path.display());
    }

    let target_path = cli.output_dir.join(&cli.input_output);
    let target_lines: Vec<String> = target.iter().map(|l| join_tokens(l)).collect();
    write_lines(&target_path, &target_lines)?;
    println!("Input File Processed. Output saved to {}", target_path.display());

    let analyzer = match (&cli.load_model, corpus) {
        (Some(path), _) => Analyzer::from_model(NGramModel::load_with_order(path, config.order())?),
        (None, corpus) => Analyzer::train(&corpus.unwrap_or_default(), &config)?,
    };
    if let Some(path) = &cli.save_model {
        analyzer
            .model()
            .save(path)
            .with_context(|| format!("Failed to save model to {}", path.display()))?;
        info!("model saved to {}", path.display());
    }

    let annotation = analyzer.annotate_file(&target_path)?;
    let output_path = build_output_path(&target_path, "processed_")?;
    write_lines(&output_path, &annotation.render())?;
    println!("Processed file saved as: {}", output_path.display());

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<NgramError>() {
                Some(NgramError::MissingResource { path }) => {
                    eprintln!("Error: File '{}' not found.", path.display())
                }
                _ => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_batch_layout() {
        let cli = Cli::try_parse_from(["rs-ngram", "3"]).unwrap();
        assert_eq!(cli.order, 3);
        assert_eq!(cli.corpus, PathBuf::from("corpus"));
        assert_eq!(cli.input, PathBuf::from("input"));
        assert_eq!(cli.corpus_output, PathBuf::from("tokenized_output.txt"));
        assert_eq!(cli.input_output, PathBuf::from("tokenized_java.txt"));
        assert!(cli.config().unwrap().parallel);
    }

    #[test]
    fn rejects_non_numeric_order() {
        assert!(Cli::try_parse_from(["rs-ngram", "three"]).is_err());
        assert!(Cli::try_parse_from(["rs-ngram", "-1"]).is_err());
    }

    #[test]
    fn rejects_order_zero_before_reading_files() {
        let cli = Cli::try_parse_from(["rs-ngram", "0", "--corpus", "/nonexistent"]).unwrap();
        let err = run(&cli).unwrap_err();
        assert!(matches!(err.downcast_ref::<NgramError>(), Some(NgramError::InvalidOrder(0))));
    }

    #[test]
    fn writes_the_three_output_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("corpus")).unwrap();
        std::fs::create_dir_all(root.join("input")).unwrap();
        std::fs::write(root.join("corpus/A.java"), "x = y; // comment\n").unwrap();
        std::fs::write(root.join("input/B.java"), "x = y\n").unwrap();

        let root_arg = root.to_str().unwrap();
        let corpus = format!("{root_arg}/corpus");
        let input = format!("{root_arg}/input");
        let model = format!("{root_arg}/model.bin");
        let cli = Cli::try_parse_from([
            "rs-ngram",
            "1",
            "--corpus",
            corpus.as_str(),
            "--input",
            input.as_str(),
            "--output-dir",
            root_arg,
            "--save-model",
            model.as_str(),
        ])
        .unwrap();
        run(&cli).unwrap();

        let read = |name: &str| std::fs::read_to_string(root.join(name)).unwrap();
        assert_eq!(read("tokenized_output.txt"), "x = y ;\n");
        assert_eq!(read("tokenized_java.txt"), "x = y\n");
        assert!(read("processed_tokenized_java.txt").starts_with("x = y\nx = = y y ;\nTotal number of predictions: 3\n"));
        assert_eq!(NGramModel::load(root.join("model.bin")).unwrap().order(), 1);
    }

    #[test]
    fn loaded_model_does_not_need_the_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("corpus")).unwrap();
        std::fs::create_dir_all(root.join("input")).unwrap();
        std::fs::create_dir_all(root.join("second")).unwrap();
        std::fs::write(root.join("corpus/A.java"), "x = y;\n").unwrap();
        std::fs::write(root.join("input/B.java"), "x = y\n").unwrap();

        let root_arg = root.to_str().unwrap();
        let corpus = format!("{root_arg}/corpus");
        let input = format!("{root_arg}/input");
        let model = format!("{root_arg}/model.bin");
        let second = format!("{root_arg}/second");
        let train = Cli::try_parse_from([
            "rs-ngram",
            "1",
            "--corpus",
            corpus.as_str(),
            "--input",
            input.as_str(),
            "--output-dir",
            root_arg,
            "--save-model",
            model.as_str(),
        ])
        .unwrap();
        run(&train).unwrap();

        let missing = format!("{root_arg}/no-corpus");
        let reuse = Cli::try_parse_from([
            "rs-ngram",
            "1",
            "--corpus",
            missing.as_str(),
            "--input",
            input.as_str(),
            "--output-dir",
            second.as_str(),
            "--load-model",
            model.as_str(),
        ])
        .unwrap();
        run(&reuse).unwrap();

        let second = root.join("second");
        assert!(!second.join("tokenized_output.txt").exists());
        assert_eq!(
            std::fs::read_to_string(second.join("processed_tokenized_java.txt")).unwrap(),
            std::fs::read_to_string(root.join("processed_tokenized_java.txt")).unwrap()
        );
    }

    #[test]
    fn missing_input_folder_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("corpus")).unwrap();
        let root_arg = root.to_str().unwrap();
        let corpus = format!("{root_arg}/corpus");
        let input = format!("{root_arg}/input");
        let cli = Cli::try_parse_from([
            "rs-ngram",
            "2",
            "--corpus",
            corpus.as_str(),
            "--input",
            input.as_str(),
            "--output-dir",
            root_arg,
        ])
        .unwrap();

        let err = run(&cli).unwrap_err();
        assert!(matches!(err.downcast_ref::<NgramError>(), Some(NgramError::MissingResource { .. })));
        assert!(!root.join("tokenized_output.txt").exists());
    }

    #[test]
    fn extension_and_threads_flags() {
        let cli = Cli::try_parse_from(["rs-ngram", "2", "--extension", ".c", "--sequential"]).unwrap();
        let config = cli.config().unwrap();
        assert_eq!(config.extension(), "c");
        assert!(!config.parallel);
    }
}
