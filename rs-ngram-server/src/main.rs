use std::path::PathBuf;

use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, post, web};
use anyhow::Context;
use clap::Parser;
use log::info;
use serde::{Deserialize, Serialize};

use rs_ngram_core::lexer::Token;
use rs_ngram_core::model::ngram_model::NGramModel;
use rs_ngram_core::{AnalysisConfig, Analyzer};

/// Command line of the server.
#[derive(Parser, Debug)]
#[command(name = "rs-ngram-server", about = "Serve next-token predictions over HTTP")]
struct Args {
	/// Folder holding the training source files.
	#[arg(long, default_value = "corpus")]
	corpus: PathBuf,

	/// Extension of the source files to pick up.
	#[arg(long, default_value = "java")]
	extension: String,

	/// Model order: number of tokens of context.
	#[arg(long, default_value_t = 2)]
	order: usize,

	/// Use a previously saved model instead of training on the corpus.
	#[arg(long)]
	load_model: Option<PathBuf>,

	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	#[arg(long, default_value_t = 5000)]
	port: u16,
}

/// Query parameters for the `/v1/predict` endpoint
#[derive(Deserialize)]
struct PredictParams {
	/// Space separated context tokens
	context: Option<String>,
}

/// One ranked candidate as returned to clients
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct CandidateBody {
	token: String,
	count: usize,
	percentage: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct ModelBody {
	order: usize,
	contexts: usize,
}

/// HTTP GET endpoint `/v1/predict`
///
/// Returns the top candidates following the given context, or an empty
/// list when the context was never seen (or has the wrong length).
#[get("/v1/predict")]
async fn get_prediction(data: web::Data<Analyzer>, query: web::Query<PredictParams>) -> impl Responder {
	let context: Vec<Token> = match &query.context {
		Some(s) if !s.trim().is_empty() => s.split_whitespace().map(str::to_owned).collect(),
		_ => return HttpResponse::BadRequest().body("Missing or empty context"),
	};

	let prediction = data.predict(&context);
	let body: Vec<CandidateBody> = prediction
		.candidates()
		.iter()
		.map(|candidate| CandidateBody {
			token: candidate.token.clone(),
			count: candidate.count,
			percentage: prediction.percentage(candidate),
		})
		.collect();
	HttpResponse::Ok().json(body)
}

/// HTTP POST endpoint `/v1/annotate`
///
/// Takes raw source text, strips comments, tokenizes it and returns the
/// annotated report, one line per output line.
#[post("/v1/annotate")]
async fn post_annotate(data: web::Data<Analyzer>, body: String) -> impl Responder {
	let annotation = data.annotate_source(&body);
	HttpResponse::Ok()
		.content_type("text/plain; charset=utf-8")
		.body(annotation.render().join("\n"))
}

/// HTTP GET endpoint `/v1/model`
#[get("/v1/model")]
async fn get_model(data: web::Data<Analyzer>) -> impl Responder {
	HttpResponse::Ok().json(ModelBody { order: data.order(), contexts: data.model().len() })
}

fn build_analyzer(args: &Args) -> anyhow::Result<Analyzer> {
	let mut config = AnalysisConfig::new(args.order)?;
	config.set_extension(&args.extension);

	let analyzer = match &args.load_model {
		Some(path) => Analyzer::from_model(
			NGramModel::load_with_order(path, config.order())
				.with_context(|| format!("Failed to load model {}", path.display()))?,
		),
		None => Analyzer::from_corpus_dir(&args.corpus, &config)
			.with_context(|| format!("Failed to train on {}", args.corpus.display()))?,
	};
	Ok(analyzer)
}

/// Main entry point for the server.
///
/// Trains (or loads) the model once, then shares it read-only between
/// workers: no lock is needed since nothing mutates it afterwards.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let args = Args::parse();
	let analyzer = web::Data::new(build_analyzer(&args)?);
	info!(
		"serving order-{} model ({} contexts) on {}:{}",
		analyzer.order(),
		analyzer.model().len(),
		args.host,
		args.port
	);

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.app_data(analyzer.clone())
			.service(get_prediction)
			.service(post_annotate)
			.service(get_model)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::{http::StatusCode, test};
	use rs_ngram_core::lexer::tokenize_source;

	fn analyzer() -> web::Data<Analyzer> {
		let corpus = tokenize_source("x = y;\nx = z;\nx = y;\n");
		let mut config = AnalysisConfig::new(1).unwrap();
		config.parallel = false;
		web::Data::new(Analyzer::train(&corpus, &config).unwrap())
	}

	#[actix_web::test]
	async fn predicts_ranked_candidates() {
		let app = test::init_service(App::new().app_data(analyzer()).service(get_prediction)).await;
		let req = test::TestRequest::get().uri("/v1/predict?context=%3D").to_request();
		let body: Vec<CandidateBody> = test::call_and_read_body_json(&app, req).await;

		assert_eq!(body.len(), 2);
		assert_eq!(body[0].token, "y");
		assert_eq!(body[0].count, 2);
		assert_eq!(body[1].token, "z");
	}

	#[actix_web::test]
	async fn unknown_context_gives_an_empty_list() {
		let app = test::init_service(App::new().app_data(analyzer()).service(get_prediction)).await;
		let req = test::TestRequest::get().uri("/v1/predict?context=x+%3D").to_request();
		let body: Vec<CandidateBody> = test::call_and_read_body_json(&app, req).await;
		assert!(body.is_empty());
	}

	#[actix_web::test]
	async fn empty_context_is_rejected() {
		let app = test::init_service(App::new().app_data(analyzer()).service(get_prediction)).await;
		let req = test::TestRequest::get().uri("/v1/predict").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn annotates_posted_source() {
		let app = test::init_service(App::new().app_data(analyzer()).service(post_annotate)).await;
		let req = test::TestRequest::post().uri("/v1/annotate").set_payload("x = w; // note\n").to_request();
		let body = test::call_and_read_body(&app, req).await;
		let text = String::from_utf8(body.to_vec()).unwrap();
		let lines: Vec<&str> = text.split('\n').collect();

		assert_eq!(lines[0], "x = w ;");
		assert_eq!(lines[1], "x = = y w ;");
		assert_eq!(lines[2], "Total number of predictions: 2");
		assert_eq!(lines[3], "x : (= 100.00%)");
		assert_eq!(lines[4], "= : (y 66.67%, z 33.33%)");
	}

	#[actix_web::test]
	async fn reports_model_shape() {
		let app = test::init_service(App::new().app_data(analyzer()).service(get_model)).await;
		let req = test::TestRequest::get().uri("/v1/model").to_request();
		let body: ModelBody = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body, ModelBody { order: 1, contexts: 4 });
	}
}
