//! Command-line uploader: validates an image locally, sends it to a
//! running server and prints the ranked results.
//!
//! Local validation uses the same `upload.*` settings as the server
//! (`config/default.toml`, `config/local.toml`, `EMOTION_LENS__*`), or the
//! file given with `--config`.

use clap::Parser;
use emotion_lens::core::session::UploadSession;
use emotion_lens::core::ResultsView;
use emotion_lens::services::{guess_content_type, UploadClient};
use emotion_lens::config::Settings;
use emotion_lens::ImageUpload;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "emotion-lens-client")]
#[command(about = "Upload an image and print its mocked emotion analysis")]
struct Cli {
    /// Image to analyze (JPEG, PNG or WebP)
    path: PathBuf,

    /// Server root URL
    #[arg(short, long, default_value = "http://localhost:5000")]
    server: String,

    /// Fixed seed for a repeatable ranking
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file to read upload limits from
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let data = match std::fs::read(&cli.path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Cannot read {}: {}", cli.path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let filename = cli
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let upload = ImageUpload::new(filename, guess_content_type(&cli.path), data);

    let mut session = UploadSession::new(settings.upload.limits());
    if let Err(e) = session.select(upload) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let client = match UploadClient::new(&cli.server) {
        Ok(client) => client.with_seed(cli.seed),
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Analyzing...");
    match session.analyze(&client).await {
        Ok(results) => {
            if let Some(view) = ResultsView::build(results) {
                print!("{}", view);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to analyze image. Please try again. ({})", e);
            ExitCode::FAILURE
        }
    }
}
