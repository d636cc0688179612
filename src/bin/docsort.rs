//! docsort: classify documents from the command line.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use docsort::config::{Config, Secrets};
use docsort::store::MemoryStore;
use docsort::{ClassificationResult, DocumentService};

/// docsort CLI
#[derive(Parser)]
#[command(name = "docsort")]
#[command(version = docsort::PKG_VERSION)]
#[command(about = "Chunked zero-shot document classification")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "DOCSORT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify files (.txt, .pdf, .docx), one JSON object per line
    Classify {
        /// Files to classify
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Load and validate configuration, then print the effective settings
    CheckConfig,
}

#[derive(Serialize)]
struct FileResult<'a> {
    file: &'a str,
    #[serde(flatten)]
    result: ClassificationResult,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Default: warn for CLI; override with RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    match args.command {
        Command::CheckConfig => {
            let engine = config.engine_config()?;
            println!("docsort {}", docsort::version_string());
            println!("categories:     {}", engine.categories.labels().join(", "));
            println!("fallback:       {}", engine.categories.fallback());
            println!("max_chunk_size: {}", engine.max_chunk_size);
            println!("chunk_overlap:  {}", engine.chunk_overlap);
            println!("threshold:      {}", engine.low_confidence_threshold);
            println!("concurrency:    {}", engine.max_concurrent_chunks);
            match engine.chunk_timeout {
                Some(t) => println!("chunk_timeout:  {t:?}"),
                None => println!("chunk_timeout:  none"),
            }
            println!("model:          {}", config.huggingface.model);
            println!("cache:          {}", if config.cache.is_some() { "on" } else { "off" });
        }

        Command::Classify { files } => {
            let secrets = Secrets::load()?;
            let engine = config.build_engine(&secrets)?;
            let service = DocumentService::new(engine, Arc::new(MemoryStore::new()));

            let mut failures = 0usize;
            for path in &files {
                let display = path.display().to_string();
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();

                let outcome = match tokio::fs::read(path).await {
                    Ok(bytes) => service.classify_file(&filename, bytes).await,
                    Err(e) => Err(docsort::DocsortError::InvalidInput(format!(
                        "cannot read {display}: {e}"
                    ))),
                };

                match outcome {
                    Ok(result) => {
                        let line = serde_json::to_string(&FileResult {
                            file: &display,
                            result,
                        })?;
                        println!("{line}");
                    }
                    Err(e) => {
                        eprintln!("{display}: {e}");
                        failures += 1;
                    }
                }
            }

            if failures > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
