use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::info;

use summarizer::core::config::{AppConfig, default_max_length_from_env};
use summarizer::pipeline::local_summary;
use summarizer::utils::html::normalize_content;
use summarizer::{Summarizer, SummaryRequest, SummaryResult, SummarySource};

#[derive(Parser, Debug)]
#[command(name = "summarize", version, about = "Summarize an article into a short line")]
struct Args {
    /// Read content from this file instead of stdin
    #[arg(long)]
    file: Option<PathBuf>,

    /// Summary budget in characters (defaults to SUMMARY_DEFAULT_MAX_LENGTH)
    #[arg(long)]
    max_length: Option<usize>,

    /// Whole-call deadline in seconds (defaults to SUMMARY_DEADLINE_SECS)
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Skip the remote provider and use the local summarizer only
    #[arg(long)]
    local_only: bool,

    /// Print {text, source, remote_attempts} as JSON
    #[arg(long)]
    json: bool,
}

async fn read_content(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .context("failed to read stdin")?;
            Ok(content)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    summarizer::setup_logging();

    let args = Args::parse();
    let content = read_content(args.file.as_ref()).await?;

    let result = if args.local_only {
        let max_length = match args.max_length {
            Some(max_length) => max_length.max(1),
            None => default_max_length_from_env()?,
        };
        SummaryResult {
            text: local_summary(&normalize_content(&content), max_length),
            source: SummarySource::Local,
            remote_attempts: 0,
        }
    } else {
        let config = AppConfig::from_env()?;
        let summarizer = Summarizer::from_config(&config)?;
        let max_length = args.max_length.unwrap_or(summarizer.default_max_length());
        let deadline = args
            .deadline_secs
            .map_or(config.default_deadline, Duration::from_secs);

        info!(max_length, deadline_secs = deadline.as_secs(), "Summarizing input");
        let result = summarizer
            .summarize(SummaryRequest::new(content, max_length), deadline)
            .await;
        info!(stats = ?summarizer.stats(), "Pipeline counters");
        result
    };

    if args.json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        println!("{}", result.text);
    }

    Ok(())
}
