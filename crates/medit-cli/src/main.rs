//! Command-line job submission and tracking binary.
//!
//! Usage: `medit <video-file> [style] [output-file]`
//!
//! Submits the video to the processing backend, follows the job's status
//! until it completes or fails, and optionally downloads the processed
//! video.

use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use medit_client::{BackendConfig, JobClient, JobTracker};
use medit_models::{JobStatus, Style};

struct CliArgs {
    input: PathBuf,
    style: Style,
    output: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut args = std::env::args().skip(1);

    let input = match args.next() {
        Some(path) => PathBuf::from(path),
        None => bail!(
            "usage: medit <video-file> [style] [output-file]\n       styles: {}",
            Style::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };

    let style = match args.next() {
        Some(s) => s.parse::<Style>()?,
        None => Style::default(),
    };

    let output = args.next().map(PathBuf::from);

    Ok(CliArgs {
        input,
        style,
        output,
    })
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("medit=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    match run(args).await {
        // Backend-reported processing failure: already rendered, distinct
        // from a transport error.
        Ok(false) => std::process::exit(1),
        Ok(true) => {}
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    }
}

async fn run(args: CliArgs) -> anyhow::Result<bool> {
    let config = BackendConfig::from_env();
    info!(base_url = %config.base_url, style = %args.style, "Starting medit");

    let client = JobClient::new(config)?;

    if !client.health_check().await? {
        warn!("Backend health check failed, submitting anyway");
    }

    let video = tokio::fs::read(&args.input)
        .await
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let file_name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.mp4".to_string());

    let tracker = JobTracker::new(client);
    let mut updates = tracker.subscribe();

    let record = tracker
        .submit(file_name, video, args.style)
        .await
        .context("job submission failed")?;
    info!(job_id = %record.job_id, status = %record.status, "Job submitted");

    let final_record = loop {
        if updates.changed().await.is_err() {
            bail!("job tracker went away");
        }
        let Some(job) = updates.borrow_and_update().clone() else {
            continue;
        };
        info!(
            job_id = %job.job_id,
            status = %job.status,
            progress = job.status.progress_percent(),
            "{}",
            job.status.label()
        );
        if job.is_terminal() {
            break job;
        }
    };

    match final_record.status {
        JobStatus::Completed => {
            let Some(fragment) = final_record.processed_video.as_deref() else {
                bail!("job completed without a processed video reference");
            };
            let url = tracker.client().resolve_artifact(fragment)?;
            info!(%url, "Processed video ready");

            if let Some(dest) = &args.output {
                tracker
                    .client()
                    .download_artifact(fragment, dest)
                    .await
                    .context("failed to download processed video")?;
                info!(dest = %dest.display(), "Saved processed video");
            }
            Ok(true)
        }
        JobStatus::Failed => {
            error!(
                job_id = %final_record.job_id,
                "Processing failed: {}",
                final_record.message.as_deref().unwrap_or("no details from backend")
            );
            Ok(false)
        }
        other => bail!("polling stopped on non-terminal status {other}"),
    }
}
