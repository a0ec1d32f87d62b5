use crate::cli::args::Cli;
use crate::core::{BatchResult, ConversionConfig};
use crate::path_resolver::PathResolver;
use crate::pool::WorkerPool;
use crate::processing::{ConversionEngine, DefaultProcessingConfig};
use crate::report::BatchReport;
use crate::{
    encoder::libwebp::LibWebPEncoder, image_loader::standard::StandardImageLoader,
    storage::local::LocalStorageBackend,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Build the end-of-run message shown to the user
pub fn format_result_message(unprocessed_files: &[String]) -> String {
    if unprocessed_files.is_empty() {
        return "Files processed without issues".to_string();
    }

    let plural = if unprocessed_files.len() > 1 { "s" } else { "" };
    format!(
        "Could not process the next file{plural}:\n{}",
        unprocessed_files.join(",")
    )
}

/// Execute the convert command
pub async fn execute_convert(cli: Cli) -> Result<Option<BatchResult>> {
    let config = ConversionConfig::new(cli.overwrite, cli.quality, cli.lossless)?;

    let mut files = PathResolver::resolve_explicit(&cli.files);
    if let Some(dir) = &cli.dir {
        files.extend(PathResolver::resolve_directory(dir, &cli.extensions));
    }

    if files.is_empty() {
        info!("Nothing to convert");
        return Ok(None);
    }

    let mut processing = DefaultProcessingConfig::new();
    if let Some(jobs) = cli.jobs {
        processing = processing.with_max_concurrent(jobs);
    }

    let engine = Arc::new(ConversionEngine::new(
        StandardImageLoader::new(),
        LibWebPEncoder::new(),
        LocalStorageBackend::new(),
        processing,
    ));

    // CLIは一度に1バッチのみ実行する
    let pool = WorkerPool::new(1)?;
    let handle = pool.try_submit(engine, files, config)?;
    let result = handle.join().await?;

    if let Some(report_path) = &cli.report {
        BatchReport::new(&result, &config).write_json(report_path)?;
        info!("Report written to {}", report_path.display());
    }

    if !cli.no_summary {
        println!("{}", format_result_message(&result.unprocessed_file_names()));
    }

    Ok(Some(result))
}
