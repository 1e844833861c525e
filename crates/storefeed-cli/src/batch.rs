//! Batch orchestration: page spans, row accumulation, and CSV emission.
//!
//! A run produces up to `batch_count` CSV files, each covering a fixed
//! contiguous span of page numbers. Pages are fetched strictly in order and
//! flattened before the next page is requested; a transport error or an
//! empty page ends the current batch's fetching without touching other
//! batches, and whatever rows were accumulated up to that point are still
//! written.

use std::path::{Path, PathBuf};

use anyhow::Context;

use storefeed_core::{ExportConfig, ExportRow};
use storefeed_scraper::{flatten_products, CatalogClient, ScraperError};

/// What a run produced, for logging and exit reporting.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    pub total_rows: usize,
}

/// Runs every batch and writes one CSV file per non-empty batch.
///
/// Transport errors and empty pages are batch-local; a failure to write a
/// batch's file is logged and the next batch still runs. The only hard
/// errors are client construction failures.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub async fn run_export(config: &ExportConfig) -> anyhow::Result<RunSummary> {
    let client = CatalogClient::new(config.request_timeout_secs, &config.user_agent)
        .context("failed to build catalog HTTP client")?;

    let mut summary = RunSummary::default();

    for batch_index in 1..=config.batch_count {
        let rows = collect_batch(&client, config, batch_index).await;

        if rows.is_empty() {
            tracing::info!(batch_index, "no data to write for this batch");
            continue;
        }

        let path = batch_file_path(&config.out_dir, batch_index);
        match write_batch_file(&path, &rows) {
            Ok(()) => {
                tracing::info!(
                    batch_index,
                    rows = rows.len(),
                    path = %path.display(),
                    "batch file written"
                );
                summary.total_rows += rows.len();
                summary.files_written.push(path);
            }
            Err(e) => {
                // Batch isolation: a failed write must not stop later batches.
                tracing::error!(
                    batch_index,
                    path = %path.display(),
                    error = %e,
                    "failed to write batch file"
                );
            }
        }
    }

    Ok(summary)
}

/// Fetches and flattens one batch's span of pages, in page order.
///
/// Stops consuming pages at the first transport error or empty page and
/// returns whatever rows were accumulated before that point.
async fn collect_batch(
    client: &CatalogClient,
    config: &ExportConfig,
    batch_index: u32,
) -> Vec<ExportRow> {
    let (start_page, end_page) = page_span(batch_index, config.pages_per_batch);
    let mut rows: Vec<ExportRow> = Vec::new();

    for page in start_page..=end_page {
        tracing::info!(batch_index, page, "fetching catalog page");

        let fetched = match client
            .fetch_page(&config.shop_url, config.page_size, page)
            .await
        {
            Ok(fetched) => fetched,
            Err(e @ ScraperError::NotFound { .. }) => {
                // Some storefronts 404 past the last page instead of
                // returning an empty list; same end-of-data meaning.
                tracing::info!(batch_index, page, error = %e, "page not found — ending batch");
                break;
            }
            Err(e) => {
                tracing::error!(batch_index, page, error = %e, "page fetch failed — ending batch");
                break;
            }
        };

        if fetched.products.is_empty() {
            tracing::info!(batch_index, page, "no more data — ending batch");
            break;
        }

        rows.extend(flatten_products(&fetched.products));
    }

    rows
}

/// Inclusive page-number span covered by one batch (1-based on both ends).
fn page_span(batch_index: u32, pages_per_batch: u32) -> (u32, u32) {
    let start = (batch_index - 1) * pages_per_batch + 1;
    (start, start + pages_per_batch - 1)
}

/// Deterministic output path for one batch's CSV file.
fn batch_file_path(out_dir: &Path, batch_index: u32) -> PathBuf {
    out_dir.join(format!("products_data_part_{batch_index}.csv"))
}

/// Serializes accumulated rows to a CSV file, header first.
///
/// The header comes from the serde renames on [`ExportRow`], so the column
/// order is fixed regardless of row content.
///
/// # Errors
///
/// Returns an error if the file cannot be created or a row fails to
/// serialize.
fn write_batch_file(path: &Path, rows: &[ExportRow]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("failed to serialize row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
