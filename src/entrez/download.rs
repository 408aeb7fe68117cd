// Batch FASTA download for one structural class.
//
// Pages through an esearch session in fixed-size batches, appending each
// batch's FASTA text to the class's output file. NCBI's fetch endpoint is
// flaky under load, so each batch gets a bounded number of attempts: 5xx
// responses are retried after a fixed delay, anything else aborts the run.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use super::client::EntrezClient;
use crate::classes::StructuralClass;

/// Default number of records per efetch batch.
pub const DEFAULT_BATCH_SIZE: usize = 5000;

/// Attempts per batch before the error propagates.
const MAX_ATTEMPTS: u32 = 3;

/// Fixed delay between attempts on a server error.
const RETRY_DELAY: Duration = Duration::from_secs(15);

/// Outcome of a class download, for the end-of-run summary.
///
/// `total_records` counts the records fetched by THIS run — a resumed run
/// (`start_batch > 0`) reports only the batches it actually pulled.
#[derive(Debug)]
pub struct DownloadReport {
    pub total_records: usize,
    pub batches_fetched: usize,
}

/// Check whether an error is an HTTP 5xx from the fetch endpoint.
///
/// The client folds the status into the error message ("efetch returned
/// HTTP 503 ..."), so classification is a message check on the chain.
fn is_server_error(err: &anyhow::Error) -> bool {
    format!("{err:?}").contains("HTTP 5")
}

/// The `(retstart, end)` record ranges a run will fetch, in order.
/// Empty when `start_batch` points at or past the end of the result set.
fn batch_ranges(count: usize, batch_size: usize, start_batch: usize) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = start_batch.saturating_mul(batch_size);
    while start < count {
        let end = (start + batch_size).min(count);
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Download every record matching `class`'s query into `out_path`.
///
/// `start_batch` resumes from a batch index after a failed run: batches
/// before it are skipped and the output file is appended to rather than
/// truncated. There is no dedup — rerunning from batch 0 overwrites.
pub async fn download_class(
    client: &EntrezClient,
    class: &StructuralClass,
    out_path: &Path,
    batch_size: usize,
    start_batch: usize,
) -> Result<DownloadReport> {
    if batch_size == 0 {
        anyhow::bail!("Batch size must be at least 1");
    }

    let query = class
        .search_query()
        .with_context(|| format!("Class '{}' has no search query", class.name))?;

    info!(class = class.name, query = %query, "Registering esearch session");
    let session = client.esearch(&query).await?;

    if session.count == 0 {
        println!("  No records match the query for '{}'.", class.name);
        return Ok(DownloadReport {
            total_records: 0,
            batches_fetched: 0,
        });
    }

    // Resume appends; a fresh run truncates.
    let mut out = OpenOptions::new()
        .create(true)
        .write(true)
        .append(start_batch > 0)
        .truncate(start_batch == 0)
        .open(out_path)
        .with_context(|| format!("Failed to open output file: {}", out_path.display()))?;

    let ranges = batch_ranges(session.count, batch_size, start_batch);

    let bar = ProgressBar::new(session.count as u64);
    bar.set_style(
        ProgressStyle::with_template("  {bar:30} {pos}/{len} records {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_position(start_batch.saturating_mul(batch_size).min(session.count) as u64);

    let mut records_fetched = 0;
    for (batch_index, &(start, end)) in ranges.iter().enumerate() {
        info!(
            class = class.name,
            batch = start_batch + batch_index,
            "Downloading record {} to {} of {}",
            start + 1,
            end,
            session.count
        );

        let data =
            with_server_retry(|| client.efetch_batch(&session, start, batch_size)).await?;
        out.write_all(data.as_bytes())
            .with_context(|| format!("Failed to write batch to {}", out_path.display()))?;

        records_fetched += end - start;
        bar.set_position(end as u64);
    }
    bar.finish_and_clear();

    out.flush()
        .with_context(|| format!("Failed to flush {}", out_path.display()))?;

    Ok(DownloadReport {
        total_records: records_fetched,
        batches_fetched: ranges.len(),
    })
}

/// Run an async operation, retrying server errors a bounded number of times.
///
/// Non-5xx errors (bad request, transport failure) return immediately;
/// the `MAX_ATTEMPTS`-th consecutive 5xx propagates and aborts the run.
async fn with_server_retry<F, Fut, T>(operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_server_error(&err) || attempt >= MAX_ATTEMPTS {
                    return Err(err);
                }
                warn!(
                    attempt = attempt,
                    max_attempts = MAX_ATTEMPTS,
                    "Server error from efetch, retrying in {}s: {err}",
                    RETRY_DELAY.as_secs()
                );
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}
