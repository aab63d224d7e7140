//! HTTP client for fetching quiz pages.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::{ConverterError, Result};

/// User agent string identifying this converter.
const USER_AGENT: &str = concat!("quizport/", env!("CARGO_PKG_VERSION"));

/// Maximum number of attempts for transient failures.
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Create a client with timeout and user agent set.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download a response body with retry logic.
///
/// Connection errors, timeouts and 5xx responses are retried with
/// exponential backoff. Client errors fail immediately. Bodies larger than
/// `max_size` bytes are rejected, using `Content-Length` when the server
/// sends it.
pub fn download_bytes(client: &Client, url: &str, max_size: u64) -> Result<Vec<u8>> {
    let mut last_error: Option<String> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            // 500ms, 1000ms
            let delay = RETRY_BASE_DELAY_MS * (1 << (attempt - 1));
            tracing::debug!(attempt, delay_ms = delay, "Retrying after delay");
            thread::sleep(Duration::from_millis(delay));
        }

        match client.get(url).send() {
            Ok(response) => {
                let status = response.status();
                if status.is_server_error() {
                    tracing::warn!(
                        status = %status,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Server error, will retry"
                    );
                    last_error = Some(format!("Server error: {status}"));
                    continue;
                }

                let response = response
                    .error_for_status()
                    .map_err(|source| ConverterError::DocumentDownload {
                        url: url.to_string(),
                        source,
                    })?;

                if let Some(size) = response.content_length().filter(|&size| size > max_size) {
                    return Err(too_large(url, size, max_size));
                }
                let bytes = response.bytes()?;
                let size = bytes.len() as u64;
                if size > max_size {
                    return Err(too_large(url, size, max_size));
                }
                tracing::debug!(url, bytes = size, "downloaded document");
                return Ok(bytes.to_vec());
            }
            Err(e) => {
                if e.is_connect() || e.is_timeout() {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Connection error, will retry"
                    );
                    last_error = Some(e.to_string());
                    continue;
                }
                return Err(ConverterError::Http(e));
            }
        }
    }

    Err(ConverterError::RetriesExhausted {
        attempts: MAX_RETRIES,
        message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

/// Fetch a quiz page as text. Invalid UTF-8 is replaced, not rejected.
pub fn fetch_document(url: &str, max_size: u64) -> Result<String> {
    let client = create_client()?;
    let bytes = download_bytes(&client, url, max_size)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn too_large(url: &str, size: u64, limit: u64) -> ConverterError {
    ConverterError::ResponseTooLarge {
        url: url.to_string(),
        size,
        limit,
    }
}
