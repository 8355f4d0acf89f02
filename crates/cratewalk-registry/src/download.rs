//! Blocking HTTP helpers for registry API requests.

use std::time::Duration;

use cratewalk_core::config::RegistryConfig;
use cratewalk_util::errors::CratewalkError;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Build a shared blocking reqwest client for registry requests.
pub fn build_client(config: &RegistryConfig) -> miette::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| {
            CratewalkError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            }
            .into()
        })
}

/// GET a JSON document, retrying server errors, timeouts and connection failures.
///
/// Returns `Ok(None)` for 404 so callers can report a missing crate or version
/// in their own words. `attempts` below one is treated as one.
pub fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    attempts: u32,
) -> miette::Result<Option<T>> {
    let attempts = attempts.max(1);
    let mut last_err = String::new();

    for attempt in 0..attempts {
        if attempt > 0 {
            std::thread::sleep(RETRY_DELAY * attempt);
            tracing::debug!(url, attempt, "retrying registry request");
        }

        match client.get(url).send() {
            Ok(resp) => {
                let status = resp.status();
                if status == reqwest::StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                if status.is_server_error() {
                    last_err = format!("HTTP {status} from {url}");
                    continue;
                }
                if !status.is_success() {
                    return Err(CratewalkError::Network {
                        message: format!("HTTP {status} fetching {url}"),
                    }
                    .into());
                }

                let body = resp.text().map_err(|e| CratewalkError::Network {
                    message: format!("Failed to read response from {url}: {e}"),
                })?;
                let parsed = serde_json::from_str(&body).map_err(|e| CratewalkError::Registry {
                    message: format!("Malformed response from {url}: {e}"),
                })?;
                return Ok(Some(parsed));
            }
            Err(e) if e.is_timeout() || e.is_connect() => {
                last_err = format!("{e}");
                continue;
            }
            Err(e) => {
                return Err(CratewalkError::Network {
                    message: format!("Request to {url} failed: {e}"),
                }
                .into());
            }
        }
    }

    Err(CratewalkError::Network {
        message: format!("Failed after {attempts} attempts for {url}: {last_err}"),
    }
    .into())
}
