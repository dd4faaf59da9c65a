use std::fs;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use tracing::info;

const REQUEST_TIMEOUT_SECS: u64 = 10;

static CLIENT: OnceCell<Client> = OnceCell::new();

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

/// Read a sheet export from a published URL or a local file.
pub fn load_source(source: &str) -> Result<String> {
    let source = source.trim();
    if is_url(source) {
        info!(url = source, "fetching player sheet");
        let resp = http_client()?
            .get(source)
            .header("Cache-Control", "no-store")
            .send()
            .with_context(|| format!("request failed: {source}"))?;
        let status = resp.status();
        if !status.is_success() {
            bail!("CSV fetch failed: {status}");
        }
        return resp.text().context("failed reading response body");
    }
    fs::read_to_string(source).with_context(|| format!("failed reading {source}"))
}

fn is_url(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_urls() {
        assert!(is_url("https://docs.google.com/spreadsheets/d/x/pub?output=csv"));
        assert!(is_url("HTTP://example.org/a.csv"));
        assert!(!is_url("tests/fixtures/players.csv"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_source("/definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("failed reading"));
    }
}
