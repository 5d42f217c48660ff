//! Eurostat dissemination API client and TSV parsing.
//!
//! The SDMX 2.1 TSV layout looks like:
//!
//! ```text
//! freq,wst_oper,unit,geo\TIME_PERIOD	2020 	2021
//! A,GEN,KG_HAB,ES	464 	472 p
//! A,GEN,KG_HAB,MT	: 	640 e
//! ```
//!
//! The first column packs every key dimension into one comma-separated
//! field. Measurements may carry status flags after a space, and `:` marks a
//! missing value. Flags are dropped here.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::{debug, info};

use crate::csv::{RawTable, normalize_header};
use crate::error::{IngestError, Result};
use crate::source::DataSource;

/// Base URL of the Eurostat SDMX 2.1 data endpoint.
pub const EUROSTAT_API_URL: &str = "https://ec.europa.eu/eurostat/api/dissemination/sdmx/2.1/data";

/// Default HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Marker Eurostat uses for a missing observation.
const MISSING_MARKER: &str = ":";

/// Fetches datasets from the Eurostat dissemination API.
pub struct EurostatClient {
    client: Client,
    base_url: String,
}

impl EurostatClient {
    /// Creates a client for `base_url` with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()
            .map_err(|e| IngestError::SourceUnavailable {
                dataset: "*".to_string(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self::from_client(client, base_url))
    }

    fn from_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn dataset_url(&self, dataset: &str) -> String {
        format!(
            "{}/{dataset}?format=TSV&compressed=false",
            self.base_url
        )
    }
}

impl DataSource for EurostatClient {
    fn name(&self) -> &str {
        "eurostat"
    }

    fn fetch(&self, dataset: &str) -> Result<RawTable> {
        let url = self.dataset_url(dataset);
        info!(dataset, url = %url, "downloading dataset");

        let unavailable = |reason: String| IngestError::SourceUnavailable {
            dataset: dataset.to_string(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .header(
                USER_AGENT,
                format!("cca-tidy/{}", env!("CARGO_PKG_VERSION")),
            )
            .send()
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(unavailable("dataset not found".to_string()));
        }
        if !status.is_success() {
            return Err(unavailable(format!("HTTP status {}", status.as_u16())));
        }

        let body = response.text().map_err(|e| unavailable(e.to_string()))?;
        debug!(dataset, bytes = body.len(), "dataset downloaded");
        parse_eurostat_tsv(dataset, &body)
    }
}

/// Parses a Eurostat TSV payload into a raw table.
///
/// The packed key field is split into one column per dimension, so the
/// result has the same shape as a plain wide CSV.
pub fn parse_eurostat_tsv(dataset: &str, text: &str) -> Result<RawTable> {
    let format_error = |line: usize, reason: String| IngestError::TsvFormat {
        dataset: dataset.to_string(),
        line,
        reason,
    };

    let mut lines = text
        .trim_start_matches('\u{feff}')
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header_line)) = lines.next() else {
        return Err(format_error(1, "empty payload".to_string()));
    };

    let mut header_fields = header_line.split('\t');
    let key_field = header_fields.next().unwrap_or_default();
    let mut header: Vec<String> = key_field.split(',').map(normalize_header).collect();
    let key_count = header.len();
    header.extend(header_fields.map(normalize_header));
    let period_count = header.len() - key_count;

    let mut rows = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        let mut fields = line.split('\t');
        let keys: Vec<Option<String>> = fields
            .next()
            .unwrap_or_default()
            .split(',')
            .map(|code| Some(code.trim().to_string()).filter(|c| !c.is_empty()))
            .collect();
        if keys.len() != key_count {
            return Err(format_error(
                line_no,
                format!("expected {key_count} key codes, found {}", keys.len()),
            ));
        }
        let cells: Vec<Option<String>> = fields.map(parse_observation).collect();
        if cells.len() > period_count {
            return Err(format_error(
                line_no,
                format!("expected {period_count} observations, found {}", cells.len()),
            ));
        }

        let mut row = keys;
        row.extend(cells);
        // Trailing missing observations are sometimes omitted
        row.resize(header.len(), None);
        rows.push(row);
    }

    Ok(RawTable { header, rows })
}

/// Extracts the numeric part of an observation, dropping status flags.
fn parse_observation(cell: &str) -> Option<String> {
    let value = cell.split_whitespace().next()?;
    if value == MISSING_MARKER {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answers a single HTTP request with a canned response and hands back
    /// the request head it received.
    fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (EurostatClient, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        (
            EurostatClient::from_client(client, format!("http://{addr}/")),
            handle,
        )
    }

    const SAMPLE: &str = "freq,wst_oper,unit,geo\\TIME_PERIOD\t2020 \t2021 \n\
                          A,GEN,KG_HAB,ES\t464 \t472 p\n\
                          A,GEN,KG_HAB,MT\t: \t640 e\n";

    #[test]
    fn test_parse_header_splits_packed_keys() {
        let table = parse_eurostat_tsv("env_wasmun", SAMPLE).unwrap();
        assert_eq!(
            table.header,
            vec!["freq", "wst_oper", "unit", "geo", "2020", "2021"]
        );
    }

    #[test]
    fn test_parse_strips_flags_and_missing_marker() {
        let table = parse_eurostat_tsv("env_wasmun", SAMPLE).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][3].as_deref(), Some("ES"));
        assert_eq!(table.rows[0][5].as_deref(), Some("472"));
        assert_eq!(table.rows[1][4], None);
        assert_eq!(table.rows[1][5].as_deref(), Some("640"));
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let text = "unit,geo\\TIME_PERIOD\t2020\t2021\nPC,ES\t70.1\n";
        let table = parse_eurostat_tsv("env_waspac", text).unwrap();
        assert_eq!(
            table.rows[0],
            vec![
                Some("PC".to_string()),
                Some("ES".to_string()),
                Some("70.1".to_string()),
                None
            ]
        );
    }

    #[test]
    fn test_parse_rejects_wrong_key_arity() {
        let text = "unit,geo\\TIME_PERIOD\t2020\nPC\t70.1\n";
        let result = parse_eurostat_tsv("env_waspac", text);
        assert!(matches!(
            result,
            Err(IngestError::TsvFormat { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_empty_payload() {
        assert!(matches!(
            parse_eurostat_tsv("env_waspac", "\n"),
            Err(IngestError::TsvFormat { line: 1, .. })
        ));
    }

    #[test]
    fn test_dataset_url() {
        let client = EurostatClient::new("https://example.test/data/", None).unwrap();
        assert_eq!(
            client.dataset_url("env_wasmun"),
            "https://example.test/data/env_wasmun?format=TSV&compressed=false"
        );
    }

    #[test]
    fn test_fetch_not_found_is_unavailable() {
        let (client, server) = serve_once("404 Not Found", "");
        let result = client.fetch("env_missing");
        server.join().unwrap();
        match result {
            Err(IngestError::SourceUnavailable { dataset, reason }) => {
                assert_eq!(dataset, "env_missing");
                assert_eq!(reason, "dataset not found");
            }
            other => panic!("expected SourceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_fetch_server_error_reports_status() {
        let (client, server) = serve_once("500 Internal Server Error", "oops");
        let result = client.fetch("env_wasmun");
        server.join().unwrap();
        assert!(matches!(
            result,
            Err(IngestError::SourceUnavailable { ref reason, .. }) if reason == "HTTP status 500"
        ));
    }

    #[test]
    fn test_fetch_parses_tsv_body() {
        let (client, server) = serve_once("200 OK", SAMPLE);
        let table = client.fetch("env_wasmun").unwrap();
        let request = server.join().unwrap();
        assert!(request.starts_with("GET /env_wasmun?format=TSV&compressed=false "));
        assert!(request.to_lowercase().contains("user-agent: cca-tidy/"));
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][4].as_deref(), Some("464"));
    }
}
