//! Client-side view of the gateway, as the polling device sees it.

use chrono::{DateTime, Utc};
use reqwest::{header, Client};
use std::time::Duration;
use crate::error::{GatewayError, Result};
use crate::pipeline::{parse_table, AlertRow, ParsedTable};
use tracing::debug;

/// Fetch and parse the table served at `url`.
pub async fn fetch_table(url: &str, authorization: Option<&str>) -> Result<ParsedTable> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

    let mut request = client.get(url);
    if let Some(value) = authorization {
        request = request.header(header::AUTHORIZATION, value);
    }

    let response = request.send().await?;
    let status = response.status();
    let declared_length = response.content_length();
    let body = response.text().await?;
    debug!("GET {} -> {} ({} bytes, declared {:?})", url, status, body.len(), declared_length);

    if !status.is_success() {
        return Err(GatewayError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }

    parse_table(&body)
}

/// Summary line counts for a parsed alarm table.
#[derive(Debug, Default, PartialEq)]
pub struct AlarmSummary {
    pub active: usize,
    pub suppressed: usize,
    pub newest: Option<u64>,
}

impl AlarmSummary {
    pub fn from_rows(rows: &[AlertRow]) -> Self {
        let mut summary = Self::default();
        for row in rows {
            if row.suppressed {
                summary.suppressed += 1;
            } else {
                summary.active += 1;
            }
            summary.newest = summary.newest.max(Some(row.clock));
        }
        summary
    }
}

/// Render a unix timestamp for humans.
pub fn format_clock(clock: u64) -> String {
    i64::try_from(clock)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| clock.to_string())
}
