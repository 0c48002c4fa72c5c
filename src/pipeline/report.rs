use thiserror::Error;
use crate::error::GatewayError;
use crate::pipeline::assemble::assemble_rows;
use crate::pipeline::csv::render_table;
use crate::pipeline::error_table::ErrorReport;
use crate::pipeline::index::{AckSet, ProblemIndex};
use crate::pipeline::row::AlertRow;
use crate::pipeline::sort::sort_rows;
use crate::zabbix::{JsonRpcTransport, ZabbixQueries};
use tracing::{debug, info, warn};

/// A pipeline failure together with the outbound request it happened on.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct Fault {
    /// Serialized body of the last request sent before the failure
    pub request: String,
    #[source]
    pub source: GatewayError,
}

/// Fetch, index, assemble and sort the active alarm rows.
///
/// Queries run strictly in sequence; each depends on ids from the previous.
pub async fn collect_rows(transport: &dyn JsonRpcTransport) -> std::result::Result<Vec<AlertRow>, Fault> {
    let mut queries = ZabbixQueries::new(transport);
    match collect_with(&mut queries).await {
        Ok(rows) => Ok(rows),
        Err(source) => Err(Fault {
            request: queries.last_request().to_string(),
            source,
        }),
    }
}

async fn collect_with(queries: &mut ZabbixQueries<'_>) -> crate::error::Result<Vec<AlertRow>> {
    let problems = queries.list_problems().await?;
    let index = ProblemIndex::build(problems);
    if index.is_empty() {
        debug!("No open problems");
        return Ok(Vec::new());
    }

    let events = queries.list_events(index.event_ids()).await?;
    let acks = AckSet::build(&events);

    let triggers = queries.list_triggers(index.trigger_ids()).await?;

    let mut rows = assemble_rows(&triggers, &index, &acks);
    sort_rows(&mut rows);

    debug!(
        "Assembled {} rows from {} triggers ({} acknowledged events)",
        rows.len(),
        triggers.len(),
        acks.count()
    );

    Ok(rows)
}

/// Outcome of one gateway request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub enum CsvResponse {
    Alarms { body: String, rows: usize },
    Fault { body: String, message: String },
}

impl CsvResponse {
    pub fn body(&self) -> &str {
        match self {
            CsvResponse::Alarms { body, .. } | CsvResponse::Fault { body, .. } => body,
        }
    }

    pub fn into_body(self) -> String {
        match self {
            CsvResponse::Alarms { body, .. } | CsvResponse::Fault { body, .. } => body,
        }
    }
}

/// Run the pipeline and render whichever table applies.
///
/// Every pipeline fault becomes the error table; nothing escapes.
pub async fn render_response(transport: &dyn JsonRpcTransport, origin: &str) -> CsvResponse {
    match collect_rows(transport).await {
        Ok(rows) => {
            info!(origin, rows = rows.len(), "Serving alarm table");
            CsvResponse::Alarms {
                body: render_table(&rows),
                rows: rows.len(),
            }
        }
        Err(fault) => {
            warn!(origin, request = %fault.request, "Pipeline failed: {}", fault.source);
            let report = ErrorReport::new(&fault.source, &fault.request, origin);
            CsvResponse::Fault {
                body: report.render(),
                message: report.message,
            }
        }
    }
}
