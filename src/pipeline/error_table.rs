use serde_json::Value;
use crate::error::GatewayError;
use crate::zabbix::rpc::JSONRPC_VERSION;

/// Header of the failure table. Deliberately unlike the alarm table.
pub const ERROR_COLUMNS: [&str; 5] = ["jsonrpc", "error.code", "error.message", "error.data", "id"];

/// Single-row failure table served instead of alarms.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport {
    pub code: i64,
    pub message: String,
    pub data: String,
    /// `id` of the failed outbound request, `Null` if its body was unparsable
    pub id: Value,
    pub origin: String,
}

impl ErrorReport {
    pub fn new(error: &GatewayError, request_body: &str, origin: &str) -> Self {
        Self {
            code: error.fault_code(),
            message: single_line(&error.fault_message()),
            data: String::new(),
            id: request_id(request_body),
            origin: origin.to_string(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "{}\n{};{};{};{};{}@{}\n",
            ERROR_COLUMNS.join(";"),
            JSONRPC_VERSION,
            self.code,
            self.message,
            self.data,
            id_text(&self.id),
            self.origin
        )
    }
}

/// The table is exactly two lines, so the message may not break.
fn single_line(message: &str) -> String {
    message
        .split(['\r', '\n'])
        .filter(|part| !part.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}

fn request_id(body: &str) -> Value {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("id").cloned())
        .unwrap_or(Value::Null)
}

fn id_text(id: &Value) -> String {
    match id {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::csv::{parse_table, ParsedTable};

    fn upstream(data: &str) -> GatewayError {
        GatewayError::Upstream {
            code: -32500,
            message: "Application error.".to_string(),
            data: data.to_string(),
        }
    }

    #[test]
    fn test_render_upstream_fault() {
        let report = ErrorReport::new(&upstream("connection refused"), r#"{"jsonrpc":"2.0","id":7}"#, "10.0.0.9");
        assert_eq!(
            report.render(),
            "jsonrpc;error.code;error.message;error.data;id\n2.0;1;connection refused;;7@10.0.0.9\n"
        );
    }

    #[test]
    fn test_fallback_request_id() {
        let report = ErrorReport::new(&upstream("x"), r#"{"id": -1}"#, "127.0.0.1");
        assert_eq!(report.id, Value::from(-1));
        assert!(report.render().ends_with(";-1@127.0.0.1\n"));
    }

    #[test]
    fn test_unparsable_body_yields_null_id() {
        let report = ErrorReport::new(&upstream("x"), "{not json", "127.0.0.1");
        assert_eq!(report.id, Value::Null);
        assert!(report.render().ends_with("2.0;1;x;;@127.0.0.1\n"));
    }

    #[test]
    fn test_string_id_is_unquoted() {
        let report = ErrorReport::new(&upstream("x"), r#"{"id":"abc"}"#, "h");
        assert!(report.render().ends_with(";abc@h\n"));
    }

    #[test]
    fn test_http_error_page_stays_two_lines() {
        let err = GatewayError::HttpStatus {
            status: 502,
            body: "<html>\r\n<head><title>502 Bad Gateway</title></head>\r\n<body>nginx</body>\r\n</html>".to_string(),
        };
        let body = ErrorReport::new(&err, r#"{"id":1}"#, "10.0.0.7").render();
        assert_eq!(body.lines().count(), 2);

        match parse_table(&body).unwrap() {
            ParsedTable::Fault { code, message, id } => {
                assert_eq!(code, 1);
                assert_eq!(message, "Zabbix API returned HTTP 502");
                assert_eq!(id, "1@10.0.0.7");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_multiline_upstream_message_is_flattened() {
        let report = ErrorReport::new(&upstream("first line\r\nsecond line\n"), r#"{"id":1}"#, "h");
        assert_eq!(report.message, "first line second line");
        assert_eq!(report.render().lines().count(), 2);
    }

    #[test]
    fn test_has_two_lines() {
        let report = ErrorReport::new(&upstream("boom"), r#"{"id":1}"#, "h");
        assert_eq!(report.render().lines().count(), 2);
    }
}
