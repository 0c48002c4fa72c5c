use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use crate::error::{GatewayError, Result};

pub const JSONRPC_VERSION: &str = "2.0";

/// Outbound JSON-RPC 2.0 request.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: Value,
    pub id: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl RpcRequest {
    pub fn new(method: &str, params: Value, id: i64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: method.to_string(),
            params,
            id,
        }
    }

    /// All open disaster-severity problems, including older ones.
    pub fn problem_get() -> Self {
        Self::new(
            "problem.get",
            json!({
                "output": ["eventid", "r_eventid", "objectid", "clock", "ns", "severity", "suppressed", "name"],
                "source": 0,
                "object": 0,
                "recent": false,
                "severities": [5]
            }),
            1,
        )
    }

    pub fn event_get(event_ids: &[u64]) -> Self {
        Self::new(
            "event.get",
            json!({
                "output": ["eventid", "acknowledged"],
                "eventids": event_ids
            }),
            1,
        )
    }

    pub fn trigger_get(trigger_ids: &[u64]) -> Self {
        Self::new(
            "trigger.get",
            json!({
                "output": ["triggerid", "status", "error", "suppressed", "flags", "value"],
                "selectHosts": ["hostid", "host", "status"],
                "selectItems": ["hostid", "status"],
                "triggerids": trigger_ids
            }),
            2,
        )
    }
}

impl RpcResponse {
    /// Unwrap the `result` member, turning an `error` member into a fault.
    pub fn into_result(self) -> Result<Value> {
        if let Some(error) = self.error {
            let data = match error.data {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s,
                Some(other) => other.to_string(),
            };
            return Err(GatewayError::Upstream {
                code: error.code,
                message: error.message,
                data,
            });
        }

        self.result
            .ok_or_else(|| GatewayError::MalformedResponse("response has neither result nor error".to_string()))
    }
}
