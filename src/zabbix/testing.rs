//! In-memory transport with canned responses keyed by method name.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use crate::error::{GatewayError, Result};
use crate::zabbix::client::JsonRpcTransport;
use crate::zabbix::rpc::RpcRequest;

#[derive(Default)]
pub struct ScriptedTransport {
    responses: HashMap<String, std::result::Result<Value, String>>,
    calls: Mutex<Vec<RpcRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, method: &str, result: Value) -> Self {
        self.responses.insert(method.to_string(), Ok(result));
        self
    }

    /// Answer `method` with an upstream error payload whose data is `data`.
    pub fn fail(mut self, method: &str, data: &str) -> Self {
        self.responses.insert(method.to_string(), Err(data.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RpcRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|r| r.method).collect()
    }
}

#[async_trait]
impl JsonRpcTransport for ScriptedTransport {
    async fn call(&self, request: &RpcRequest) -> Result<Value> {
        self.calls.lock().unwrap().push(request.clone());
        match self.responses.get(&request.method) {
            Some(Ok(result)) => Ok(result.clone()),
            Some(Err(data)) => Err(GatewayError::Upstream {
                code: -32500,
                message: "Application error.".to_string(),
                data: data.clone(),
            }),
            None => Err(GatewayError::MalformedResponse(format!(
                "no scripted response for {}",
                request.method
            ))),
        }
    }
}
