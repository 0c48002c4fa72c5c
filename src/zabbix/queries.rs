use serde::de::DeserializeOwned;
use crate::error::Result;
use crate::zabbix::client::JsonRpcTransport;
use crate::zabbix::models::{Event, Problem, Trigger};
use crate::zabbix::rpc::RpcRequest;
use tracing::debug;

/// Body reported when a fault happens before any request was sent.
pub const FALLBACK_REQUEST: &str = r#"{"id": -1}"#;

/// The three read-only queries the alarm table is built from.
///
/// Keeps the serialized body of the most recent outbound request so a fault
/// can be correlated with the request that caused it.
pub struct ZabbixQueries<'a> {
    transport: &'a dyn JsonRpcTransport,
    last_request: String,
}

impl<'a> ZabbixQueries<'a> {
    pub fn new(transport: &'a dyn JsonRpcTransport) -> Self {
        Self {
            transport,
            last_request: FALLBACK_REQUEST.to_string(),
        }
    }

    /// Serialized body of the last request issued (or the fallback).
    pub fn last_request(&self) -> &str {
        &self.last_request
    }

    pub async fn list_problems(&mut self) -> Result<Vec<Problem>> {
        let problems: Vec<Problem> = self.fetch(RpcRequest::problem_get()).await?;
        debug!("problem.get returned {} problems", problems.len());
        Ok(problems)
    }

    /// Acknowledgement state for `event_ids`. Not issued for an empty list.
    pub async fn list_events(&mut self, event_ids: &[u64]) -> Result<Vec<Event>> {
        if event_ids.is_empty() {
            debug!("No event ids, skipping event.get");
            return Ok(Vec::new());
        }
        let events: Vec<Event> = self.fetch(RpcRequest::event_get(event_ids)).await?;
        debug!("event.get returned {} events", events.len());
        Ok(events)
    }

    /// Triggers with their hosts and items. Not issued for an empty list.
    pub async fn list_triggers(&mut self, trigger_ids: &[u64]) -> Result<Vec<Trigger>> {
        if trigger_ids.is_empty() {
            debug!("No trigger ids, skipping trigger.get");
            return Ok(Vec::new());
        }
        let triggers: Vec<Trigger> = self.fetch(RpcRequest::trigger_get(trigger_ids)).await?;
        debug!("trigger.get returned {} triggers", triggers.len());
        Ok(triggers)
    }

    async fn fetch<T: DeserializeOwned>(&mut self, request: RpcRequest) -> Result<T> {
        self.last_request = serde_json::to_string(&request)?;
        let result = self.transport.call(&request).await?;
        Ok(serde_json::from_value(result)?)
    }
}
