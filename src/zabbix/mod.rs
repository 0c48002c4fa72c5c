pub mod client;
pub mod models;
pub mod queries;
pub mod rpc;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpTransport, JsonRpcTransport};
pub use models::{Event, Host, Problem, Trigger, TriggerItem};
pub use queries::ZabbixQueries;
pub use rpc::{RpcRequest, RpcResponse};
