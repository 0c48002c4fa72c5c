use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::Value;
use std::time::Duration;
use crate::config::Settings;
use crate::error::{GatewayError, Result};
use crate::zabbix::rpc::{RpcRequest, RpcResponse};
use tracing::{debug, warn};

/// Something that can execute a JSON-RPC request against the Zabbix API.
#[async_trait]
pub trait JsonRpcTransport: Send + Sync {
    /// Execute `request` and return its `result` member.
    async fn call(&self, request: &RpcRequest) -> Result<Value>;
}

pub struct HttpTransport {
    client: Client,
    api_token: String,
    url: String,
}

impl HttpTransport {
    /// Create a new transport for the configured API endpoint
    pub fn new(settings: &Settings) -> Result<Self> {
        let api_token = settings
            .zabbix
            .api_token
            .clone()
            .ok_or_else(|| GatewayError::Config("Missing ZABBIX_API_TOKEN".to_string()))?;

        if !settings.zabbix.verify_ssl {
            warn!("⚠️  SSL verification disabled for the Zabbix API. This should only be used for testing!");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.zabbix.timeout_seconds.unwrap_or(30)))
            .danger_accept_invalid_certs(!settings.zabbix.verify_ssl)
            .build()?;

        Ok(Self {
            client,
            api_token,
            url: settings.zabbix.url.clone(),
        })
    }

    /// Get the endpoint URL for display/logging
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl JsonRpcTransport for HttpTransport {
    async fn call(&self, request: &RpcRequest) -> Result<Value> {
        debug!("Calling {} (id {}) at {}", request.method, request.id, self.url);

        let response = self
            .client
            .post(&self.url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_token))
            .header(header::CONTENT_TYPE, "application/json-rpc")
            .header(header::ACCEPT, "application/json")
            .body(serde_json::to_vec(request)?)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Zabbix API returned error ({}): {}", status, error_text);
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let rpc_response = response.json::<RpcResponse>().await?;
        rpc_response.into_result()
    }
}
