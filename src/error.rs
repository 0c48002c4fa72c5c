use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Zabbix API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Zabbix API error {code}: {message} {data}")]
    Upstream {
        code: i64,
        message: String,
        data: String,
    },

    #[error("Malformed Zabbix response: {0}")]
    MalformedResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    /// Text placed into the `error.message` column of the error table.
    ///
    /// Upstream faults carry their explanation in `data` ("Not authorized.")
    /// while `message` is the generic JSON-RPC label ("Invalid params."), so
    /// `data` wins when present. HTTP error bodies are left out; they are
    /// usually proxy HTML pages.
    pub fn fault_message(&self) -> String {
        match self {
            GatewayError::HttpStatus { status, .. } => {
                format!("Zabbix API returned HTTP {}", status)
            }
            GatewayError::Upstream { message, data, .. } => {
                if data.is_empty() {
                    message.clone()
                } else {
                    data.clone()
                }
            }
            other => other.to_string(),
        }
    }

    /// Code surfaced to the polling device. The taxonomy is flat for now.
    pub fn fault_code(&self) -> i64 {
        1
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
