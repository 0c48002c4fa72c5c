pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod probe;
pub mod server;
pub mod utils;
pub mod zabbix;
