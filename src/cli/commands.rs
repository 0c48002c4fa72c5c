use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zcg")]
#[command(about = "Serve active Zabbix disaster alarms as a flat CSV table", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP gateway
    Serve {
        /// Path to configuration file
        #[arg(short, long, env = "CONFIG_PATH", default_value = "./config.yaml")]
        config: PathBuf,
    },

    /// Build the table once and print the body the gateway would serve
    Render {
        /// Path to configuration file
        #[arg(short, long, env = "CONFIG_PATH", default_value = "./config.yaml")]
        config: PathBuf,

        /// Caller address reported in the error table
        #[arg(long, default_value = "127.0.0.1")]
        origin: String,
    },

    /// Test connectivity to the Zabbix API
    TestZabbix {
        /// Path to configuration file
        #[arg(short, long, env = "CONFIG_PATH", default_value = "./config.yaml")]
        config: PathBuf,
    },

    /// Poll a running gateway the way the display device does
    Probe {
        /// URL of the CSV endpoint
        #[arg(long)]
        url: String,

        /// Value for the Authorization header
        #[arg(long, env = "PROBE_AUTHORIZATION")]
        authorization: Option<String>,
    },
}
