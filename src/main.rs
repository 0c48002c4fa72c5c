use anyhow::{bail, Context};
use clap::Parser;
use zabbix_csv_gateway::{
    cli::{Cli, Commands},
    config::{LoggingConfig, Settings},
    pipeline::{render_response, ParsedTable},
    probe::{fetch_table, format_clock, AlarmSummary},
    server,
    zabbix::{HttpTransport, ZabbixQueries},
};
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    match run(cli).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { config } => {
            let settings = load_settings(&config)?;
            init_logging(&settings.logging);

            info!("Zabbix CSV Gateway v{}", env!("CARGO_PKG_VERSION"));
            info!("Configuration loaded from: {}", config.display());

            server::serve(&settings).await?;
        }

        Commands::Render { config, origin } => {
            let settings = load_settings(&config)?;
            init_logging(&settings.logging);

            let transport = HttpTransport::new(&settings)?;
            let response = render_response(&transport, &origin).await;

            // Exactly the bytes the gateway would send, nothing else on stdout
            let mut stdout = io::stdout().lock();
            stdout.write_all(response.body().as_bytes())?;
            stdout.flush()?;
        }

        Commands::TestZabbix { config } => {
            let settings = load_settings(&config)?;
            init_logging(&settings.logging);

            info!("Testing Zabbix API connectivity...");

            let transport = HttpTransport::new(&settings)?;
            let mut queries = ZabbixQueries::new(&transport);
            let problems = queries.list_problems().await?;

            println!("✓ Zabbix API connection successful ({})", transport.url());
            println!("  Open disaster problems: {}", problems.len());
            if let Some(newest) = problems.iter().map(|p| p.clock).max() {
                println!("  Newest problem:         {}", format_clock(newest));
            }
        }

        Commands::Probe { url, authorization } => {
            init_logging(&LoggingConfig::default());

            match fetch_table(&url, authorization.as_deref()).await? {
                ParsedTable::Alarms(rows) => {
                    let summary = AlarmSummary::from_rows(&rows);
                    println!("\n=== Alarm Table ===");
                    println!("Rows:              {}", rows.len());
                    println!("  Active:          {}", summary.active);
                    println!("  Suppressed:      {}", summary.suppressed);
                    if let Some(newest) = summary.newest {
                        println!("Newest alarm:      {}", format_clock(newest));
                    }
                    for row in rows.iter().filter(|r| !r.suppressed) {
                        println!("  host {:>8}  severity {}  since {}", row.host_id, row.severity, format_clock(row.clock));
                    }
                    println!();
                }
                ParsedTable::Fault { code, message, id } => {
                    bail!("gateway reported error {} for request {}: {}", code, id, message);
                }
            }
        }
    }

    Ok(())
}

fn load_settings(config: &std::path::Path) -> anyhow::Result<Settings> {
    Settings::load(config).with_context(|| format!("loading {}", config.display()))
}

fn init_logging(logging: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Logs go to stderr so `render` output stays byte-exact
    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(io::stderr))
                .init();
        }
    }
}
