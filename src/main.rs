//! Command-line interface for hana-container
//!
//! # Usage Examples
//!
//! ```bash
//! # Start HANA Express, print connection details, stop on Ctrl-C
//! hana-container start --accept-license --password RandomPassword1
//!
//! # Start from a config file, overriding the tag, with JSON output
//! hana-container start --config hana.toml --tag 2.00.040.00.20190729.1 --output json
//!
//! # Check a password against the HANA composition policy
//! hana-container check-password RandomPassword1
//!
//! # List the service ports the image declares
//! hana-container ports
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use db_container::provider::find_provider;
use hana_container::image::{NAME, SERVICE_PORTS, SQL_PORT};
use hana_container::{validate_password, HanaConfig, HanaContainerProvider};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "hana-container")]
#[command(about = "Run SAP HANA Express Edition in a disposable Docker container")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a container and keep it running until Ctrl-C
    Start {
        /// Database type to start
        #[arg(long, default_value = NAME)]
        database_type: String,

        /// TOML config file; command-line flags override its values
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        #[command(flatten)]
        settings: HanaConfig,

        /// Output format for connection details
        #[arg(long, value_enum, default_value = "text")]
        output: OutputFormat,

        /// Fail if any service port is unreachable after startup
        #[arg(long)]
        check_ports: bool,
    },

    /// Validate a password against the HANA composition policy
    CheckPassword {
        password: String,
    },

    /// List the service ports exposed by the image
    Ports,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Start {
            database_type,
            config,
            settings,
            output,
            check_ports,
        } => start(database_type, config, settings, output, check_ports).await,
        Commands::CheckPassword { password } => {
            validate_password(&password)?;
            println!("Password is valid");
            Ok(())
        }
        Commands::Ports => {
            for port in SERVICE_PORTS {
                let role = if port == SQL_PORT { " (SQL, system database)" } else { "" };
                println!("{port}{role}");
            }
            Ok(())
        }
    }
}

async fn start(
    database_type: String,
    config: Option<PathBuf>,
    settings: HanaConfig,
    output: OutputFormat,
    check_ports: bool,
) -> anyhow::Result<()> {
    let providers = [HanaContainerProvider];
    if find_provider(&providers, &database_type).is_none() {
        anyhow::bail!("Unsupported database type: {database_type}");
    }

    let file_config = match &config {
        Some(path) => HanaConfig::from_file(path)?,
        None => HanaConfig::default(),
    };
    let image = file_config.merge(settings).into_image()?;

    let container = image.start().await.context("Failed to start HANA container")?;

    if check_ports {
        let unreachable = container.unreachable_ports().await?;
        if !unreachable.is_empty() {
            match container.logs().await {
                Ok(logs) => error!("Container logs:\n{}", logs),
                Err(e) => warn!("Failed to fetch container logs: {}", e),
            }
            container.stop().await?;
            anyhow::bail!("The required ports {unreachable:?} are not available!");
        }
    }

    let connection = container.connection_info().await?;
    match output {
        OutputFormat::Text => {
            println!("Container:   {}", connection.container_id);
            println!("JDBC URL:    {}", connection.jdbc_url);
            println!("Username:    {}", connection.username);
            println!("Password:    {}", connection.password);
            println!("Driver:      {}", connection.driver_class_name);
            println!("Test query:  {}", connection.test_query);
            for (internal, mapped) in &connection.ports {
                println!("Port:        {internal} -> {}:{mapped}", connection.host);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&connection)?);
        }
    }

    info!("Press Ctrl-C to stop the container");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    container.stop().await?;
    Ok(())
}
