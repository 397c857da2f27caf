use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use kyt_client::config::Settings;
use kyt_client::logging;
use kyt_client::KytClient;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogOutputFormat {
    Json,
    Pretty,
}

/// Command line arguments for the KYT client.
#[derive(Debug, Parser)]
#[clap(name = "KYT Client")]
struct KytArgs {
    /// Optional path to the configuration file. If not provided, it is expected
    /// that all parameters are provided via environment variables.
    #[clap(short = 'c', long, required = false)]
    config: Option<PathBuf>,

    /// The application id, overrides `kyt.app_id`
    #[clap(long, env = "APPID")]
    app_id: Option<String>,

    /// The application secret, overrides `kyt.app_secret`
    #[clap(long, env = "APPSECRET", hide_env_values = true)]
    app_secret: Option<String>,

    /// The API root URL, overrides `kyt.app_root`
    #[clap(long, env = "APPROOT")]
    app_root: Option<String>,

    #[clap(short = 'o', long = "output-format", default_value = "pretty")]
    output_format: LogOutputFormat,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check whether an address is flagged as malicious
    Malice {
        /// The chain the address lives on
        #[clap(long, default_value = "eth")]
        platform: String,
        /// The address to screen
        address: String,
    },
    /// Check whether an address is under sanctions
    Sanction {
        /// The chain the address lives on
        #[clap(long, default_value = "eth")]
        platform: String,
        /// The address to screen
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = KytArgs::parse();

    let pretty = matches!(args.output_format, LogOutputFormat::Pretty);
    logging::setup_logging(logging::DEFAULT_DIRECTIVES, pretty);

    let overrides = [
        ("kyt.app_id", args.app_id),
        ("kyt.app_secret", args.app_secret),
        ("kyt.app_root", args.app_root),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|value| (key, value)));

    // Load the configuration file and/or environment variables.
    let settings = Settings::new(args.config, overrides)?;
    let client = KytClient::from_config(&settings.kyt)?;

    let output = match args.command {
        Command::Malice { platform, address } => {
            let record = client.get_malicious_addr(&platform, &address).await?;
            serde_json::to_string_pretty(&record)?
        }
        Command::Sanction { platform, address } => {
            let record = client.get_sanctioned_addr(&platform, &address).await?;
            serde_json::to_string_pretty(&record)?
        }
    };
    println!("{output}");

    Ok(())
}
