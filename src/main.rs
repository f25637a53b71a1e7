use std::time::Duration;

use chatwidget::session;
use chatwidget::webhook::config::DEFAULT_WEBHOOK_URL;
use chatwidget::webhook::{ConfigError, WebhookClient, WebhookConfig};
use chatwidget::widget::WidgetState;
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "chatwidget", about = "Terminal chat widget backed by a webhook")]
struct Cli {
    #[arg(long, env = "CHAT_WEBHOOK_URL", default_value = DEFAULT_WEBHOOK_URL)]
    endpoint_url: String,

    /// Request timeout in seconds; unbounded when unset.
    #[arg(long, env = "CHAT_WEBHOOK_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Start with the panel open.
    #[arg(long, default_value_t = false)]
    open: bool,
}

fn build_config(cli: &Cli) -> Result<WebhookConfig, ConfigError> {
    let config = WebhookConfig::new(cli.endpoint_url.as_str())?;
    match cli.timeout_secs {
        Some(0) => Err(ConfigError::InvalidTimeout("0".to_owned())),
        Some(secs) => Ok(config.with_timeout(Duration::from_secs(secs))),
        None => Ok(config),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = WebhookClient::new(build_config(&cli)?)?;
    tracing::info!(endpoint = client.endpoint_url(), "chat widget ready");

    let mut widget = WidgetState::new();
    if cli.open {
        widget.open();
    }
    let stdin = BufReader::new(tokio::io::stdin());
    session::run(&mut widget, &client, stdin, &mut std::io::stdout()).await?;
    Ok(())
}
