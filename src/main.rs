use std::process::ExitCode;

use modflow::config::{load_denylist, AppConfig};
use modflow::errors::BotError;
use modflow::providers::build_pipeline;
use tokio::io::BufReader;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
                                  .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                                  .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("modflow-bot: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), BotError> {
    // Configuración, lista de bloqueo y servicios se validan antes de leer el gateway.
    let config = AppConfig::from_env()?;
    let denylist = load_denylist(&config.denylist_path)?;
    let pipeline = build_pipeline(&config)?;
    tracing::info!(bot = %config.bot_name, moderation = %config.naming.moderation, monitored = %config.naming.monitored,
                   "modflow-bot starting");

    modflow::bot::serve(&config, denylist, pipeline, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}
