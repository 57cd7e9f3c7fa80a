use arkhos::config::{AppConfig, load_config};
use arkhos::search::{GeminiClient, SearchOrchestrator};
use arkhos::ui::SearchSession;
use arkhos::ui::listener::listen_for_commands;

use std::sync::Arc;
use std::time::Duration;
use tokio::io::{BufReader, stdin, stdout};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Logs go to stderr so the rendered screen on stdout stays readable
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let config: AppConfig = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let api_key = match config.resolve_api_key() {
        Ok(key) => key,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    let client = match GeminiClient::with_base_url(
        &api_key,
        &config.model,
        config.request_timeout_seconds.map(Duration::from_secs),
        &config.api_base_url,
    ) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create Gemini client: {}", e);
            return;
        }
    };

    info!(
        "Arkhos started with {} for {} ({})",
        client.model(),
        config.market.region,
        config.market.currency_code
    );

    let orchestrator = Arc::new(SearchOrchestrator::new(client, config.market.clone()));
    let session = SearchSession::new(orchestrator);

    if let Err(e) = listen_for_commands(session, BufReader::new(stdin()), stdout()).await {
        error!("Terminal I/O failed: {}", e);
    }
    info!("Arkhos stopped.");

    // The blocking stdin reader would otherwise hold the runtime open until the next line
    std::process::exit(0);
}
