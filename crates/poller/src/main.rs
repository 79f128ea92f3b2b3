use std::time::Duration;

use tracing_subscriber::EnvFilter;

use hwbot_common::config::AppConfig;
use hwbot_decoders::ResponseContract;
use hwbot_notifier::TelegramNotifier;
use hwbot_poller::client::PracticumClient;
use hwbot_poller::poller::StatusPoller;

const DEFAULT_LOG_FILTER: &str =
    "hwbot_poller=debug,hwbot_engine=debug,hwbot_notifier=debug,hwbot_decoders=debug";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("hwbot starting...");

    // Load configuration; a missing secret stops the bot before the first poll
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(critical = true, kind = %e.kind(), "{}. Программа принудительно остановлена", e);
            return Ok(());
        }
    };

    let source = PracticumClient::new(
        config.endpoint.clone(),
        config.credentials.practicum_token.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;

    let notifier = TelegramNotifier::new(
        config.credentials.telegram_token.clone(),
        config.credentials.telegram_chat_id.clone(),
    )?;
    tracing::info!(chat_id = notifier.chat_id(), "Telegram notifier ready");

    let mut poller = StatusPoller::new(
        source,
        notifier,
        Duration::from_secs(config.retry_period_secs),
    )
    .with_contract(ResponseContract {
        require_current_date: config.require_current_date,
    })
    .with_tracking_policy(config.tracking_policy);

    // Run until Ctrl+C; the loop itself never exits
    tokio::select! {
        _ = poller.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("hwbot stopped.");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
