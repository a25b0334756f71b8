pub mod announce;
pub mod api;
pub mod config;
pub mod error;
pub mod order;
pub mod webhook;

use announce::{Announcer, JsonFileStore};
use api::ApiClient;
use webhook::DiscordNotifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("client.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    let config = config::load_config()?;
    let state_dir = config::get_state_dir(&config);

    let api = ApiClient::new(&config.api.base_url, config.api.token.clone());
    let notifier = DiscordNotifier::new(&config.webhook.url);
    let open_store = JsonFileStore::load(state_dir.join("open_announced.json"));
    let close_store = JsonFileStore::load(state_dir.join("closed_announced.json"));
    let announcer = Announcer::new(&notifier, &api, &open_store, &close_store);

    tracing::info!(
        "announcement poller started against {} (every {}s)",
        config.api.base_url,
        config.announce.poll_interval_secs
    );

    let mut interval =
        tokio::time::interval(std::time::Duration::from_secs(config.announce.poll_interval_secs));
    loop {
        interval.tick().await;

        let windows = match api.list_windows().await {
            Ok(w) => w,
            Err(e) => {
                // Transient failure: report and try again next tick.
                tracing::warn!("failed to fetch windows: {}", e);
                continue;
            }
        };

        let now = chrono::Utc::now();
        let opened = announcer.announce_opened(&windows, now).await;
        let closed = announcer.announce_closed(&windows, now).await;
        if opened + closed > 0 {
            tracing::info!("announced {} opened, {} closed", opened, closed);
        }
    }
}
