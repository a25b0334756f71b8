use async_trait::async_trait;
use contracts::domain::OrderWindow;
use contracts::format::format_ui_datetime;
use serde_json::json;

/// Outbound text notification sink. Best-effort only: implementations never
/// return an error, they log and move on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn post(&self, content: &str);
}

/// Discord webhook notifier: fire-and-forget `{"content": …}` POST.
pub struct DiscordNotifier {
    client: reqwest::Client,
    url: String,
}

impl DiscordNotifier {
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn post(&self, content: &str) {
        if self.url.is_empty() {
            return;
        }
        let result = self
            .client
            .post(&self.url)
            .json(&json!({ "content": content }))
            .send()
            .await;
        match result {
            Ok(response) if !response.status().is_success() => {
                tracing::warn!("discord webhook returned {}", response.status());
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("discord webhook failed: {}", e);
            }
        }
    }
}

/// Announcement posted when a window opens.
pub fn open_message(window: &OrderWindow) -> String {
    format!(
        "@here\n# Open Order\nPeriode {}\nDibuka dari {} sampai {}\nSilakan submit sebelum tutup periode.",
        window.period_label(),
        format_ui_datetime(&window.start_time),
        format_ui_datetime(&window.end_time),
    )
}

/// Announcement posted when a window has closed.
pub fn close_message(window: &OrderWindow) -> String {
    format!(
        "@here\n# Orderan periode {} telah ditutup.\nDibuka dari {} sampai {}\nDi tunggu open order selanjutnya yaa",
        window.period_label(),
        format_ui_datetime(&window.start_time),
        format_ui_datetime(&window.end_time),
    )
}
