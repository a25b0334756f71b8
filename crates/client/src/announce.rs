use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use contracts::domain::{OrderWindow, WindowState};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::webhook::{close_message, open_message, Notifier};

/// Persistent set of window ids that have already been announced.
///
/// Injected so the poller can run against an in-memory set in tests and a
/// file-backed one in production; combined with the server-side
/// `announced_*` flags this keeps every notification at-most-once.
pub trait AnnouncementStore: Send + Sync {
    fn has(&self, id: &Uuid) -> bool;
    fn mark_seen(&self, id: &Uuid);
}

#[derive(Default)]
pub struct InMemoryStore {
    seen: Mutex<HashSet<Uuid>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnnouncementStore for InMemoryStore {
    fn has(&self, id: &Uuid) -> bool {
        self.seen.lock().expect("store lock poisoned").contains(id)
    }

    fn mark_seen(&self, id: &Uuid) {
        self.seen.lock().expect("store lock poisoned").insert(*id);
    }
}

/// File-backed store: a JSON array of window ids. Write failures are logged
/// and tolerated; the worst case is a duplicate announcement after restart.
pub struct JsonFileStore {
    path: PathBuf,
    seen: Mutex<HashSet<Uuid>>,
}

impl JsonFileStore {
    pub fn load(path: PathBuf) -> Self {
        let seen = std::fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str::<Vec<Uuid>>(&s).ok())
            .map(HashSet::from_iter)
            .unwrap_or_default();
        Self {
            path,
            seen: Mutex::new(seen),
        }
    }

    fn persist(&self, seen: &HashSet<Uuid>) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let ids: Vec<&Uuid> = seen.iter().collect();
        match serde_json::to_string(&ids) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    tracing::warn!("failed to persist announcement set: {}", e);
                }
            }
            Err(e) => tracing::warn!("failed to serialize announcement set: {}", e),
        }
    }
}

impl AnnouncementStore for JsonFileStore {
    fn has(&self, id: &Uuid) -> bool {
        self.seen.lock().expect("store lock poisoned").contains(id)
    }

    fn mark_seen(&self, id: &Uuid) {
        let mut seen = self.seen.lock().expect("store lock poisoned");
        seen.insert(*id);
        self.persist(&seen);
    }
}

/// Writes window flags back to the backend after an announcement.
#[async_trait]
pub trait WindowAcker: Send + Sync {
    async fn ack_closed(&self, id: Uuid) -> Result<(), ClientError>;
}

#[async_trait]
impl WindowAcker for ApiClient {
    async fn ack_closed(&self, id: Uuid) -> Result<(), ClientError> {
        self.update_window(id, &serde_json::json!({ "announced_close": true }))
            .await
    }
}

/// Emits the open/close Discord announcements for polled windows, at most
/// once per window even under overlapping polls.
///
/// Open announcements are not written back to the backend (only the local
/// set remembers them); close announcements also flip `announced_close`
/// remotely, best-effort.
pub struct Announcer<'a> {
    notifier: &'a dyn Notifier,
    acker: &'a dyn WindowAcker,
    open_store: &'a dyn AnnouncementStore,
    close_store: &'a dyn AnnouncementStore,
    open_pending: Mutex<HashSet<Uuid>>,
    close_pending: Mutex<HashSet<Uuid>>,
}

impl<'a> Announcer<'a> {
    pub fn new(
        notifier: &'a dyn Notifier,
        acker: &'a dyn WindowAcker,
        open_store: &'a dyn AnnouncementStore,
        close_store: &'a dyn AnnouncementStore,
    ) -> Self {
        Self {
            notifier,
            acker,
            open_store,
            close_store,
            open_pending: Mutex::new(HashSet::new()),
            close_pending: Mutex::new(HashSet::new()),
        }
    }

    /// Claim a window for one in-flight announcement. Returns false when a
    /// concurrent poll already holds it.
    fn begin(pending: &Mutex<HashSet<Uuid>>, id: Uuid) -> bool {
        pending.lock().expect("pending lock poisoned").insert(id)
    }

    /// Release the in-flight marker. Only called after the remote attempt
    /// has completed, whether it succeeded or not.
    fn finish(pending: &Mutex<HashSet<Uuid>>, id: Uuid) {
        pending.lock().expect("pending lock poisoned").remove(&id);
    }

    /// Announce every window that is open at `now` and not yet announced.
    /// Returns how many announcements went out.
    pub async fn announce_opened(&self, windows: &[OrderWindow], now: DateTime<Utc>) -> usize {
        let mut announced = 0;
        for window in windows {
            if window.state(now) != WindowState::OpenNow || window.announced_open {
                continue;
            }
            if self.open_store.has(&window.id) {
                continue;
            }
            if !Self::begin(&self.open_pending, window.id) {
                continue;
            }

            tracing::info!("announcing open window {} ({})", window.id, window.period_label());
            self.notifier.post(&open_message(window)).await;
            self.open_store.mark_seen(&window.id);
            announced += 1;

            Self::finish(&self.open_pending, window.id);
        }
        announced
    }

    /// Announce every window that has ended and not yet been announced as
    /// closed, then flip `announced_close` on the backend.
    pub async fn announce_closed(&self, windows: &[OrderWindow], now: DateTime<Utc>) -> usize {
        let mut announced = 0;
        for window in windows {
            if window.state(now) != WindowState::Ended || window.announced_close {
                continue;
            }
            if self.close_store.has(&window.id) {
                continue;
            }
            if !Self::begin(&self.close_pending, window.id) {
                continue;
            }

            tracing::info!("announcing closed window {} ({})", window.id, window.period_label());
            self.notifier.post(&close_message(window)).await;
            self.close_store.mark_seen(&window.id);
            announced += 1;

            if let Err(e) = self.acker.ack_closed(window.id).await {
                tracing::warn!("failed to mark window {} as announced: {}", window.id, e);
            }

            Self::finish(&self.close_pending, window.id);
        }
        announced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use contracts::domain::PeriodCode;

    struct RecordingNotifier {
        posts: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                posts: Mutex::new(Vec::new()),
            }
        }

        fn count(&self) -> usize {
            self.posts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn post(&self, content: &str) {
            self.posts.lock().unwrap().push(content.to_string());
        }
    }

    struct RecordingAcker {
        acked: Mutex<Vec<Uuid>>,
        fail: bool,
    }

    impl RecordingAcker {
        fn new(fail: bool) -> Self {
            Self {
                acked: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl WindowAcker for RecordingAcker {
        async fn ack_closed(&self, id: Uuid) -> Result<(), ClientError> {
            if self.fail {
                return Err(ClientError::Validation("boom".into()));
            }
            self.acked.lock().unwrap().push(id);
            Ok(())
        }
    }

    fn window(active: bool, announced_open: bool, announced_close: bool) -> OrderWindow {
        OrderWindow {
            id: Uuid::new_v4(),
            order_no: None,
            start_time: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 3, 7, 23, 59, 0).unwrap(),
            orderanke: Some(PeriodCode(31)),
            is_active: active,
            announced_open,
            announced_close,
        }
    }

    fn during() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap()
    }

    fn after() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_open_announced_at_most_once() {
        let notifier = RecordingNotifier::new();
        let acker = RecordingAcker::new(false);
        let open_store = InMemoryStore::new();
        let close_store = InMemoryStore::new();
        let announcer = Announcer::new(&notifier, &acker, &open_store, &close_store);

        let windows = vec![window(true, false, false)];
        assert_eq!(announcer.announce_opened(&windows, during()).await, 1);
        // Repeated polls with the same list stay silent.
        assert_eq!(announcer.announce_opened(&windows, during()).await, 0);
        assert_eq!(announcer.announce_opened(&windows, during()).await, 0);
        assert_eq!(notifier.count(), 1);
        assert!(open_store.has(&windows[0].id));
    }

    #[tokio::test]
    async fn test_open_skips_flagged_and_closed_windows() {
        let notifier = RecordingNotifier::new();
        let acker = RecordingAcker::new(false);
        let open_store = InMemoryStore::new();
        let close_store = InMemoryStore::new();
        let announcer = Announcer::new(&notifier, &acker, &open_store, &close_store);

        let windows = vec![
            window(true, true, false),  // already flagged by the server
            window(false, false, false), // inactive
        ];
        assert_eq!(announcer.announce_opened(&windows, during()).await, 0);
        // Time outside the range means nothing is open either.
        let open = vec![window(true, false, false)];
        assert_eq!(announcer.announce_opened(&open, after()).await, 0);
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test]
    async fn test_close_announces_and_acks() {
        let notifier = RecordingNotifier::new();
        let acker = RecordingAcker::new(false);
        let open_store = InMemoryStore::new();
        let close_store = InMemoryStore::new();
        let announcer = Announcer::new(&notifier, &acker, &open_store, &close_store);

        let windows = vec![window(true, true, false)];
        assert_eq!(announcer.announce_closed(&windows, after()).await, 1);
        assert_eq!(acker.acked.lock().unwrap().as_slice(), &[windows[0].id]);

        // Second poll: local store already has it.
        assert_eq!(announcer.announce_closed(&windows, after()).await, 0);
        assert_eq!(notifier.count(), 1);
    }

    #[tokio::test]
    async fn test_close_ack_failure_still_marks_seen() {
        let notifier = RecordingNotifier::new();
        let acker = RecordingAcker::new(true);
        let open_store = InMemoryStore::new();
        let close_store = InMemoryStore::new();
        let announcer = Announcer::new(&notifier, &acker, &open_store, &close_store);

        let windows = vec![window(true, true, false)];
        assert_eq!(announcer.announce_closed(&windows, after()).await, 1);
        assert!(close_store.has(&windows[0].id));
        assert!(announcer.close_pending.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_still_open_window_is_not_closed() {
        let notifier = RecordingNotifier::new();
        let acker = RecordingAcker::new(false);
        let open_store = InMemoryStore::new();
        let close_store = InMemoryStore::new();
        let announcer = Announcer::new(&notifier, &acker, &open_store, &close_store);

        let windows = vec![window(true, true, false)];
        assert_eq!(announcer.announce_closed(&windows, during()).await, 0);
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_json_file_store_roundtrip() {
        let path = std::env::temp_dir().join(format!("announce-{}.json", Uuid::new_v4()));
        let id = Uuid::new_v4();

        let store = JsonFileStore::load(path.clone());
        assert!(!store.has(&id));
        store.mark_seen(&id);
        assert!(store.has(&id));

        // A fresh load sees what was persisted.
        let reloaded = JsonFileStore::load(path.clone());
        assert!(reloaded.has(&id));
        assert!(!reloaded.has(&Uuid::new_v4()));

        let _ = std::fs::remove_file(path);
    }
}
