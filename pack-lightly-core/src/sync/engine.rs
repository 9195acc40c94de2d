//! Category synchronization engine.
//!
//! Persists one category's current item sequence to the server and reflects
//! the outcome as a transient per-category status:
//!
//! ```text
//! saving -> saved   (entry cleared after SAVED_TTL)
//! saving -> error   (one automatic retry after RETRY_DELAY,
//!                    then error until the next mutation)
//! ```
//!
//! Synchronization is fire-and-forget: failures never surface as `Err` to
//! the caller, only through the status flag. Every scheduled task (expiry,
//! retry) captures the engine generation at schedule time and re-checks it
//! at fire time; `seed` advances the generation, so work scheduled against
//! a discarded list can never touch the current one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use uuid::Uuid;

use super::transport::CategoryTransport;
use crate::checklist::{ChecklistStore, SaveStatus};
use crate::models::{Category, PackingList};

/// How long a `saved` status stays visible.
pub const SAVED_TTL: Duration = Duration::from_millis(2000);
/// Delay before the single automatic retry of a failed save.
pub const RETRY_DELAY: Duration = Duration::from_millis(5000);

/// Synchronization engine for one packing list.
///
/// Cheap to clone; clones share the store, transport and generation.
/// Create one per selected list and drop it on navigation.
#[derive(Clone)]
pub struct SyncEngine {
    store: Arc<Mutex<ChecklistStore>>,
    transport: Arc<dyn CategoryTransport>,
    list_id: Uuid,
    generation: Arc<AtomicU64>,
}

impl SyncEngine {
    pub fn new(
        store: Arc<Mutex<ChecklistStore>>,
        transport: Arc<dyn CategoryTransport>,
        list_id: Uuid,
    ) -> Self {
        Self {
            store,
            transport,
            list_id,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn list_id(&self) -> Uuid {
        self.list_id
    }

    /// The shared store this engine reads from and writes statuses to.
    pub fn store(&self) -> Arc<Mutex<ChecklistStore>> {
        Arc::clone(&self.store)
    }

    /// Current save status for a category.
    pub fn status(&self, category: &Category) -> Option<SaveStatus> {
        self.lock_store().status(category)
    }

    /// Seed the store from a freshly fetched list document.
    ///
    /// Advances the generation, so every retry and expiry scheduled before
    /// this point becomes a no-op.
    pub fn seed(&self, list: &PackingList) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.lock_store().replace_all(list.category_map());
        tracing::debug!("seeded checklist from list '{}'", list.title);
    }

    /// Push a category's current item sequence to the server.
    ///
    /// The status transition to `saving` and the item snapshot happen
    /// synchronously, so rapid repeated calls each carry the freshest
    /// sequence as of their call time. The returned handle resolves when
    /// the first attempt finishes; the outcome is only observable through
    /// the status flag.
    pub fn sync_category(&self, category: Category) -> JoinHandle<()> {
        let generation = self.generation.load(Ordering::SeqCst);
        self.start_attempt(category, generation, true)
    }

    fn start_attempt(&self, category: Category, generation: u64, retry_allowed: bool) -> JoinHandle<()> {
        let items = {
            let mut store = self.lock_store();
            store.set_status(&category, SaveStatus::Saving);
            store.items_snapshot(&category)
        };
        tracing::debug!(
            "pushing {} item(s) for category '{}'",
            items.len(),
            category
        );

        let engine = self.clone();
        tokio::spawn(async move {
            match engine
                .transport
                .push_category(engine.list_id, category.clone(), items)
                .await
            {
                Ok(()) => {
                    if engine.stale(generation) {
                        return;
                    }
                    engine.lock_store().set_status(&category, SaveStatus::Saved);
                    tracing::debug!("category '{}' saved", category);
                    engine.schedule_saved_expiry(category, generation);
                }
                Err(e) => {
                    tracing::warn!("failed to save category '{}': {}", category, e);
                    if engine.stale(generation) {
                        return;
                    }
                    engine.lock_store().set_status(&category, SaveStatus::Error);
                    if retry_allowed {
                        engine.schedule_retry(category, generation);
                    }
                }
            }
        })
    }

    /// Clears the `saved` badge after `SAVED_TTL`, unless a newer call or a
    /// reseed got there first.
    fn schedule_saved_expiry(&self, category: Category, generation: u64) {
        let engine = self.clone();
        tokio::spawn(async move {
            sleep(SAVED_TTL).await;
            if engine.stale(generation) {
                return;
            }
            engine
                .lock_store()
                .clear_status_if(&category, SaveStatus::Saved);
        });
    }

    /// Fires the single automatic retry after `RETRY_DELAY`, gated on the
    /// status still being `error` (a newer call supersedes the retry).
    fn schedule_retry(&self, category: Category, generation: u64) {
        let engine = self.clone();
        tokio::spawn(async move {
            sleep(RETRY_DELAY).await;
            if engine.stale(generation) {
                return;
            }
            let still_error = engine.lock_store().status(&category) == Some(SaveStatus::Error);
            if still_error {
                tracing::debug!("retrying category '{}'", category);
                engine.start_attempt(category, generation, false);
            }
        });
    }

    fn stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    fn lock_store(&self) -> MutexGuard<'_, ChecklistStore> {
        self.store.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::models::Item;
    use futures::future::BoxFuture;
    use std::collections::VecDeque;

    /// Scripted transport: pops one outcome per push (default Ok), records
    /// every pushed payload and the store status observed at push time.
    struct MockTransport {
        outcomes: Mutex<VecDeque<Result<(), ApiError>>>,
        pushes: Mutex<Vec<(Category, Vec<Item>)>>,
        watch: Arc<Mutex<ChecklistStore>>,
        statuses_at_push: Mutex<Vec<Option<SaveStatus>>>,
    }

    impl MockTransport {
        fn new(watch: Arc<Mutex<ChecklistStore>>) -> Self {
            Self {
                outcomes: Mutex::new(VecDeque::new()),
                pushes: Mutex::new(Vec::new()),
                watch,
                statuses_at_push: Mutex::new(Vec::new()),
            }
        }

        fn script(&self, outcomes: Vec<Result<(), ApiError>>) {
            *self.outcomes.lock().unwrap() = outcomes.into();
        }

        fn push_count(&self) -> usize {
            self.pushes.lock().unwrap().len()
        }

        fn last_push(&self) -> (Category, Vec<Item>) {
            self.pushes.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl CategoryTransport for MockTransport {
        fn push_category(
            &self,
            _list_id: Uuid,
            category: Category,
            items: Vec<Item>,
        ) -> BoxFuture<'static, Result<(), ApiError>> {
            let outcome = self
                .outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(()));
            self.statuses_at_push
                .lock()
                .unwrap()
                .push(self.watch.lock().unwrap().status(&category));
            self.pushes.lock().unwrap().push((category, items));
            Box::pin(async move { outcome })
        }
    }

    fn test_list() -> PackingList {
        PackingList::new("Test Trip")
            .with_category(
                Category::Clothing,
                vec![Item::new("Jacket"), Item::new("Socks")],
            )
            .with_category(Category::Toiletries, vec![Item::new("Toothbrush")])
    }

    fn engine_with_mock() -> (SyncEngine, Arc<MockTransport>) {
        let store = Arc::new(Mutex::new(ChecklistStore::new()));
        let transport = Arc::new(MockTransport::new(Arc::clone(&store)));
        let engine = SyncEngine::new(store, transport.clone(), Uuid::new_v4());
        engine.seed(&test_list());
        (engine, transport)
    }

    /// Lets already-woken spawned tasks run to completion.
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_sets_saving_synchronously() {
        let (engine, _transport) = engine_with_mock();
        let handle = engine.sync_category(Category::Clothing);
        assert_eq!(engine.status(&Category::Clothing), Some(SaveStatus::Saving));
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_success_saved_then_cleared() {
        let (engine, transport) = engine_with_mock();

        engine.sync_category(Category::Clothing).await.unwrap();
        assert_eq!(engine.status(&Category::Clothing), Some(SaveStatus::Saved));
        assert_eq!(transport.push_count(), 1);

        sleep(SAVED_TTL + Duration::from_millis(100)).await;
        settle().await;
        assert_eq!(engine.status(&Category::Clothing), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_pushes_snapshot_at_call_time() {
        let (engine, transport) = engine_with_mock();

        {
            let store = engine.store();
            let mut store = store.lock().unwrap();
            store.add_item(&Category::Clothing, Item::new("Hat"));
        }
        let handle = engine.sync_category(Category::Clothing);

        // Mutations after the call don't affect the in-flight payload
        engine
            .store()
            .lock()
            .unwrap()
            .add_item(&Category::Clothing, Item::new("Gloves"));
        handle.await.unwrap();

        let (category, items) = transport.last_push();
        assert_eq!(category, Category::Clothing);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Jacket", "Socks", "Hat"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_failure_retries_once_then_saves() {
        let (engine, transport) = engine_with_mock();
        transport.script(vec![Err(ApiError::Status(500)), Ok(())]);

        engine.sync_category(Category::Clothing).await.unwrap();
        assert_eq!(engine.status(&Category::Clothing), Some(SaveStatus::Error));

        sleep(RETRY_DELAY + Duration::from_millis(100)).await;
        settle().await;

        // saving -> error -> saving -> saved: both pushes observed "saving"
        assert_eq!(engine.status(&Category::Clothing), Some(SaveStatus::Saved));
        assert_eq!(transport.push_count(), 2);
        assert_eq!(
            *transport.statuses_at_push.lock().unwrap(),
            vec![Some(SaveStatus::Saving), Some(SaveStatus::Saving)]
        );

        sleep(SAVED_TTL + Duration::from_millis(100)).await;
        settle().await;
        assert_eq!(engine.status(&Category::Clothing), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_failure_twice_stays_error() {
        let (engine, transport) = engine_with_mock();
        transport.script(vec![
            Err(ApiError::Status(500)),
            Err(ApiError::Transport("connection reset".to_string())),
        ]);

        engine.sync_category(Category::Clothing).await.unwrap();
        sleep(RETRY_DELAY + Duration::from_millis(100)).await;
        settle().await;

        assert_eq!(engine.status(&Category::Clothing), Some(SaveStatus::Error));
        assert_eq!(transport.push_count(), 2);

        // No second retry, ever
        sleep(RETRY_DELAY * 3).await;
        settle().await;
        assert_eq!(transport.push_count(), 2);
        assert_eq!(engine.status(&Category::Clothing), Some(SaveStatus::Error));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_superseded_by_newer_sync() {
        let (engine, transport) = engine_with_mock();
        transport.script(vec![Err(ApiError::Status(502)), Ok(())]);

        engine.sync_category(Category::Clothing).await.unwrap();
        assert_eq!(engine.status(&Category::Clothing), Some(SaveStatus::Error));

        // A manual mutation re-syncs before the retry delay elapses
        engine.sync_category(Category::Clothing).await.unwrap();
        assert_eq!(engine.status(&Category::Clothing), Some(SaveStatus::Saved));

        sleep(RETRY_DELAY + Duration::from_millis(100)).await;
        settle().await;

        // The scheduled retry found the status no longer "error" and bailed
        assert_eq!(transport.push_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_seed_suppresses_scheduled_retry() {
        let (engine, transport) = engine_with_mock();
        transport.script(vec![Err(ApiError::Status(500))]);

        engine.sync_category(Category::Clothing).await.unwrap();
        assert_eq!(engine.status(&Category::Clothing), Some(SaveStatus::Error));

        // Switching lists discards the pending retry
        engine.seed(&test_list());

        sleep(RETRY_DELAY * 2).await;
        settle().await;
        assert_eq!(transport.push_count(), 1);
        assert_eq!(engine.status(&Category::Clothing), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_seed_suppresses_stale_saved_expiry() {
        let (engine, transport) = engine_with_mock();

        engine.sync_category(Category::Clothing).await.unwrap();
        assert_eq!(engine.status(&Category::Clothing), Some(SaveStatus::Saved));

        sleep(Duration::from_millis(1000)).await;

        // Reseed and save again; the first expiry (due at t=2s) must not
        // clear the badge belonging to the new session (due at t=3s)
        engine.seed(&test_list());
        engine.sync_category(Category::Clothing).await.unwrap();

        sleep(Duration::from_millis(1500)).await;
        settle().await;
        assert_eq!(engine.status(&Category::Clothing), Some(SaveStatus::Saved));

        sleep(Duration::from_millis(1000)).await;
        settle().await;
        assert_eq!(engine.status(&Category::Clothing), None);
        assert_eq!(transport.push_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_adds_sync_single_item() {
        let (engine, transport) = engine_with_mock();
        let store = engine.store();

        // Two overlapping adds of the same name before either sync lands
        store
            .lock()
            .unwrap()
            .add_item(&Category::Toiletries, Item::new("Soap"));
        store
            .lock()
            .unwrap()
            .add_item(&Category::Toiletries, Item::new("soap"));
        let first = engine.sync_category(Category::Toiletries);
        let second = engine.sync_category(Category::Toiletries);
        first.await.unwrap();
        second.await.unwrap();

        let (_, items) = transport.last_push();
        let soaps = items.iter().filter(|i| i.matches_name("Soap")).count();
        assert_eq!(soaps, 1);
    }
}
