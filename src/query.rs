//! Cached content fetching.
//!
//! `QueryClient` memoizes one async fetch per key: concurrent subscribers
//! attach to the same in-flight operation, successful values age into a
//! stale-but-usable state that refreshes in the background, and idle
//! entries are evicted lazily on the next access. The client is built once
//! in `main` with an injected clock and spawner and handed to the pages
//! that need it.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use leptos::prelude::*;
use thiserror::Error;

/// Failure surfaced to a page after every retry is exhausted.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// What a subscriber currently sees for its key.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Ready(T),
    Failed(FetchError),
}

/// Per-query policy. Times are milliseconds; defaults mirror the content
/// endpoints this site ships with (5 min stale, 10 min cache, 2 retries).
#[derive(Clone, Copy, Debug)]
pub struct QueryOptions {
    /// Age after which a cached value is served but refreshed in the
    /// background.
    pub stale_time_ms: f64,
    /// Idle time after which an unused entry is dropped entirely.
    pub cache_time_ms: f64,
    /// Automatic retries after the first failed attempt.
    pub max_retries: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time_ms: 5.0 * 60_000.0,
            cache_time_ms: 10.0 * 60_000.0,
            max_retries: 2,
        }
    }
}

type Clock = Arc<dyn Fn() -> f64 + Send + Sync>;
type Spawner = Arc<dyn Fn(LocalBoxFuture<'static, ()>) + Send + Sync>;
type Listener = Arc<dyn Fn(&EntryStatus) + Send + Sync>;

#[derive(Clone)]
enum EntryStatus {
    Pending,
    Ready {
        value: Arc<dyn Any + Send + Sync>,
        fetched_at: f64,
    },
    Failed(FetchError),
}

struct Entry {
    status: EntryStatus,
    last_access: f64,
    refreshing: bool,
    listeners: Vec<(u64, Listener)>,
}

impl Entry {
    fn pending(now: f64) -> Self {
        Self {
            status: EntryStatus::Pending,
            last_access: now,
            refreshing: false,
            listeners: Vec::new(),
        }
    }
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, Entry>,
    next_listener_id: u64,
}

fn state_of<T>(status: &EntryStatus) -> QueryState<T>
where
    T: Clone + Send + Sync + 'static,
{
    match status {
        EntryStatus::Pending => QueryState::Loading,
        EntryStatus::Ready { value, .. } => match Arc::clone(value).downcast::<T>() {
            Ok(value) => QueryState::Ready((*value).clone()),
            Err(_) => QueryState::Failed(FetchError::new("cached value has an unexpected type")),
        },
        EntryStatus::Failed(err) => QueryState::Failed(err.clone()),
    }
}

/// Process-wide content cache. Cheap to clone; clones share the same
/// entries.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<Mutex<CacheInner>>,
    clock: Clock,
    spawner: Spawner,
}

/// Keeps a subscription alive; dropping it detaches the listener.
pub struct QueryHandle {
    inner: Arc<Mutex<CacheInner>>,
    key: String,
    id: u64,
}

impl Drop for QueryHandle {
    fn drop(&mut self) {
        let mut cache = self.inner.lock().expect("content cache lock poisoned");
        if let Some(entry) = cache.entries.get_mut(&self.key) {
            entry.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

impl QueryClient {
    pub fn new(clock: Clock, spawner: Spawner) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner::default())),
            clock,
            spawner,
        }
    }

    /// Subscribe to a key. `on_change` fires immediately with the current
    /// state and again on every later transition, until the returned handle
    /// is dropped. The fetcher only runs when this access actually starts
    /// or refreshes a fetch.
    pub fn query<T, F, Fut>(
        &self,
        key: &str,
        options: QueryOptions,
        fetcher: F,
        on_change: impl Fn(QueryState<T>) + Send + Sync + 'static,
    ) -> QueryHandle
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, FetchError>> + 'static,
    {
        let now = (self.clock)();
        let listener: Listener = Arc::new(move |status: &EntryStatus| on_change(state_of(status)));

        let mut start_fetch = false;
        let mut refresh = false;
        let id;
        let snapshot;
        {
            let mut cache = self.inner.lock().expect("content cache lock poisoned");

            // Lazy eviction: an idle entry past its cache time starts over.
            let evict = cache.entries.get(key).is_some_and(|entry| {
                entry.listeners.is_empty() && now - entry.last_access > options.cache_time_ms
            });
            if evict {
                cache.entries.remove(key);
            }

            id = cache.next_listener_id;
            cache.next_listener_id += 1;

            let entry = cache.entries.entry(key.to_owned()).or_insert_with(|| {
                start_fetch = true;
                Entry::pending(now)
            });
            entry.last_access = now;

            if matches!(entry.status, EntryStatus::Failed(_)) {
                // A fresh subscriber restarts a failed key from scratch.
                entry.status = EntryStatus::Pending;
                start_fetch = true;
            } else if let EntryStatus::Ready { fetched_at, .. } = entry.status {
                if now - fetched_at > options.stale_time_ms && !entry.refreshing {
                    entry.refreshing = true;
                    refresh = true;
                }
            }

            entry.listeners.push((id, Arc::clone(&listener)));
            snapshot = entry.status.clone();
        }

        // Notify outside the lock; listeners may re-enter the client.
        listener(&snapshot);

        if start_fetch || refresh {
            self.spawn_fetch(key.to_owned(), options.max_retries, fetcher, refresh);
        }

        QueryHandle {
            inner: Arc::clone(&self.inner),
            key: key.to_owned(),
            id,
        }
    }

    fn spawn_fetch<T, F, Fut>(&self, key: String, max_retries: u32, fetcher: F, background: bool)
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, FetchError>> + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let clock = Arc::clone(&self.clock);
        let task = async move {
            let mut attempt = 0u32;
            let outcome = loop {
                match fetcher().await {
                    Ok(value) => break Ok(value),
                    Err(_) if attempt < max_retries => attempt += 1,
                    Err(err) => break Err(err),
                }
            };

            let now = clock();
            let notify = {
                let mut cache = inner.lock().expect("content cache lock poisoned");
                let Some(entry) = cache.entries.get_mut(&key) else {
                    return;
                };
                if matches!(entry.status, EntryStatus::Pending) && entry.listeners.is_empty() {
                    // Every consumer went away mid-flight: drop the result.
                    cache.entries.remove(&key);
                    return;
                }
                entry.refreshing = false;
                match outcome {
                    Ok(value) => {
                        entry.status = EntryStatus::Ready {
                            value: Arc::new(value),
                            fetched_at: now,
                        };
                    }
                    Err(err) => {
                        if background {
                            // Keep serving the last good value; the next
                            // stale access schedules another attempt.
                            leptos::logging::warn!("background refresh of {key:?} failed: {err}");
                            return;
                        }
                        entry.status = EntryStatus::Failed(err);
                    }
                }
                (
                    entry.status.clone(),
                    entry
                        .listeners
                        .iter()
                        .map(|(_, listener)| Arc::clone(listener))
                        .collect::<Vec<_>>(),
                )
            };
            let (status, listeners) = notify;
            for listener in &listeners {
                listener(&status);
            }
        };
        (self.spawner)(task.boxed_local());
    }
}

/// Bridge a cached fetch into a component: the returned signal tracks the
/// entry through Loading/Ready/Failed and unsubscribes when the component
/// is disposed.
pub fn use_query<T, F, Fut>(
    client: &QueryClient,
    key: &str,
    options: QueryOptions,
    fetcher: F,
) -> ReadSignal<QueryState<T>>
where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, FetchError>> + 'static,
{
    let (state, set_state) = signal(QueryState::Loading);
    let handle = client.query(key, options, fetcher, move |next| set_state.set(next));
    on_cleanup(move || drop(handle));
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::task::noop_waker;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
    use std::task::Context;

    thread_local! {
        static TASKS: RefCell<Vec<LocalBoxFuture<'static, ()>>> = const { RefCell::new(Vec::new()) };
    }

    fn test_client(time: &Arc<AtomicU64>) -> QueryClient {
        let time = Arc::clone(time);
        QueryClient::new(
            Arc::new(move || time.load(Ordering::Relaxed) as f64),
            Arc::new(|fut| TASKS.with(|t| t.borrow_mut().push(fut))),
        )
    }

    /// Poll every spawned task once; tasks blocked on a channel stay
    /// queued for the next call.
    fn drive() {
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        let mut tasks = TASKS.with(|t| t.borrow_mut().split_off(0));
        let mut still_pending = Vec::new();
        for mut task in tasks.drain(..) {
            if task.as_mut().poll(&mut cx).is_pending() {
                still_pending.push(task);
            }
        }
        TASKS.with(|t| t.borrow_mut().extend(still_pending));
    }

    type Log<T> = Arc<Mutex<Vec<QueryState<T>>>>;

    fn recorder<T>() -> (Log<T>, impl Fn(QueryState<T>) + Send + Sync + 'static)
    where
        T: Clone + Send + Sync + 'static,
    {
        let log: Log<T> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        (log, move |state| sink.lock().expect("log lock").push(state))
    }

    fn counting_fetcher(
        hits: &Arc<AtomicU32>,
    ) -> impl Fn() -> std::future::Ready<Result<u32, FetchError>> + 'static {
        let hits = Arc::clone(hits);
        move || {
            let n = hits.fetch_add(1, Ordering::Relaxed) + 1;
            std::future::ready(Ok(n))
        }
    }

    fn options(stale: f64, cache: f64, retries: u32) -> QueryOptions {
        QueryOptions {
            stale_time_ms: stale,
            cache_time_ms: cache,
            max_retries: retries,
        }
    }

    #[test]
    fn concurrent_subscribers_share_one_fetch() {
        let time = Arc::new(AtomicU64::new(0));
        let client = test_client(&time);
        let calls = Arc::new(AtomicU32::new(0));
        let (tx, rx) = oneshot::channel::<u32>();
        let rx = Rc::new(RefCell::new(Some(rx)));

        let fetcher = {
            let calls = Arc::clone(&calls);
            move || {
                calls.fetch_add(1, Ordering::Relaxed);
                let rx = rx.borrow_mut().take();
                async move {
                    match rx {
                        Some(rx) => rx.await.map_err(|_| FetchError::new("sender dropped")),
                        None => Ok(0),
                    }
                }
            }
        };

        let (log_a, on_a) = recorder::<u32>();
        let (log_b, on_b) = recorder::<u32>();
        let _a = client.query("stats", QueryOptions::default(), fetcher, on_a);
        drive();
        let _b = client.query(
            "stats",
            QueryOptions::default(),
            || std::future::ready(Err::<u32, _>(FetchError::new("should never run"))),
            on_b,
        );
        drive();

        assert_eq!(calls.load(Ordering::Relaxed), 1);
        tx.send(42).expect("receiver alive");
        drive();

        assert_eq!(*log_a.lock().unwrap(), vec![QueryState::Loading, QueryState::Ready(42)]);
        assert_eq!(*log_b.lock().unwrap(), vec![QueryState::Loading, QueryState::Ready(42)]);
    }

    #[test]
    fn stale_entry_served_immediately_then_refreshed_once() {
        let time = Arc::new(AtomicU64::new(0));
        let client = test_client(&time);
        let hits = Arc::new(AtomicU32::new(0));
        let opts = options(100.0, 10_000.0, 0);

        let (log_a, on_a) = recorder::<u32>();
        let a = client.query("content", opts, counting_fetcher(&hits), on_a);
        drive();
        assert_eq!(*log_a.lock().unwrap(), vec![QueryState::Loading, QueryState::Ready(1)]);
        drop(a);

        time.store(200, Ordering::Relaxed);
        let (log_b, on_b) = recorder::<u32>();
        let _b = client.query("content", opts, counting_fetcher(&hits), on_b);
        // The cached value arrives before the refresh runs, with no
        // visible Loading in between.
        assert_eq!(*log_b.lock().unwrap(), vec![QueryState::Ready(1)]);
        drive();
        assert_eq!(
            *log_b.lock().unwrap(),
            vec![QueryState::Ready(1), QueryState::Ready(2)]
        );
        assert_eq!(hits.load(Ordering::Relaxed), 2, "exactly one background refetch");
    }

    #[test]
    fn fresh_entry_does_not_refetch() {
        let time = Arc::new(AtomicU64::new(0));
        let client = test_client(&time);
        let hits = Arc::new(AtomicU32::new(0));
        let opts = options(100.0, 10_000.0, 0);

        let _a = client.query("content", opts, counting_fetcher(&hits), |_| {});
        drive();
        time.store(50, Ordering::Relaxed);
        let (log_b, on_b) = recorder::<u32>();
        let _b = client.query("content", opts, counting_fetcher(&hits), on_b);
        drive();

        assert_eq!(*log_b.lock().unwrap(), vec![QueryState::Ready(1)]);
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn idle_entry_is_evicted_after_cache_time() {
        let time = Arc::new(AtomicU64::new(0));
        let client = test_client(&time);
        let hits = Arc::new(AtomicU32::new(0));
        let opts = options(100.0, 10_000.0, 0);

        let a = client.query("content", opts, counting_fetcher(&hits), |_| {});
        drive();
        drop(a);

        time.store(20_000, Ordering::Relaxed);
        let (log_b, on_b) = recorder::<u32>();
        let _b = client.query("content", opts, counting_fetcher(&hits), on_b);
        drive();

        assert_eq!(
            *log_b.lock().unwrap(),
            vec![QueryState::Loading, QueryState::Ready(2)],
            "an evicted key starts over from Pending"
        );
        assert_eq!(hits.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn failure_is_retried_then_surfaced() {
        let time = Arc::new(AtomicU64::new(0));
        let client = test_client(&time);
        let calls = Arc::new(AtomicU32::new(0));

        let fetcher = {
            let calls = Arc::clone(&calls);
            move || {
                calls.fetch_add(1, Ordering::Relaxed);
                std::future::ready(Err::<u32, _>(FetchError::new("boom")))
            }
        };

        let (log, on_change) = recorder::<u32>();
        let _h = client.query("flaky", options(100.0, 10_000.0, 2), fetcher, on_change);
        drive();

        assert_eq!(calls.load(Ordering::Relaxed), 3, "initial attempt plus two retries");
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                QueryState::Loading,
                QueryState::Failed(FetchError::new("boom")),
            ]
        );
    }

    #[test]
    fn abandoned_pending_result_is_discarded() {
        let time = Arc::new(AtomicU64::new(0));
        let client = test_client(&time);
        let (tx, rx) = oneshot::channel::<u32>();
        let rx = Rc::new(RefCell::new(Some(rx)));

        let fetcher = move || {
            let rx = rx.borrow_mut().take();
            async move {
                match rx {
                    Some(rx) => rx.await.map_err(|_| FetchError::new("sender dropped")),
                    None => Ok(0),
                }
            }
        };

        let handle = client.query("orphan", QueryOptions::default(), fetcher, |_| {});
        drive();
        drop(handle);
        tx.send(42).expect("receiver alive");
        drive();

        // The late result left no trace: a new subscriber starts fresh.
        let hits = Arc::new(AtomicU32::new(0));
        let (log, on_change) = recorder::<u32>();
        let _h = client.query("orphan", QueryOptions::default(), counting_fetcher(&hits), on_change);
        drive();
        assert_eq!(*log.lock().unwrap(), vec![QueryState::Loading, QueryState::Ready(1)]);
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn failed_entry_restarts_for_a_new_subscriber() {
        let time = Arc::new(AtomicU64::new(0));
        let client = test_client(&time);

        let _a = client.query(
            "flaky",
            options(100.0, 10_000.0, 0),
            || std::future::ready(Err::<u32, _>(FetchError::new("down"))),
            |_| {},
        );
        drive();

        let hits = Arc::new(AtomicU32::new(0));
        let (log, on_change) = recorder::<u32>();
        let _b = client.query("flaky", options(100.0, 10_000.0, 0), counting_fetcher(&hits), on_change);
        drive();

        assert_eq!(*log.lock().unwrap(), vec![QueryState::Loading, QueryState::Ready(1)]);
    }

    #[test]
    fn failed_background_refresh_keeps_the_cached_value() {
        let time = Arc::new(AtomicU64::new(0));
        let client = test_client(&time);
        let hits = Arc::new(AtomicU32::new(0));
        let opts = options(100.0, 10_000.0, 0);

        let a = client.query("content", opts, counting_fetcher(&hits), |_| {});
        drive();
        drop(a);

        time.store(500, Ordering::Relaxed);
        let (log, on_change) = recorder::<u32>();
        let _b = client.query(
            "content",
            opts,
            || std::future::ready(Err::<u32, _>(FetchError::new("flaked"))),
            on_change,
        );
        drive();

        assert_eq!(
            *log.lock().unwrap(),
            vec![QueryState::Ready(1)],
            "a failed refresh never demotes a usable value"
        );
    }
}
