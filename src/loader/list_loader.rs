use std::collections::VecDeque;
use std::fmt::{self, Display};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use tokio::sync::oneshot;

use crate::loader::state::{LoaderOptions, LoaderState, LoaderStatus};
use crate::loader::LOGGER;
use crate::platform::runtime::spawn_detached;

type FetchFn<A, T> = Arc<dyn Fn(A) -> BoxFuture<'static, Result<Vec<T>, String>> + Send + Sync>;
type StateListener<T> = Arc<dyn Fn(&LoaderState<T>) + Send + Sync>;

const UNKNOWN_ERROR: &str = "unknown error";

/// Drives one asynchronous list fetch at a time and exposes its state.
///
/// The loader wraps any async function returning `Result<Vec<T>, E>`. Fetch failures
/// are converted into [`LoaderState::error`] and never reach the caller.
///
/// Every fetch is tagged with a sequence number when it is issued. A result is applied
/// only while its number is still the latest one, so when calls overlap the state always
/// reflects the most recently issued call, whatever order the responses arrive in.
/// Superseded fetches still run to completion; their results are dropped.
pub struct ListLoader<A, T> {
    inner: Arc<LoaderInner<A, T>>,
}

struct LoaderInner<A, T> {
    fetch: FetchFn<A, T>,
    tracked: Mutex<Tracked<T>>,
    listeners: Mutex<Vec<(u64, StateListener<T>)>>,
    next_listener_id: AtomicU64,
}

struct Tracked<T> {
    state: LoaderState<T>,
    latest_request: u64,
    /// Snapshots waiting for delivery, in the order the state changed.
    outbox: VecDeque<LoaderState<T>>,
    delivering: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoadMode {
    Replace,
    Append,
}

impl<A, T> ListLoader<A, T>
where
    A: Send + 'static,
    T: Clone + Send + 'static,
{
    /// Creates a loader around `fetch`.
    ///
    /// Unless [`LoaderOptions::skip_initial_fetch`] is set, a fetch with
    /// `options.initial_args` is issued immediately and the loader starts out loading.
    pub fn new<F, Fut, E>(fetch: F, options: LoaderOptions<A>) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let fetch: FetchFn<A, T> = Arc::new(move |args| {
            let pending = fetch(args);
            Box::pin(async move { pending.await.map_err(|err| err.to_string()) })
        });
        let loader = Self {
            inner: Arc::new(LoaderInner {
                fetch,
                tracked: Mutex::new(Tracked {
                    state: LoaderState::default(),
                    latest_request: 0,
                    outbox: VecDeque::new(),
                    delivering: false,
                }),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(1),
            }),
        };
        if !options.skip_initial_fetch {
            let _ = loader.refetch(options.initial_args);
        }
        loader
    }

    /// Starts a fetch with `args` in the background, replacing `data` on success.
    ///
    /// `loading` is `true` and `error` is cleared by the time this returns. The returned
    /// handle resolves once the fetch has settled; dropping it does not cancel anything.
    pub fn refetch(&self, args: A) -> RefetchHandle {
        self.spawn(args, LoadMode::Replace)
    }

    /// Like [`ListLoader::refetch`] but appends the fetched items to the current data.
    ///
    /// An append is a fetch like any other: issuing it while a `refetch` is still in
    /// flight supersedes that refetch, so its results are discarded and the page is
    /// appended to the data that was current before it. Await the refetch first when the
    /// page belongs to the new arguments.
    pub fn load_more(&self, args: A) -> RefetchHandle {
        self.spawn(args, LoadMode::Append)
    }

    /// Runs a replacing fetch on the caller's task and returns once it has settled.
    ///
    /// Dropping the returned future before it settles abandons the fetch; if it was still
    /// the latest one, `loading` is reset.
    pub async fn load(&self, args: A) {
        self.run(args, LoadMode::Replace).await;
    }

    /// Runs an appending fetch on the caller's task and returns once it has settled.
    pub async fn load_more_now(&self, args: A) {
        self.run(args, LoadMode::Append).await;
    }

    pub fn state(&self) -> LoaderState<T> {
        self.inner.lock().state.clone()
    }

    pub fn data(&self) -> Option<Vec<T>> {
        self.inner.lock().state.data.clone()
    }

    pub fn loading(&self) -> bool {
        self.inner.lock().state.loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.lock().state.error.clone()
    }

    pub fn status(&self) -> LoaderStatus {
        self.inner.lock().state.status()
    }

    /// Registers `listener` to receive the new state after every transition.
    pub fn subscribe<F>(&self, listener: F) -> ListenerRegistration
    where
        F: Fn(&LoaderState<T>) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::SeqCst);
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push((id, Arc::new(listener)));

        let weak = Arc::downgrade(&self.inner);
        ListenerRegistration::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .listeners
                    .lock()
                    .unwrap_or_else(|poison| poison.into_inner())
                    .retain(|(existing, _)| *existing != id);
            }
        })
    }

    fn spawn(&self, args: A, mode: LoadMode) -> RefetchHandle {
        let request = self.inner.begin();
        let pending = (self.inner.fetch)(args);
        let inner = Arc::clone(&self.inner);
        let (done, settled) = oneshot::channel();
        spawn_detached(async move {
            let result = pending.await;
            inner.complete(request, mode, result);
            let _ = done.send(());
        });
        RefetchHandle { settled }
    }

    async fn run(&self, args: A, mode: LoadMode) {
        let request = self.inner.begin();
        let mut in_flight = InFlight {
            inner: &self.inner,
            request,
            settled: false,
        };
        let result = (self.inner.fetch)(args).await;
        in_flight.settled = true;
        self.inner.complete(request, mode, result);
    }
}

impl<A, T> LoaderInner<A, T>
where
    T: Clone,
{
    fn lock(&self) -> MutexGuard<'_, Tracked<T>> {
        self.tracked
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    fn begin(&self) -> u64 {
        let request = {
            let mut tracked = self.lock();
            tracked.latest_request += 1;
            tracked.state.loading = true;
            tracked.state.error = None;
            tracked.publish();
            tracked.latest_request
        };
        LOGGER.debug(format!("list fetch #{request} started"));
        self.deliver();
        request
    }

    fn complete(&self, request: u64, mode: LoadMode, result: Result<Vec<T>, String>) {
        {
            let mut tracked = self.lock();
            if request != tracked.latest_request {
                LOGGER.debug(format!(
                    "discarding list fetch #{request}, superseded by #{}",
                    tracked.latest_request
                ));
                return;
            }
            match result {
                Ok(items) => match mode {
                    LoadMode::Replace => tracked.state.data = Some(items),
                    LoadMode::Append => tracked
                        .state
                        .data
                        .get_or_insert_with(Vec::new)
                        .extend(items),
                },
                Err(message) => {
                    let message = if message.trim().is_empty() {
                        UNKNOWN_ERROR.to_string()
                    } else {
                        message
                    };
                    LOGGER.warn(format!("list fetch #{request} failed: {message}"));
                    tracked.state.error = Some(message);
                }
            }
            tracked.state.loading = false;
            tracked.publish();
        }
        self.deliver();
    }

    /// Settles a fetch whose future was dropped before it completed.
    fn abandon(&self, request: u64) {
        {
            let mut tracked = self.lock();
            if request != tracked.latest_request || !tracked.state.loading {
                return;
            }
            tracked.state.loading = false;
            tracked.publish();
        }
        LOGGER.debug(format!("list fetch #{request} was cancelled"));
        self.deliver();
    }

    /// Hands queued snapshots to the listeners in state order.
    ///
    /// Only one caller drains the queue at a time; others return right away and their
    /// snapshots are delivered by the active drainer. Listeners may start new fetches.
    fn deliver(&self) {
        {
            let mut tracked = self.lock();
            if tracked.delivering {
                return;
            }
            tracked.delivering = true;
        }
        loop {
            let snapshot = {
                let mut tracked = self.lock();
                match tracked.outbox.pop_front() {
                    Some(snapshot) => snapshot,
                    None => {
                        tracked.delivering = false;
                        return;
                    }
                }
            };
            let listeners: Vec<StateListener<T>> = self
                .listeners
                .lock()
                .unwrap_or_else(|poison| poison.into_inner())
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect();
            for listener in listeners {
                listener(&snapshot);
            }
        }
    }
}

impl<T: Clone> Tracked<T> {
    fn publish(&mut self) {
        let snapshot = self.state.clone();
        self.outbox.push_back(snapshot);
    }
}

/// Resets `loading` if a [`ListLoader::load`] future is dropped mid-flight.
struct InFlight<'a, A, T: Clone> {
    inner: &'a LoaderInner<A, T>,
    request: u64,
    settled: bool,
}

impl<A, T: Clone> Drop for InFlight<'_, A, T> {
    fn drop(&mut self) {
        if !self.settled {
            self.inner.abandon(self.request);
        }
    }
}

impl<A, T> Clone for ListLoader<A, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, T> fmt::Debug for ListLoader<A, T>
where
    T: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tracked = self.inner.lock();
        f.debug_struct("ListLoader")
            .field("status", &tracked.state.status())
            .field("latest_request", &tracked.latest_request)
            .finish()
    }
}

/// Resolves when the fetch started by [`ListLoader::refetch`] has settled.
#[derive(Debug)]
pub struct RefetchHandle {
    settled: oneshot::Receiver<()>,
}

impl Future for RefetchHandle {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.settled).poll(cx).map(|_| ())
    }
}

/// RAII-style listener registration; dropping the handle detaches the listener.
pub struct ListenerRegistration {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl ListenerRegistration {
    fn new<F>(detach: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    pub fn detach(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for ListenerRegistration {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for ListenerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistration")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}
