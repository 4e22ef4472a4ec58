//! Tokio Runtime Bridge
//!
//! Controllers live on the single event-loop thread and never await. HTTP
//! requests and playback timers run on this background tokio runtime and
//! report back through the `AppEvent` channel.
//!
//! ## Pattern
//!
//! ```text
//! controller (event loop thread)
//!       │ dispatch(query)
//!       ▼
//! spawn_named_in_tokio(async { client.fetch(..) })
//!       │
//!       ▼
//! AppEvent::Fetched ──► crossbeam channel ──► event loop
//! ```

use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("medal-viz-io")
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime")
    })
}

/// Spawn a detached task with a name (for debugging)
///
/// Used for one-shot fetches whose result is delivered over a channel.
pub fn spawn_named_in_tokio<F>(name: &'static str, future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::debug!("Spawning tokio task: {}", name);
    get_runtime().spawn(async move {
        future.await;
        tracing::debug!("Tokio task completed: {}", name);
    });
}

/// Spawn a task and keep its handle so it can be aborted later
///
/// Used for repeating playback timers.
pub fn spawn_abortable<F>(future: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    get_runtime().spawn(future)
}
