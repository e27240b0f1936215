//! Cancellation scope for the coordinator's asynchronous work.
//!
//! Every task the coordinator spawns is registered here with its abort
//! handle. Dropping the scope aborts whatever is still running, so a late
//! completion can never touch a flow that has been discarded.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// A task is `Reserved` between id allocation and `tokio::spawn` returning.
enum Slot {
    Reserved,
    Running(AbortHandle),
}

impl Slot {
    fn abort(self) {
        if let Slot::Running(handle) = self {
            handle.abort();
        }
    }
}

struct ScopeShared {
    tasks: Mutex<HashMap<TaskId, Slot>>,
    pending: watch::Sender<usize>,
}

impl ScopeShared {
    fn lock(&self) -> MutexGuard<'_, HashMap<TaskId, Slot>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remove(&self, id: TaskId) -> Option<Slot> {
        let mut tasks = self.lock();
        let slot = tasks.remove(&id);
        self.pending.send_replace(tasks.len());
        slot
    }
}

/// Deregisters a task when its future completes, panics or is aborted.
struct Deregister {
    shared: Arc<ScopeShared>,
    id: TaskId,
}

impl Drop for Deregister {
    fn drop(&mut self) {
        self.shared.remove(self.id);
    }
}

pub(crate) struct TaskScope {
    shared: Arc<ScopeShared>,
    next_id: AtomicU64,
}

impl TaskScope {
    pub fn new() -> Self {
        let (pending, _) = watch::channel(0);
        Self {
            shared: Arc::new(ScopeShared {
                tasks: Mutex::new(HashMap::new()),
                pending,
            }),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn spawn<F>(&self, name: &'static str, future: F) -> TaskId
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let id = TaskId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let deregister = Deregister {
            shared: Arc::clone(&self.shared),
            id,
        };

        {
            let mut tasks = self.shared.lock();
            tasks.insert(id, Slot::Reserved);
            self.shared.pending.send_replace(tasks.len());
        }

        // Not under the lock: tokio may drop the future inside `spawn`, which
        // runs `Deregister` on this thread.
        let handle = tokio::spawn(async move {
            let _deregister = deregister;
            future.await;
        })
        .abort_handle();

        let orphaned = match self.shared.lock().get_mut(&id) {
            Some(slot) => {
                *slot = Slot::Running(handle);
                None
            }
            // Already finished, or cancelled before it was running.
            None => Some(handle),
        };
        if let Some(handle) = orphaned {
            handle.abort();
        }
        debug!(task = name, task_id = id.0, "flow task spawned");
        id
    }

    /// Aborts a single task. Returns `false` if it already finished.
    pub fn cancel(&self, id: TaskId) -> bool {
        match self.shared.remove(id) {
            Some(slot) => {
                slot.abort();
                debug!(task_id = id.0, "flow task cancelled");
                true
            }
            None => false,
        }
    }

    /// Aborts every outstanding task as a unit.
    pub fn cancel_all(&self) -> usize {
        let slots: Vec<Slot> = {
            let mut tasks = self.shared.lock();
            let slots = tasks.drain().map(|(_, slot)| slot).collect();
            self.shared.pending.send_replace(0);
            slots
        };
        let count = slots.len();
        for slot in slots {
            slot.abort();
        }
        if count > 0 {
            debug!(count, "flow tasks cancelled");
        }
        count
    }

    pub fn pending(&self) -> usize {
        *self.shared.pending.borrow()
    }

    /// Waits until no task is registered.
    pub async fn wait_idle(&self) {
        let mut pending = self.shared.pending.subscribe();
        // The sender lives in `self.shared`, so this cannot observe a closed channel.
        let _ = pending.wait_for(|count| *count == 0).await;
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn completed_tasks_deregister_themselves() {
        let scope = TaskScope::new();
        let done = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&done);

        scope.spawn("set_flag", async move {
            flag.store(true, Ordering::SeqCst);
        });
        scope.wait_idle().await;

        assert!(done.load(Ordering::SeqCst));
        assert_eq!(scope.pending(), 0);
    }

    #[tokio::test]
    async fn cancel_all_aborts_pending_work() {
        let scope = TaskScope::new();
        let (_tx, rx) = oneshot::channel::<()>();
        let reached = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&reached);

        scope.spawn("blocked", async move {
            let _ = rx.await;
            flag.store(true, Ordering::SeqCst);
        });
        assert_eq!(scope.pending(), 1);

        assert_eq!(scope.cancel_all(), 1);
        scope.wait_idle().await;
        tokio::task::yield_now().await;

        assert!(!reached.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn cancel_single_task_leaves_others_running() {
        let scope = TaskScope::new();
        let (_keep, keep_rx) = oneshot::channel::<()>();
        let (release, release_rx) = oneshot::channel::<()>();

        let blocked = scope.spawn("blocked", async move {
            let _ = keep_rx.await;
        });
        scope.spawn("released", async move {
            let _ = release_rx.await;
        });

        assert!(scope.cancel(blocked));
        assert!(!scope.cancel(blocked));
        assert_eq!(scope.pending(), 1);

        release.send(()).unwrap();
        scope.wait_idle().await;
        assert_eq!(scope.pending(), 0);
    }

    #[tokio::test]
    async fn dropping_scope_aborts_tasks() {
        let reached = Arc::new(AtomicBool::new(false));
        let (tx, rx) = oneshot::channel::<()>();
        {
            let scope = TaskScope::new();
            let flag = Arc::clone(&reached);
            scope.spawn("blocked", async move {
                let _ = rx.await;
                flag.store(true, Ordering::SeqCst);
            });
        }
        // Sending fails once the aborted task has dropped its receiver.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(tx.send(()).is_err());
        assert!(!reached.load(Ordering::SeqCst));
    }

    #[test]
    fn spawn_on_a_shut_down_runtime_deregisters_without_deadlock() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let handle = runtime.handle().clone();
        drop(runtime);

        // The closed runtime drops the future inside `tokio::spawn`.
        let _guard = handle.enter();
        let scope = TaskScope::new();
        scope.spawn("late", async {});

        assert_eq!(scope.pending(), 0);
        assert_eq!(scope.cancel_all(), 0);
    }
}
