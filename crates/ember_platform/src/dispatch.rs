//! Marshaling window mutations onto the thread that owns the window.
//!
//! The platform's window may only be mutated from its owning thread, while
//! requests originate from the application's own threads. [`UiTaskQueue`] is
//! a single-consumer task queue owned by that thread, paired with a one-shot
//! completion signal per task: [`run_blocking`](UiTaskQueue::run_blocking)
//! does not return until the owner has executed the task, so a caller can
//! read window geometry immediately afterwards without racing the mutation.
//!
//! The wait carries no timeout, and a rendezvous broken by queue teardown is
//! logged and swallowed rather than propagated. The owner thread outlives
//! every caller in normal operation; an interrupted wait only happens during
//! shutdown.

use std::collections::VecDeque;
use std::sync::mpsc::{self, SyncSender};
use std::sync::Mutex;
use std::thread::{self, ThreadId};

use tracing::warn;

type Task = Box<dyn FnOnce() + Send>;

struct QueuedTask {
    task: Task,
    done: SyncSender<()>,
}

/// Single-consumer task queue for the window-owning thread.
#[derive(Default)]
pub struct UiTaskQueue {
    owner: Mutex<Option<ThreadId>>,
    pending: Mutex<VecDeque<QueuedTask>>,
    wake: Mutex<Option<Box<dyn Fn() + Send + Sync>>>,
}

impl UiTaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the queue for the current thread. Tasks only ever execute on
    /// the claiming thread, via [`drain`](UiTaskQueue::drain).
    pub fn bind_to_current_thread(&self) {
        *self.owner.lock().unwrap() = Some(thread::current().id());
    }

    /// Registers a callback used to rouse the owning thread after a task is
    /// queued, e.g. waking a parked event-loop looper.
    pub fn set_wake_callback<F>(&self, wake: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        *self.wake.lock().unwrap() = Some(Box::new(wake));
    }

    fn is_owner(&self) -> bool {
        *self.owner.lock().unwrap() == Some(thread::current().id())
    }

    /// Runs `task` on the owning thread and blocks until it has executed.
    ///
    /// Called from the owning thread itself, the task runs inline (the same
    /// shortcut the platform's own run-on-UI-thread takes, and it avoids a
    /// self-deadlock). The wait has no timeout; if the queue is torn down
    /// before the task ran, the failure is logged and the call returns.
    pub fn run_blocking<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.is_owner() {
            task();
            return;
        }

        let (done_tx, done_rx) = mpsc::sync_channel(1);
        self.pending.lock().unwrap().push_back(QueuedTask {
            task: Box::new(task),
            done: done_tx,
        });
        if let Some(wake) = &*self.wake.lock().unwrap() {
            wake();
        }
        if done_rx.recv().is_err() {
            warn!("window task rendezvous interrupted before completion");
        }
    }

    /// Executes all queued tasks in FIFO order and signals their completion.
    ///
    /// Called by the owning thread once per event-loop iteration. The queue
    /// binds to the first draining thread if none has claimed it yet.
    pub fn drain(&self) {
        if self.owner.lock().unwrap().is_none() {
            self.bind_to_current_thread();
        }
        loop {
            let next = self.pending.lock().unwrap().pop_front();
            let Some(QueuedTask { task, done }) = next else {
                break;
            };
            task();
            let _ = done.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn run_blocking_waits_for_owner_execution() {
        let queue = Arc::new(UiTaskQueue::new());
        let stop = Arc::new(AtomicBool::new(false));

        let pump = {
            let queue = Arc::clone(&queue);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                queue.bind_to_current_thread();
                while !stop.load(Ordering::Acquire) {
                    queue.drain();
                    thread::yield_now();
                }
            })
        };

        let applied = Arc::new(AtomicBool::new(false));
        let ran_on = Arc::new(Mutex::new(None));
        {
            let applied = Arc::clone(&applied);
            let ran_on = Arc::clone(&ran_on);
            queue.run_blocking(move || {
                applied.store(true, Ordering::Release);
                *ran_on.lock().unwrap() = Some(thread::current().id());
            });
        }

        // The mutation must be visible the moment run_blocking returns.
        assert!(applied.load(Ordering::Acquire));
        let ran_on = ran_on.lock().unwrap().expect("task ran");
        assert_eq!(ran_on, pump.thread().id());
        assert_ne!(ran_on, thread::current().id());

        stop.store(true, Ordering::Release);
        pump.join().unwrap();
    }

    #[test]
    fn owner_thread_runs_inline() {
        let queue = UiTaskQueue::new();
        queue.bind_to_current_thread();

        let applied = Arc::new(AtomicBool::new(false));
        {
            let applied = Arc::clone(&applied);
            queue.run_blocking(move || applied.store(true, Ordering::Release));
        }
        // No drain happened; the task executed synchronously on this thread.
        assert!(applied.load(Ordering::Acquire));
        assert!(queue.pending.lock().unwrap().is_empty());
    }

    #[test]
    fn drain_executes_in_fifo_order() {
        let queue = Arc::new(UiTaskQueue::new());
        let order = Arc::new(Mutex::new(Vec::new()));

        let callers: Vec<_> = (0..2)
            .map(|i| {
                let queue = Arc::clone(&queue);
                let order = Arc::clone(&order);
                thread::spawn(move || {
                    queue.run_blocking(move || order.lock().unwrap().push(i));
                })
            })
            .collect();

        // Give both callers a moment to enqueue, then drain once.
        while queue.pending.lock().unwrap().len() < 2 {
            thread::yield_now();
        }
        queue.drain();
        for caller in callers {
            caller.join().unwrap();
        }
        assert_eq!(order.lock().unwrap().len(), 2);
    }
}
