use crossbeam_utils::Backoff;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, Thread};

/// A one-shot wakeup flag tying a blocked caller to the agent that serves it.
///
/// Created by the thread that will wait on it; fired at most once. Waiting
/// spins briefly before parking, so a service that arrives immediately after
/// registration is picked up without a syscall.
pub(crate) struct Signal {
    state: AtomicUsize,
    thread: Thread,
}

impl Signal {
    /// Creates a new signal owned by the current thread.
    pub(crate) fn new() -> Self {
        Self {
            state: AtomicUsize::new(0),
            thread: thread::current(),
        }
    }

    /// Blocks the owning thread until the signal fires.
    pub(crate) fn wait(&self) {
        let backoff = Backoff::new();
        while self.state.load(Ordering::Acquire) == 0 {
            if backoff.is_completed() {
                thread::park();
            } else {
                backoff.snooze();
            }
        }
    }

    /// Fires the signal, waking the owning thread.
    pub(crate) fn notify(&self) {
        self.state.store(1, Ordering::Release);
        self.thread.unpark();
    }
}
