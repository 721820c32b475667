// src/cancel.rs
//! Shared "done" signal for a fingerprinting run.
//!
//! The signal is a zero-capacity channel whose only sender lives inside the
//! token. Cancelling drops the sender, which disconnects every clone of the
//! receiver at once, so workers blocked in `select!` wake up immediately.

use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender, TryRecvError};

#[derive(Clone)]
pub struct CancelToken {
    sender: Arc<Mutex<Option<Sender<()>>>>,
    done: Receiver<()>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::bounded(0);
        Self {
            sender: Arc::new(Mutex::new(Some(tx))),
            done: rx,
        }
    }

    /// Closes the done signal. Idempotent.
    pub fn cancel(&self) {
        let mut guard = match self.sender.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.take();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.done.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Receiver that becomes ready (disconnected) once the token is cancelled.
    #[must_use]
    pub fn done(&self) -> &Receiver<()> {
        &self.done
    }

    /// Guard that cancels the token when dropped.
    #[must_use]
    pub fn guard(&self) -> CancelGuard {
        CancelGuard(self.clone())
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Closes the done signal on every exit path of the enclosing scope.
pub struct CancelGuard(CancelToken);

impl Drop for CancelGuard {
    fn drop(&mut self) {
        self.0.cancel();
    }
}
