//! Ctrl+C handling for blocking ingestion sessions.
//!
//! The pipeline runs on a `spawn_blocking` thread. A tokio task waits on
//! `ctrl_c` and cancels whichever session is active; with no active session
//! the process exits.

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use contracts::CancelToken;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Exit status for a Ctrl+C outside an ingestion session
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Slot holding the cancel token of the running session
#[derive(Debug, Clone, Default)]
pub struct Interrupts {
    active: Arc<Mutex<Option<CancelToken>>>,
}

impl Interrupts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with a fresh cancel token
    ///
    /// The token is cleared from the slot when the guard drops.
    pub fn begin(&self) -> SessionGuard {
        let token = CancelToken::new();
        *self.slot() = Some(token.clone());
        SessionGuard {
            interrupts: self.clone(),
            token,
        }
    }

    /// Cancel the active session; returns false when idle
    pub fn interrupt(&self) -> bool {
        match self.slot().take() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Listen for Ctrl+C until aborted
    pub fn spawn_listener(&self) -> JoinHandle<()> {
        let interrupts = self.clone();
        tokio::spawn(async move {
            loop {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!(error = %e, "Failed to install Ctrl+C handler");
                    return;
                }

                if interrupts.interrupt() {
                    warn!("Received Ctrl+C, stopping ingestion session...");
                } else {
                    info!("Received Ctrl+C, exiting");
                    std::process::exit(INTERRUPTED_EXIT_CODE);
                }
            }
        })
    }

    fn slot(&self) -> MutexGuard<'_, Option<CancelToken>> {
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Active session; clears the slot on drop
pub struct SessionGuard {
    interrupts: Interrupts,
    token: CancelToken,
}

impl SessionGuard {
    pub fn token(&self) -> &CancelToken {
        &self.token
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.interrupts.slot().take();
    }
}

/// Run blocking work with the Ctrl+C listener installed
pub async fn run_blocking<T, F>(interrupts: &Interrupts, job: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(Interrupts) -> Result<T> + Send + 'static,
{
    let listener = interrupts.spawn_listener();
    let handle = tokio::task::spawn_blocking({
        let interrupts = interrupts.clone();
        move || job(interrupts)
    });

    let result = handle.await.context("Blocking task panicked");
    listener.abort();
    result?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupt_cancels_active_session_only() {
        let interrupts = Interrupts::new();
        assert!(!interrupts.interrupt());

        let session = interrupts.begin();
        assert!(!session.token().is_cancelled());
        assert!(interrupts.interrupt());
        assert!(session.token().is_cancelled());

        // token already consumed
        assert!(!interrupts.interrupt());
    }

    #[test]
    fn test_finished_session_leaves_slot_empty() {
        let interrupts = Interrupts::new();
        let first = interrupts.begin();
        drop(first);
        assert!(!interrupts.interrupt());

        let second = interrupts.begin();
        assert!(interrupts.interrupt());
        assert!(second.token().is_cancelled());
    }
}
