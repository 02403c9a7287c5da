//! Single-holder exclusivity token.
//!
//! The token is one `AtomicU64`: `0` means unheld, anything else is the id of
//! the thread holding it. Acquisition is a single compare-and-swap from `0`;
//! it never waits. A thread that already holds the token fails the CAS like
//! any other contender, so re-entrant acquisition is rejected too.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

use metlog_core::error::{MetlogError, Result};

const UNHELD: u64 = 0;

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static CONTEXT_ID: Cell<u64> = const { Cell::new(UNHELD) };
}

/// Stable, non-zero id of the calling thread.
pub fn current_context_id() -> u64 {
    CONTEXT_ID.with(|id| {
        if id.get() == UNHELD {
            id.set(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed));
        }
        id.get()
    })
}

#[derive(Debug, Default)]
pub struct ExclusivityToken {
    owner: AtomicU64,
}

impl ExclusivityToken {
    pub fn new() -> Self {
        Self { owner: AtomicU64::new(UNHELD) }
    }

    /// Take the token for the calling thread, or fail immediately.
    pub fn try_acquire(&self) -> Result<TokenGuard<'_>> {
        let me = current_context_id();
        self.owner
            .compare_exchange(UNHELD, me, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| MetlogError::ConcurrencyViolation)?;
        Ok(TokenGuard { token: self })
    }

    /// Id of the current holder, if any.
    pub fn holder(&self) -> Option<u64> {
        match self.owner.load(Ordering::Acquire) {
            UNHELD => None,
            id => Some(id),
        }
    }

    pub fn is_held(&self) -> bool {
        self.holder().is_some()
    }
}

/// Releases the token when dropped, on every exit path.
#[must_use = "the token is released as soon as the guard is dropped"]
pub struct TokenGuard<'a> {
    token: &'a ExclusivityToken,
}

impl Drop for TokenGuard<'_> {
    fn drop(&mut self) {
        self.token.owner.store(UNHELD, Ordering::Release);
    }
}
