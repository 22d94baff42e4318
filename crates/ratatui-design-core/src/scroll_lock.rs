//! Reference-counted scroll lock shared by every dialog in an app.
//!
//! The app creates one [`ScrollLock`] and hands clones to each modal. While any guard is alive the
//! lock reports [`ScrollLock::is_locked`], and background views are expected to ignore scroll
//! input. Nested or overlapping dialogs each hold their own guard, so closing the inner one does
//! not unlock the page for the outer one.
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Debug, Default)]
pub struct ScrollLock {
    holders: Rc<Cell<usize>>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> ScrollLockGuard {
        let n = self.holders.get() + 1;
        self.holders.set(n);
        if n == 1 {
            tracing::debug!("scroll lock engaged");
        }
        ScrollLockGuard {
            holders: Rc::clone(&self.holders),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }

    /// Number of live guards.
    pub fn depth(&self) -> usize {
        self.holders.get()
    }
}

/// Keeps the scroll lock engaged until dropped.
#[derive(Debug)]
#[must_use = "dropping the guard releases the scroll lock immediately"]
pub struct ScrollLockGuard {
    holders: Rc<Cell<usize>>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let n = self.holders.get().saturating_sub(1);
        self.holders.set(n);
        if n == 0 {
            tracing::debug!("scroll lock released");
        }
    }
}
