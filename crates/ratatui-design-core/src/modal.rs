//! Modal dialog lifecycle.
//!
//! [`ModalController`] does not own the open flag. The app decides whether the dialog is open and
//! reports it through [`ModalController::set_open`]; the controller applies the side effects of each
//! transition:
//!
//! - Closed → Open: engage the shared [`ScrollLock`], snapshot the focusable elements and focus the
//!   first one, start reacting to Escape and Tab.
//! - Open → Closed (or [`ModalController::unmount`], or drop): release the lock, forget the
//!   snapshot, ignore keys.
//!
//! Dismissal requests come back as [`ModalAction::Close`]; the app is expected to flip its flag and
//! call `set_open(false, ..)`.
use crate::focus::FocusScope;
use crate::focus::FocusTrap;
use crate::focus::TabOutcome;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::scroll_lock::ScrollLock;
use crate::scroll_lock::ScrollLockGuard;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModalOptions {
    pub close_on_overlay_click: bool,
    pub close_on_escape: bool,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            close_on_overlay_click: true,
            close_on_escape: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalAction {
    None,
    /// The dialog asks to be closed.
    Close,
    /// Focus wrapped inside the dialog.
    Redraw,
    /// Tab was not at an edge; the host moves focus itself.
    PassThrough,
}

/// What a pointer press landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// The backdrop itself, outside the panel.
    Overlay,
    /// The panel or anything inside it.
    Panel,
}

enum Phase<Id> {
    Closed,
    Open {
        trap: FocusTrap<Id>,
        _lock: ScrollLockGuard,
    },
}

pub struct ModalController<Id> {
    options: ModalOptions,
    lock: ScrollLock,
    phase: Phase<Id>,
    unmounted: bool,
}

impl<Id> fmt::Debug for ModalController<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalController")
            .field("options", &self.options)
            .field("open", &matches!(self.phase, Phase::Open { .. }))
            .field("unmounted", &self.unmounted)
            .finish()
    }
}

impl<Id: Clone + PartialEq + fmt::Debug> ModalController<Id> {
    pub fn new(lock: ScrollLock) -> Self {
        Self::with_options(lock, ModalOptions::default())
    }

    pub fn with_options(lock: ScrollLock, options: ModalOptions) -> Self {
        Self {
            options,
            lock,
            phase: Phase::Closed,
            unmounted: false,
        }
    }

    pub fn options(&self) -> &ModalOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ModalOptions) {
        self.options = options;
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Open { .. })
    }

    pub fn is_unmounted(&self) -> bool {
        self.unmounted
    }

    pub fn trap(&self) -> Option<&FocusTrap<Id>> {
        match &self.phase {
            Phase::Open { trap, .. } => Some(trap),
            Phase::Closed => None,
        }
    }

    /// Applies the externally owned open flag. Returns `true` if a transition happened.
    ///
    /// Repeating the current value is a no-op. After [`ModalController::unmount`] nothing
    /// transitions.
    pub fn set_open<S: FocusScope<Id = Id> + ?Sized>(&mut self, open: bool, scope: &mut S) -> bool {
        if self.unmounted || open == self.is_open() {
            return false;
        }
        if open {
            let trap = FocusTrap::capture(&*scope);
            let lock = self.lock.acquire();
            if !trap.focus_first(scope) {
                tracing::debug!("modal opened with no focusable elements");
            }
            tracing::debug!(focusable = trap.len(), "modal opened");
            self.phase = Phase::Open { trap, _lock: lock };
        } else {
            self.phase = Phase::Closed;
            tracing::debug!("modal closed");
        }
        true
    }

    pub fn handle_key<S: FocusScope<Id = Id> + ?Sized>(
        &mut self,
        key: &KeyEvent,
        scope: &mut S,
    ) -> ModalAction {
        let Phase::Open { trap, .. } = &self.phase else {
            return ModalAction::None;
        };
        match key.code {
            KeyCode::Esc if self.options.close_on_escape => ModalAction::Close,
            KeyCode::Tab => match trap.handle_tab(key.is_back_tab(), scope) {
                TabOutcome::Wrapped(_) => ModalAction::Redraw,
                TabOutcome::PassThrough => ModalAction::PassThrough,
            },
            _ => ModalAction::None,
        }
    }

    pub fn handle_click(&self, target: ClickTarget) -> ModalAction {
        if !self.is_open() {
            return ModalAction::None;
        }
        match target {
            ClickTarget::Overlay if self.options.close_on_overlay_click => ModalAction::Close,
            _ => ModalAction::None,
        }
    }

    /// Tears the controller down: releases the scroll lock if held and ignores all later input.
    pub fn unmount(&mut self) {
        if self.unmounted {
            return;
        }
        if self.is_open() {
            tracing::debug!("modal unmounted while open");
        }
        self.phase = Phase::Closed;
        self.unmounted = true;
    }
}
