//! Hover intent: expand immediately on enter, collapse only after the pointer stays away.
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::timer::Timer;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use std::time::Duration;

pub const COLLAPSE_DELAY: Duration = Duration::from_millis(500);

#[derive(Clone, Debug)]
pub struct HoverIntent {
    expanded: bool,
    collapse: Timer,
    delay: Duration,
    unmounted: bool,
}

impl Default for HoverIntent {
    fn default() -> Self {
        Self::new(COLLAPSE_DELAY)
    }
}

impl HoverIntent {
    pub fn new(delay: Duration) -> Self {
        Self {
            expanded: false,
            collapse: Timer::new(),
            delay,
            unmounted: false,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_collapse_pending(&self) -> bool {
        self.collapse.is_pending()
    }

    /// Cancels a pending collapse and expands. Returns `true` if `is_expanded` changed.
    pub fn pointer_enter(&mut self) -> bool {
        if self.unmounted {
            return false;
        }
        self.collapse.cancel();
        let changed = !self.expanded;
        self.expanded = true;
        changed
    }

    /// Schedules a collapse `delay` after `now`, replacing any earlier one.
    pub fn pointer_leave(&mut self, now: Duration) {
        if self.unmounted || !self.expanded {
            return;
        }
        self.collapse.arm(now, self.delay);
    }

    /// Applies a due collapse. Returns `true` if `is_expanded` changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.unmounted || self.collapse.fire(now).is_none() {
            return false;
        }
        tracing::debug!("hover intent collapsed");
        let changed = self.expanded;
        self.expanded = false;
        changed
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.collapse.deadline()
    }

    pub fn unmount(&mut self) {
        self.collapse.cancel();
        self.unmounted = true;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTransition {
    Entered,
    Left,
}

/// Derives enter/leave transitions for a screen region from raw mouse events.
///
/// Terminals only report positions, so the region remembers whether the pointer was inside on
/// the previous event.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoverRegion {
    area: Rect,
    inside: bool,
}

impl HoverRegion {
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    pub fn handle_mouse(&mut self, ev: &MouseEvent) -> Option<HoverTransition> {
        if matches!(ev.kind, MouseEventKind::ScrollUp | MouseEventKind::ScrollDown) {
            return None;
        }
        let inside = self.area.contains(Position::new(ev.x, ev.y));
        if inside == self.inside {
            return None;
        }
        self.inside = inside;
        Some(if inside {
            HoverTransition::Entered
        } else {
            HoverTransition::Left
        })
    }
}
