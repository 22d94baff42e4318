//! Keyboard focus containment.
//!
//! The host owns focus. It exposes the ordered focusable elements of a container and the current
//! focus through [`FocusScope`]; [`FocusTrap`] only snapshots the ends of that sequence and
//! decides when Tab must wrap instead of leaving the container.
use std::fmt;

pub trait FocusScope {
    type Id: Clone + PartialEq + fmt::Debug;

    /// Focusable descendants of the container, in traversal order.
    fn focusable(&self) -> Vec<Self::Id>;

    fn focused(&self) -> Option<Self::Id>;

    fn focus(&mut self, id: &Self::Id);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TabOutcome<Id> {
    /// Focus wrapped around the end of the container and now sits on `Id`.
    Wrapped(Id),
    /// Not at an edge: the host should move focus the usual way.
    PassThrough,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusTrap<Id> {
    items: Vec<Id>,
}

impl<Id: Clone + PartialEq + fmt::Debug> FocusTrap<Id> {
    pub fn capture<S: FocusScope<Id = Id> + ?Sized>(scope: &S) -> Self {
        Self {
            items: scope.focusable(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn first(&self) -> Option<&Id> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&Id> {
        self.items.last()
    }

    /// Moves focus to the first focusable element. Returns `false` when there is none.
    pub fn focus_first<S: FocusScope<Id = Id> + ?Sized>(&self, scope: &mut S) -> bool {
        match self.first() {
            Some(first) => {
                scope.focus(first);
                true
            }
            None => false,
        }
    }

    pub fn handle_tab<S: FocusScope<Id = Id> + ?Sized>(
        &self,
        backwards: bool,
        scope: &mut S,
    ) -> TabOutcome<Id> {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return TabOutcome::PassThrough;
        };
        let current = scope.focused();
        let (edge, target) = if backwards {
            (first, last)
        } else {
            (last, first)
        };
        if current.as_ref() == Some(edge) {
            scope.focus(target);
            return TabOutcome::Wrapped(target.clone());
        }
        TabOutcome::PassThrough
    }
}

/// A flat, ordered set of focusable ids with linear traversal.
///
/// Widgets use it as their [`FocusScope`]. `focus_next`/`focus_prev` stop at the ends; wrapping is
/// the trap's job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusRing<Id> {
    items: Vec<Id>,
    focused: Option<usize>,
}

impl<Id> Default for FocusRing<Id> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            focused: None,
        }
    }
}

impl<Id: Clone + PartialEq + fmt::Debug> FocusRing<Id> {
    pub fn new(items: Vec<Id>) -> Self {
        Self {
            items,
            focused: None,
        }
    }

    pub fn set_items(&mut self, items: Vec<Id>) {
        let keep = self.focused().filter(|id| items.contains(id));
        self.items = items;
        self.focused = keep.and_then(|id| self.items.iter().position(|i| *i == id));
    }

    pub fn items(&self) -> &[Id] {
        &self.items
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn focus_next(&mut self) -> bool {
        self.step(1)
    }

    pub fn focus_prev(&mut self) -> bool {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let next = match self.focused {
            None if delta > 0 => 0,
            None => self.items.len() - 1,
            Some(i) => {
                let n = i as isize + delta;
                if n < 0 || n >= self.items.len() as isize {
                    return false;
                }
                n as usize
            }
        };
        self.focused = Some(next);
        true
    }
}

impl<Id: Clone + PartialEq + fmt::Debug> FocusScope for FocusRing<Id> {
    type Id = Id;

    fn focusable(&self) -> Vec<Id> {
        self.items.clone()
    }

    fn focused(&self) -> Option<Id> {
        self.focused.and_then(|i| self.items.get(i).cloned())
    }

    fn focus(&mut self, id: &Id) {
        if let Some(i) = self.items.iter().position(|x| x == id) {
            self.focused = Some(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(n: usize) -> FocusRing<usize> {
        FocusRing::new((0..n).collect())
    }

    #[test]
    fn tab_on_last_wraps_to_first() {
        for n in [1, 2, 5] {
            let mut r = ring(n);
            let trap = FocusTrap::capture(&r);
            r.focus(&(n - 1));
            assert_eq!(trap.handle_tab(false, &mut r), TabOutcome::Wrapped(0));
            assert_eq!(r.focused(), Some(0));
        }
    }

    #[test]
    fn shift_tab_on_first_wraps_to_last() {
        for n in [1, 2, 5] {
            let mut r = ring(n);
            let trap = FocusTrap::capture(&r);
            r.focus(&0);
            assert_eq!(trap.handle_tab(true, &mut r), TabOutcome::Wrapped(n - 1));
            assert_eq!(r.focused(), Some(n - 1));
        }
    }

    #[test]
    fn middle_tab_passes_through() {
        let mut r = ring(3);
        let trap = FocusTrap::capture(&r);
        r.focus(&1);
        assert_eq!(trap.handle_tab(false, &mut r), TabOutcome::PassThrough);
        assert_eq!(trap.handle_tab(true, &mut r), TabOutcome::PassThrough);
        assert_eq!(r.focused(), Some(1));
    }

    #[test]
    fn empty_trap_is_inert() {
        let mut r = ring(0);
        let trap = FocusTrap::capture(&r);
        assert!(!trap.focus_first(&mut r));
        assert_eq!(trap.handle_tab(false, &mut r), TabOutcome::PassThrough);
        assert_eq!(r.focused(), None);
    }

    #[test]
    fn ring_traversal_stops_at_ends() {
        let mut r = ring(2);
        assert!(r.focus_next());
        assert!(r.focus_next());
        assert!(!r.focus_next());
        assert_eq!(r.focused(), Some(1));
    }

    #[test]
    fn set_items_keeps_focus_when_still_present() {
        let mut r = FocusRing::new(vec!["a", "b", "c"]);
        r.focus(&"b");
        r.set_items(vec!["b", "c"]);
        assert_eq!(r.focused(), Some("b"));
        r.set_items(vec!["c"]);
        assert_eq!(r.focused(), None);
    }
}
