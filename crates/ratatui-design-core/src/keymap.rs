use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<KeyEvent>,
    pub help_key: String,
    pub help_desc: String,
}

impl Binding {
    pub fn new(
        help_key: impl Into<String>,
        help_desc: impl Into<String>,
        keys: Vec<KeyEvent>,
    ) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            help_desc: help_desc.into(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| key_event_matches(k, event))
    }
}

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    pattern.code == event.code && modifiers_match(pattern.modifiers, event.modifiers)
}

fn modifiers_match(pattern: KeyModifiers, event: KeyModifiers) -> bool {
    pattern.shift == event.shift && pattern.ctrl == event.ctrl && pattern.alt == event.alt
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers {
        shift: false,
        ctrl: true,
        alt: false,
    })
}

pub fn key_shift_tab() -> KeyEvent {
    KeyEvent::new(KeyCode::Tab).with_modifiers(KeyModifiers::shift())
}

/// Bindings a modal dialog reacts to while open.
#[derive(Clone, Debug)]
pub struct DialogBindings {
    pub dismiss: Binding,
    pub next: Binding,
    pub prev: Binding,
    pub activate: Binding,
}

impl Default for DialogBindings {
    fn default() -> Self {
        Self {
            dismiss: Binding::new("esc", "close", vec![key(KeyCode::Esc)]),
            next: Binding::new("tab", "next", vec![key(KeyCode::Tab), key(KeyCode::Right)]),
            prev: Binding::new("S-tab", "prev", vec![key_shift_tab(), key(KeyCode::Left)]),
            activate: Binding::new("enter", "select", vec![key(KeyCode::Enter)]),
        }
    }
}

impl DialogBindings {
    pub fn help(&self) -> Vec<Binding> {
        vec![
            self.dismiss.clone(),
            self.next.clone(),
            self.prev.clone(),
            self.activate.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_matches_exact_modifiers() {
        let b = Binding::new("q", "quit", vec![key_char('q')]);
        assert!(b.matches(&key_char('q')));
        assert!(!b.matches(&key_ctrl('q')));
    }

    #[test]
    fn tab_and_shift_tab_are_distinct() {
        let bindings = DialogBindings::default();
        assert!(bindings.next.matches(&key(KeyCode::Tab)));
        assert!(!bindings.next.matches(&key_shift_tab()));
        assert!(bindings.prev.matches(&key_shift_tab()));
    }
}
