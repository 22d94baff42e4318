use proptest::prelude::*;
use ratatui_design_core::focus::FocusRing;
use ratatui_design_core::focus::FocusScope;
use ratatui_design_core::hover::HoverIntent;
use ratatui_design_core::input::KeyCode;
use ratatui_design_core::input::KeyEvent;
use ratatui_design_core::input::KeyModifiers;
use ratatui_design_core::modal::ModalAction;
use ratatui_design_core::modal::ModalController;
use ratatui_design_core::reveal::RevealAction;
use ratatui_design_core::reveal::RevealOptions;
use ratatui_design_core::reveal::RevealSpeed;
use ratatui_design_core::reveal::TextReveal;
use ratatui_design_core::scroll_lock::ScrollLock;
use ratatui_design_core::timer::Clock;
use ratatui_design_core::timer::ManualClock;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

proptest! {
    #[test]
    fn scroll_lock_follows_last_open_signal(toggles in prop::collection::vec(any::<bool>(), 0..64)) {
        let lock = ScrollLock::new();
        let mut ring = FocusRing::new(vec![0usize, 1, 2]);
        let mut modal = ModalController::new(lock.clone());
        for open in &toggles {
            modal.set_open(*open, &mut ring);
            prop_assert_eq!(lock.is_locked(), *open);
            prop_assert!(lock.depth() <= 1);
        }
        drop(modal);
        prop_assert!(!lock.is_locked());
    }

    #[test]
    fn tab_never_leaves_the_dialog(n in 1usize..8, presses in prop::collection::vec(any::<bool>(), 1..40)) {
        let lock = ScrollLock::new();
        let mut ring = FocusRing::new((0..n).collect::<Vec<_>>());
        let mut modal = ModalController::new(lock);
        modal.set_open(true, &mut ring);
        for backwards in presses {
            let key = if backwards {
                KeyEvent::new(KeyCode::Tab).with_modifiers(KeyModifiers::shift())
            } else {
                KeyEvent::new(KeyCode::Tab)
            };
            if modal.handle_key(&key, &mut ring) == ModalAction::PassThrough {
                if backwards {
                    ring.focus_prev();
                } else {
                    ring.focus_next();
                }
            }
            prop_assert!(ring.focused().is_some());
        }
    }

    #[test]
    fn hover_never_collapses_while_pointer_returns_in_time(
        gaps in prop::collection::vec(0u64..500, 1..20)
    ) {
        let clock = ManualClock::new();
        let mut h = HoverIntent::default();
        h.pointer_enter();
        for gap in gaps {
            h.pointer_leave(clock.now());
            clock.advance_ms(gap);
            h.tick(clock.now());
            prop_assert!(h.is_expanded());
            h.pointer_enter();
        }
    }

    #[test]
    fn reveal_prefix_always_belongs_to_current_text(
        first in "[a-z]{1,12}",
        second in "[A-Z]{1,12}",
        switch_at in 0u64..600,
    ) {
        let clock = ManualClock::new();
        let mut r = TextReveal::new(RevealOptions {
            speed: RevealSpeed::custom(50).unwrap(),
            ..Default::default()
        });
        r.set_text(Some(first.as_str()), clock.now());
        clock.advance(ms(switch_at));
        r.tick(clock.now());
        prop_assert!(first.starts_with(r.visible()));

        r.set_text(Some(second.as_str()), clock.now());
        prop_assert_eq!(r.visible(), "");
        for _ in 0..30 {
            clock.advance_ms(25);
            r.tick(clock.now());
            prop_assert!(second.starts_with(r.visible()));
        }
        prop_assert_eq!(r.visible(), second.as_str());
    }
}

#[test]
fn reveal_completes_once_per_cycle_on_a_virtual_clock() {
    let clock = ManualClock::new();
    let mut r = TextReveal::new(RevealOptions {
        speed: RevealSpeed::custom(50).unwrap(),
        looping: true,
        ..Default::default()
    });
    r.set_text(Some("Hi!"), clock.now());

    let mut completions = 0;
    let mut frames = Vec::new();
    // 10ms frames over two full cycles (150ms + 2000ms pause each).
    for _ in 0..430 {
        clock.advance_ms(10);
        if r.tick(clock.now()) == RevealAction::Completed {
            completions += 1;
            frames.push(clock.now());
        }
    }
    assert_eq!(completions, 2);
    assert_eq!(frames, vec![ms(150), ms(2300)]);
}

#[test]
fn unmounted_controllers_stay_silent() {
    let clock = ManualClock::new();
    let lock = ScrollLock::new();
    let mut ring = FocusRing::new(vec![0usize]);

    let mut modal = ModalController::new(lock.clone());
    let mut reveal = TextReveal::default();
    let mut hover = HoverIntent::default();

    modal.set_open(true, &mut ring);
    reveal.set_text(Some("pending"), clock.now());
    hover.pointer_enter();
    hover.pointer_leave(clock.now());

    modal.unmount();
    reveal.unmount();
    hover.unmount();

    clock.advance_ms(60_000);
    assert!(!lock.is_locked());
    assert_eq!(reveal.tick(clock.now()), RevealAction::None);
    assert_eq!(reveal.visible(), "");
    assert!(!hover.tick(clock.now()));
    assert!(hover.is_expanded());
    assert_eq!(
        modal.handle_key(&KeyEvent::new(KeyCode::Esc), &mut ring),
        ModalAction::None
    );
}
