//! Typewriter-style staged text reveal.
//!
//! [`TextReveal`] grows a visible prefix of its text by one `char` per unit delay. It reports
//! [`RevealAction::Completed`] once per finished cycle and, when looping, waits
//! [`RevealOptions::loop_pause`] before starting over from an empty prefix.
//!
//! Units are Unicode scalar values, not grapheme clusters: a combining sequence takes several
//! ticks to appear.
use crate::error::Error;
use crate::error::Result;
use crate::timer::Timer;
use std::str::FromStr;
use std::time::Duration;

/// Pause between a completed cycle and the next one when looping.
pub const LOOP_PAUSE: Duration = Duration::from_millis(2000);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
    /// Delay per unit in milliseconds. Always non-zero; build it with [`RevealSpeed::custom`].
    Custom(u32),
}

impl RevealSpeed {
    pub fn custom(ms: u32) -> Result<Self> {
        if ms == 0 {
            return Err(Error::ZeroDelay);
        }
        Ok(Self::Custom(ms))
    }

    pub fn unit_delay(self) -> Duration {
        let ms = match self {
            Self::Slow => 100,
            Self::Normal => 50,
            Self::Fast => 25,
            Self::Custom(ms) => ms.max(1),
        };
        Duration::from_millis(ms as u64)
    }
}

impl FromStr for RevealSpeed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(Self::Slow),
            "normal" => Ok(Self::Normal),
            "fast" => Ok(Self::Fast),
            other => match other.trim_end_matches("ms").parse::<u32>() {
                Ok(ms) => Self::custom(ms),
                Err(_) => Err(Error::UnknownSpeed(s.to_string())),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealOptions {
    pub speed: RevealSpeed,
    pub looping: bool,
    pub loop_pause: Duration,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            speed: RevealSpeed::default(),
            looping: false,
            loop_pause: LOOP_PAUSE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealPhase {
    /// No text: only a liveness indicator is shown.
    Idle,
    Revealing,
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealAction {
    None,
    Redraw,
    /// The whole text became visible. Reported once per cycle.
    Completed,
}

#[derive(Clone, Debug)]
pub struct TextReveal {
    options: RevealOptions,
    text: String,
    len: usize,
    revealed: usize,
    phase: RevealPhase,
    timer: Timer,
    unmounted: bool,
}

impl Default for TextReveal {
    fn default() -> Self {
        Self::new(RevealOptions::default())
    }
}

impl TextReveal {
    pub fn new(options: RevealOptions) -> Self {
        Self {
            options,
            text: String::new(),
            len: 0,
            revealed: 0,
            phase: RevealPhase::Idle,
            timer: Timer::new(),
            unmounted: false,
        }
    }

    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    /// Changes the cadence. Takes effect from the next scheduled unit.
    pub fn set_speed(&mut self, speed: RevealSpeed) {
        self.options.speed = speed;
    }

    pub fn set_looping(&mut self, looping: bool, now: Duration) {
        if self.options.looping == looping {
            return;
        }
        self.options.looping = looping;
        if self.phase != RevealPhase::Complete || self.unmounted {
            return;
        }
        if looping {
            self.timer.arm(now, self.options.loop_pause);
        } else {
            self.timer.cancel();
        }
    }

    /// Replaces the source text.
    ///
    /// Any pending unit is cancelled and the reveal restarts from an empty prefix. `None` or an
    /// empty string switches to [`RevealPhase::Idle`]. Passing the current text again is a no-op.
    /// Returns `true` when the state changed.
    pub fn set_text(&mut self, text: Option<&str>, now: Duration) -> bool {
        if self.unmounted {
            return false;
        }
        let text = text.unwrap_or_default();
        if text.is_empty() {
            if self.phase == RevealPhase::Idle {
                return false;
            }
            self.timer.cancel();
            self.text.clear();
            self.len = 0;
            self.revealed = 0;
            self.phase = RevealPhase::Idle;
            tracing::debug!("reveal idle");
            return true;
        }
        if self.phase != RevealPhase::Idle && self.text == text {
            return false;
        }

        self.text.clear();
        self.text.push_str(text);
        self.len = self.text.chars().count();
        self.revealed = 0;
        self.phase = RevealPhase::Revealing;
        self.timer.arm(now, self.options.speed.unit_delay());
        tracing::debug!(units = self.len, "reveal started");
        true
    }

    /// Applies every unit that is due at `now`.
    ///
    /// Deadlines are absolute, so a late call catches up without drifting. Processing stops at a
    /// completion so each cycle's [`RevealAction::Completed`] is returned by its own call; the
    /// remainder is picked up on the next `tick`.
    pub fn tick(&mut self, now: Duration) -> RevealAction {
        if self.unmounted {
            return RevealAction::None;
        }
        let mut changed = false;
        while let Some(at) = self.timer.fire(now) {
            match self.phase {
                RevealPhase::Revealing => {
                    self.revealed = (self.revealed + 1).min(self.len);
                    changed = true;
                    tracing::trace!(revealed = self.revealed, units = self.len, "reveal unit");
                    if self.revealed == self.len {
                        self.phase = RevealPhase::Complete;
                        if self.options.looping {
                            self.timer.arm(at, self.options.loop_pause);
                        }
                        tracing::debug!(looping = self.options.looping, "reveal complete");
                        return RevealAction::Completed;
                    }
                    self.timer.arm(at, self.options.speed.unit_delay());
                }
                RevealPhase::Complete => {
                    self.revealed = 0;
                    self.phase = RevealPhase::Revealing;
                    self.timer.arm(at, self.options.speed.unit_delay());
                    changed = true;
                    tracing::debug!("reveal restarted");
                }
                RevealPhase::Idle => {}
            }
        }
        if changed {
            RevealAction::Redraw
        } else {
            RevealAction::None
        }
    }

    /// Stops the reveal for good: the pending unit is cancelled and every later call is ignored.
    pub fn unmount(&mut self) {
        self.timer.cancel();
        self.unmounted = true;
    }

    pub fn is_unmounted(&self) -> bool {
        self.unmounted
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of visible units.
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.phase == RevealPhase::Complete
    }

    pub fn is_idle(&self) -> bool {
        self.phase == RevealPhase::Idle
    }

    /// The currently visible prefix.
    pub fn visible(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(self.revealed)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        &self.text[..end]
    }

    /// When the host should call [`TextReveal::tick`] next.
    pub fn deadline(&self) -> Option<Duration> {
        self.timer.deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn custom(delay: u32, looping: bool) -> TextReveal {
        TextReveal::new(RevealOptions {
            speed: RevealSpeed::custom(delay).unwrap(),
            looping,
            ..Default::default()
        })
    }

    #[test]
    fn reveals_one_char_per_unit() {
        let mut r = custom(50, false);
        r.set_text(Some("Hi!"), ms(0));
        assert_eq!(r.visible(), "");

        assert_eq!(r.tick(ms(49)), RevealAction::None);
        assert_eq!(r.tick(ms(50)), RevealAction::Redraw);
        assert_eq!(r.visible(), "H");
        assert_eq!(r.tick(ms(100)), RevealAction::Redraw);
        assert_eq!(r.visible(), "Hi");
        assert_eq!(r.tick(ms(150)), RevealAction::Completed);
        assert_eq!(r.visible(), "Hi!");
        assert!(r.is_complete());

        assert_eq!(r.tick(ms(10_000)), RevealAction::None);
        assert_eq!(r.deadline(), None);
    }

    #[test]
    fn text_change_mid_reveal_restarts_from_empty() {
        let mut r = custom(50, false);
        r.set_text(Some("Hello"), ms(0));
        r.tick(ms(100));
        assert_eq!(r.visible(), "He");

        assert!(r.set_text(Some("Bye"), ms(120)));
        assert_eq!(r.visible(), "");
        assert_eq!(r.deadline(), Some(ms(170)));

        // The old schedule (next unit at 150ms) must not leak into the new text.
        assert_eq!(r.tick(ms(150)), RevealAction::None);
        assert_eq!(r.visible(), "");
        r.tick(ms(170));
        assert_eq!(r.visible(), "B");
    }

    #[test]
    fn looping_pauses_once_then_restarts() {
        let mut r = custom(50, true);
        r.set_text(Some("ab"), ms(0));
        r.tick(ms(50));
        assert_eq!(r.tick(ms(100)), RevealAction::Completed);

        assert_eq!(r.tick(ms(2099)), RevealAction::None);
        assert_eq!(r.visible(), "ab");
        assert_eq!(r.tick(ms(2100)), RevealAction::Redraw);
        assert_eq!(r.visible(), "");
        r.tick(ms(2150));
        assert_eq!(r.visible(), "a");
        assert_eq!(r.tick(ms(2200)), RevealAction::Completed);
    }

    #[test]
    fn late_tick_reports_each_completion() {
        let mut r = custom(10, true);
        r.set_text(Some("xy"), ms(0));
        // Three cycles finish by 5000ms: 20ms of units plus a 2000ms pause each.
        let mut completions = 0;
        for _ in 0..8 {
            if r.tick(ms(5_000)) == RevealAction::Completed {
                completions += 1;
            }
        }
        assert_eq!(completions, 3);
    }

    #[test]
    fn empty_text_is_idle() {
        let mut r = TextReveal::default();
        assert!(!r.set_text(None, ms(0)));
        assert!(r.is_idle());
        assert!(!r.set_text(Some(""), ms(0)));
        assert_eq!(r.deadline(), None);

        r.set_text(Some("abc"), ms(0));
        assert!(r.set_text(Some(""), ms(10)));
        assert!(r.is_idle());
        assert_eq!(r.visible(), "");
        assert_eq!(r.tick(ms(1_000)), RevealAction::None);
    }

    #[test]
    fn same_text_does_not_restart() {
        let mut r = custom(50, false);
        r.set_text(Some("abc"), ms(0));
        r.tick(ms(50));
        assert!(!r.set_text(Some("abc"), ms(60)));
        assert_eq!(r.visible(), "a");
    }

    #[test]
    fn unmount_cancels_pending_unit() {
        let mut r = custom(50, true);
        r.set_text(Some("abc"), ms(0));
        r.unmount();
        assert!(r.is_unmounted());
        assert_eq!(r.deadline(), None);
        assert_eq!(r.tick(ms(10_000)), RevealAction::None);
        assert_eq!(r.visible(), "");
        assert!(!r.set_text(Some("new"), ms(10_000)));
    }

    #[test]
    fn toggling_loop_after_completion() {
        let mut r = custom(50, false);
        r.set_text(Some("a"), ms(0));
        assert_eq!(r.tick(ms(50)), RevealAction::Completed);
        assert_eq!(r.deadline(), None);

        r.set_looping(true, ms(100));
        assert_eq!(r.deadline(), Some(ms(2100)));
        r.set_looping(false, ms(200));
        assert_eq!(r.deadline(), None);
    }

    #[test]
    fn counts_chars_not_bytes() {
        let mut r = custom(1, false);
        r.set_text(Some("né✓"), ms(0));
        r.tick(ms(2));
        assert_eq!(r.visible(), "né");
    }

    #[test]
    fn speed_parsing() {
        assert_eq!("fast".parse::<RevealSpeed>(), Ok(RevealSpeed::Fast));
        assert_eq!(" Slow ".parse::<RevealSpeed>(), Ok(RevealSpeed::Slow));
        assert_eq!("80ms".parse::<RevealSpeed>(), Ok(RevealSpeed::Custom(80)));
        assert_eq!("0".parse::<RevealSpeed>(), Err(Error::ZeroDelay));
        assert!(matches!(
            "warp".parse::<RevealSpeed>(),
            Err(Error::UnknownSpeed(_))
        ));
        assert_eq!(RevealSpeed::Normal.unit_delay(), ms(50));
    }
}
