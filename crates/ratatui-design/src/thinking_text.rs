use crate::render;
use crate::reveal::RevealAction;
use crate::reveal::RevealOptions;
use crate::reveal::RevealPhase;
use crate::reveal::RevealSpeed;
use crate::reveal::TextReveal;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Span;
use std::time::Duration;

const INDICATOR_FRAMES: [&str; 4] = ["·  ", "·· ", "···", " ··"];

#[derive(Clone, Debug)]
pub struct ThinkingTextOptions {
    pub reveal: RevealOptions,
    pub cursor: char,
    /// Time each idle indicator frame stays on screen.
    pub indicator_interval: Duration,
}

impl Default for ThinkingTextOptions {
    fn default() -> Self {
        Self {
            reveal: RevealOptions::default(),
            cursor: '▍',
            indicator_interval: Duration::from_millis(300),
        }
    }
}

/// Typewriter text with a cursor, or an animated dots indicator while there is nothing to say.
#[derive(Clone, Debug)]
pub struct ThinkingText {
    reveal: TextReveal,
    options: ThinkingTextOptions,
}

impl Default for ThinkingText {
    fn default() -> Self {
        Self::with_options(ThinkingTextOptions::default())
    }
}

impl ThinkingText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ThinkingTextOptions) -> Self {
        Self {
            reveal: TextReveal::new(options.reveal),
            options,
        }
    }

    pub fn set_text(&mut self, text: Option<&str>, now: Duration) -> bool {
        self.reveal.set_text(text, now)
    }

    pub fn set_speed(&mut self, speed: RevealSpeed) {
        self.reveal.set_speed(speed);
        self.options.reveal.speed = speed;
    }

    pub fn set_looping(&mut self, looping: bool, now: Duration) {
        self.reveal.set_looping(looping, now);
        self.options.reveal.looping = looping;
    }

    pub fn tick(&mut self, now: Duration) -> RevealAction {
        self.reveal.tick(now)
    }

    pub fn visible(&self) -> &str {
        self.reveal.visible()
    }

    pub fn phase(&self) -> RevealPhase {
        self.reveal.phase()
    }

    /// Next time the widget needs a redraw: the next reveal unit, or the next indicator frame
    /// while idle. `None` once unmounted.
    pub fn deadline(&self, now: Duration) -> Option<Duration> {
        if self.reveal.is_unmounted() {
            return None;
        }
        if self.reveal.is_idle() {
            let step = self.options.indicator_interval.as_millis().max(1);
            let next = (now.as_millis() / step + 1) * step;
            return Some(Duration::from_millis(next as u64));
        }
        self.reveal.deadline()
    }

    pub fn unmount(&mut self) {
        self.reveal.unmount();
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme, now: Duration) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        match self.reveal.phase() {
            RevealPhase::Idle => {
                let frame = self.indicator_frame(now);
                render::render_str_clipped(area.x, area.y, area.width, buf, frame, theme.text_muted);
            }
            RevealPhase::Revealing => {
                let cursor = self.options.cursor.to_string();
                let spans = [
                    Span::styled(self.reveal.visible(), theme.text_primary),
                    Span::styled(cursor, theme.accent),
                ];
                render::render_spans_clipped(
                    area.x,
                    area.y,
                    0,
                    area.width,
                    buf,
                    &spans,
                    theme.text_primary,
                );
            }
            RevealPhase::Complete => {
                render::render_str_clipped(
                    area.x,
                    area.y,
                    area.width,
                    buf,
                    self.reveal.visible(),
                    theme.text_primary,
                );
            }
        }
    }

    fn indicator_frame(&self, now: Duration) -> &'static str {
        let step = self.options.indicator_interval.as_millis().max(1);
        INDICATOR_FRAMES[(now.as_millis() / step) as usize % INDICATOR_FRAMES.len()]
    }
}
