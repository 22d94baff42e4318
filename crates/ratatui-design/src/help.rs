use crate::keymap::Binding;
use crate::render;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

#[derive(Clone, Debug)]
pub struct HelpBarOptions {
    pub style: Style,
    pub key_style: Style,
    pub separator: String,
    pub space: String,
}

impl Default for HelpBarOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            key_style: Style::default(),
            separator: " • ".to_string(),
            space: " ".to_string(),
        }
    }
}

impl HelpBarOptions {
    pub fn themed(theme: &Theme) -> Self {
        Self {
            style: theme.text_muted,
            key_style: theme.accent,
            ..Self::default()
        }
    }
}

/// One-line key hint bar.
#[derive(Clone, Debug, Default)]
pub struct HelpBar {
    bindings: Vec<Binding>,
    options: HelpBarOptions,
}

impl HelpBar {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self {
            bindings,
            options: HelpBarOptions::default(),
        }
    }

    pub fn with_options(bindings: Vec<Binding>, options: HelpBarOptions) -> Self {
        Self { bindings, options }
    }

    pub fn set_bindings(&mut self, bindings: Vec<Binding>) {
        self.bindings = bindings;
    }

    pub fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let spans = self.to_spans();
        render::render_spans_clipped(
            area.x,
            area.y,
            0,
            area.width,
            buf,
            &spans,
            self.options.style,
        );
    }

    fn to_spans(&self) -> Vec<Span<'_>> {
        let mut spans = Vec::new();
        for (i, b) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.options.separator.as_str(),
                    self.options.style,
                ));
            }
            spans.push(Span::styled(b.help_key.as_str(), self.options.key_style));
            spans.push(Span::styled(self.options.space.as_str(), self.options.style));
            spans.push(Span::styled(b.help_desc.as_str(), self.options.style));
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap;

    #[test]
    fn help_bar_renders_narrow_width() {
        let bindings = vec![keymap::Binding::new(
            "q",
            "quit",
            vec![keymap::key_char('q')],
        )];
        let hb = HelpBar::new(bindings);
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 1));
        hb.render_ref(Rect::new(0, 0, 3, 1), &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "q");
    }

    #[test]
    fn help_bar_joins_bindings() {
        let hb = HelpBar::new(keymap::DialogBindings::default().help());
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 1));
        hb.render_ref(Rect::new(0, 0, 60, 1), &mut buf);
        let line: String = (0..60).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(line.starts_with("esc close • tab next • S-tab prev"));
        assert!(line.contains("enter select"));
    }
}
