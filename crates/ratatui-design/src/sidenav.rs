use crate::hover::HoverIntent;
use crate::hover::HoverRegion;
use crate::hover::HoverTransition;
use crate::hover::COLLAPSE_DELAY;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::MouseButton;
use crate::input::MouseEventKind;
use crate::render;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Span;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidenavAction {
    None,
    Redraw,
    Selected(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidenavItem {
    pub icon: String,
    pub label: String,
}

impl SidenavItem {
    pub fn new(icon: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            label: label.into(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SidenavOptions {
    pub collapsed_width: u16,
    pub expanded_width: u16,
    pub collapse_delay: Duration,
}

impl Default for SidenavOptions {
    fn default() -> Self {
        Self {
            collapsed_width: 4,
            expanded_width: 22,
            collapse_delay: COLLAPSE_DELAY,
        }
    }
}

/// Icon rail that widens to show labels while hovered.
#[derive(Clone, Debug)]
pub struct Sidenav {
    items: Vec<SidenavItem>,
    selected: Option<usize>,
    options: SidenavOptions,
    hover: HoverIntent,
    region: HoverRegion,
}

impl Sidenav {
    pub fn new(items: Vec<SidenavItem>) -> Self {
        Self::with_options(items, SidenavOptions::default())
    }

    pub fn with_options(items: Vec<SidenavItem>, options: SidenavOptions) -> Self {
        let selected = if items.is_empty() { None } else { Some(0) };
        Self {
            items,
            selected,
            options,
            hover: HoverIntent::new(options.collapse_delay),
            region: HoverRegion::default(),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_expanded(&self) -> bool {
        self.hover.is_expanded()
    }

    /// Width the app should reserve for the rail this frame.
    pub fn width(&self) -> u16 {
        if self.hover.is_expanded() {
            self.options.expanded_width
        } else {
            self.options.collapsed_width
        }
    }

    pub fn handle_event(&mut self, event: InputEvent, now: Duration) -> SidenavAction {
        match event {
            InputEvent::Mouse(m) => {
                let mut action = match self.region.handle_mouse(&m) {
                    Some(HoverTransition::Entered) if self.hover.pointer_enter() => {
                        SidenavAction::Redraw
                    }
                    Some(HoverTransition::Left) => {
                        self.hover.pointer_leave(now);
                        SidenavAction::None
                    }
                    _ => SidenavAction::None,
                };
                if m.kind == MouseEventKind::Down(MouseButton::Left) && self.region.is_inside() {
                    let row = m.y.saturating_sub(self.region.area().y) as usize;
                    if row < self.items.len() {
                        tracing::debug!(item = row, "sidenav item clicked");
                        self.selected = Some(row);
                        action = SidenavAction::Selected(row);
                    }
                }
                action
            }
            InputEvent::Key(key) => match key.code {
                KeyCode::Up => self.move_selection(-1),
                KeyCode::Down => self.move_selection(1),
                KeyCode::Enter => match self.selected {
                    Some(i) => SidenavAction::Selected(i),
                    None => SidenavAction::None,
                },
                _ => SidenavAction::None,
            },
        }
    }

    /// Applies a due collapse. Returns `true` when the rail needs a redraw.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.hover.tick(now)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.hover.deadline()
    }

    pub fn unmount(&mut self) {
        self.hover.unmount();
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.region.set_area(area);
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, theme.surface);
        let expanded = self.hover.is_expanded();
        for (i, item) in self.items.iter().enumerate().take(area.height as usize) {
            let y = area.y + i as u16;
            let style = if self.selected == Some(i) {
                theme.focused
            } else {
                theme.text_primary
            };
            let mut spans = vec![Span::styled(format!(" {} ", item.icon), style)];
            if expanded {
                spans.push(Span::styled(item.label.as_str(), style));
            }
            buf.set_style(Rect::new(area.x, y, area.width, 1), style);
            render::render_spans_clipped(area.x, y, 0, area.width, buf, &spans, style);
        }
    }

    fn move_selection(&mut self, delta: isize) -> SidenavAction {
        if self.items.is_empty() {
            return SidenavAction::None;
        }
        let last = self.items.len() as isize - 1;
        let next = match self.selected {
            Some(i) => (i as isize + delta).clamp(0, last) as usize,
            None => 0,
        };
        if self.selected == Some(next) {
            return SidenavAction::None;
        }
        self.selected = Some(next);
        SidenavAction::Redraw
    }
}
