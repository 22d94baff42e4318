use crate::focus::FocusRing;
use crate::focus::FocusScope;
use crate::help::HelpBar;
use crate::help::HelpBarOptions;
use crate::input::InputEvent;
use crate::input::KeyEvent;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap::DialogBindings;
use crate::modal_controller::ClickTarget;
use crate::modal_controller::ModalAction;
use crate::modal_controller::ModalController;
use crate::modal_controller::ModalOptions as ControllerOptions;
use crate::render;
use crate::scroll_lock::ScrollLock;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Widget;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalEvent {
    None,
    Redraw,
    /// The dialog asks the app to close it.
    Close,
    /// A button was pressed.
    Activated(usize),
}

#[derive(Clone, Debug)]
pub struct ModalOptions {
    pub width: u16,
    pub show_help: bool,
    pub behavior: ControllerOptions,
    pub bindings: DialogBindings,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            width: 48,
            show_help: true,
            behavior: ControllerOptions::default(),
            bindings: DialogBindings::default(),
        }
    }
}

/// A centred dialog with a title, body text and a row of buttons.
///
/// The app owns the open flag: call [`Modal::set_open`] whenever it changes, and close the dialog
/// when [`Modal::handle_event`] returns [`ModalEvent::Close`]. While open the modal holds the
/// shared [`ScrollLock`] and keeps Tab focus cycling between its buttons.
#[derive(Debug)]
pub struct Modal {
    title: String,
    body: Vec<String>,
    buttons: Vec<String>,
    options: ModalOptions,
    controller: ModalController<usize>,
    focus: FocusRing<usize>,
    panel: Rect,
    button_areas: Vec<Rect>,
}

impl Modal {
    pub fn new(lock: ScrollLock) -> Self {
        Self::with_options(lock, ModalOptions::default())
    }

    pub fn with_options(lock: ScrollLock, options: ModalOptions) -> Self {
        Self {
            title: String::new(),
            body: Vec::new(),
            buttons: Vec::new(),
            controller: ModalController::with_options(lock, options.behavior),
            options,
            focus: FocusRing::default(),
            panel: Rect::default(),
            button_areas: Vec::new(),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_body(&mut self, text: &str) {
        self.body = text.lines().map(str::to_string).collect();
    }

    /// Replaces the buttons. Takes effect for focus trapping the next time the dialog opens.
    pub fn set_buttons(&mut self, labels: Vec<String>) {
        self.focus.set_items((0..labels.len()).collect());
        self.buttons = labels;
        self.button_areas.clear();
    }

    pub fn options(&self) -> &ModalOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ModalOptions) {
        self.controller.set_options(options.behavior);
        self.options = options;
    }

    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    /// Mirrors the app's open flag. Returns `true` if the dialog opened or closed.
    pub fn set_open(&mut self, open: bool) -> bool {
        let changed = self.controller.set_open(open, &mut self.focus);
        if changed && !open {
            self.focus.blur();
            self.panel = Rect::default();
            self.button_areas.clear();
        }
        changed
    }

    pub fn focused_button(&self) -> Option<usize> {
        self.focus.focused()
    }

    pub fn handle_event(&mut self, event: InputEvent) -> ModalEvent {
        if !self.controller.is_open() {
            return ModalEvent::None;
        }
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(m) => self.handle_mouse(m),
        }
    }

    /// Classifies a screen position against the last rendered layout. `None` while closed or
    /// before the first render after opening.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<ClickTarget> {
        if !self.controller.is_open() {
            return None;
        }
        if self.panel.is_empty() {
            return None;
        }
        if self.panel.contains(Position::new(x, y)) {
            Some(ClickTarget::Panel)
        } else {
            Some(ClickTarget::Overlay)
        }
    }

    pub fn unmount(&mut self) {
        self.controller.unmount();
        self.focus.blur();
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if !self.controller.is_open() || area.width == 0 || area.height == 0 {
            return;
        }
        render::dim_area(area, buf, theme.overlay);

        let sp = theme.spacing;
        let body_h = u16::try_from(self.body.len()).unwrap_or(u16::MAX);
        let buttons_h = u16::from(!self.buttons.is_empty());
        let help_h = u16::from(self.options.show_help);
        // A request only; centered_rect shrinks it to the area and the body is clipped below.
        let height = sp
            .padding_y
            .saturating_mul(2)
            .saturating_add(2)
            .saturating_add(body_h)
            .saturating_add(sp.gap)
            .saturating_add(buttons_h)
            .saturating_add(help_h);
        let panel = render::centered_rect(area, self.options.width, height);
        self.panel = panel;

        Clear.render(panel, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border)
            .style(theme.surface)
            .title(Span::styled(format!(" {} ", self.title), theme.accent));
        let inner = block.inner(panel);
        block.render(panel, buf);

        let content = Rect::new(
            inner.x.saturating_add(sp.padding_x),
            inner.y.saturating_add(sp.padding_y),
            inner.width.saturating_sub(sp.padding_x.saturating_mul(2)),
            inner.height.saturating_sub(sp.padding_y.saturating_mul(2)),
        );
        if content.width == 0 || content.height == 0 {
            self.button_areas.clear();
            return;
        }

        let mut y = content.y;
        for line in &self.body {
            if y >= content.bottom() {
                break;
            }
            render::render_str_clipped(content.x, y, content.width, buf, line, theme.text_primary);
            y += 1;
        }

        let bottom = content.bottom();
        if self.options.show_help && bottom > content.y {
            let help = HelpBar::with_options(
                self.options.bindings.help(),
                HelpBarOptions::themed(theme),
            );
            help.render_ref(Rect::new(content.x, bottom - 1, content.width, 1), buf);
        }

        self.button_areas.clear();
        if self.buttons.is_empty() {
            return;
        }
        let row = bottom.saturating_sub(1 + help_h);
        if row < content.y {
            return;
        }
        let focused = self.focus.focused();
        let mut x = content.x;
        for (i, label) in self.buttons.iter().enumerate() {
            let text = format!("[ {label} ]");
            let w = render::str_width(&text);
            if x >= content.right() {
                break;
            }
            let w = w.min(content.right() - x);
            let style = if focused == Some(i) {
                theme.focused
            } else {
                theme.text_primary
            };
            render::render_str_clipped(x, row, w, buf, &text, style);
            self.button_areas.push(Rect::new(x, row, w, 1));
            x = x.saturating_add(w + 1);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ModalEvent {
        match self.controller.handle_key(&key, &mut self.focus) {
            ModalAction::Close => return ModalEvent::Close,
            ModalAction::Redraw => return ModalEvent::Redraw,
            ModalAction::PassThrough => {
                let moved = if key.is_back_tab() {
                    self.focus.focus_prev()
                } else {
                    self.focus.focus_next()
                };
                return if moved {
                    ModalEvent::Redraw
                } else {
                    ModalEvent::None
                };
            }
            ModalAction::None => {}
        }

        let bindings = &self.options.bindings;
        let (next, prev, activate) = (
            bindings.next.matches(&key),
            bindings.prev.matches(&key),
            bindings.activate.matches(&key),
        );
        if next || prev {
            return self.step_focus(next);
        }
        if activate {
            if let Some(i) = self.focus.focused() {
                return ModalEvent::Activated(i);
            }
        }
        ModalEvent::None
    }

    fn step_focus(&mut self, forward: bool) -> ModalEvent {
        let moved = if forward {
            self.focus.focus_next()
        } else {
            self.focus.focus_prev()
        };
        if moved {
            ModalEvent::Redraw
        } else {
            ModalEvent::None
        }
    }

    fn handle_mouse(&mut self, m: MouseEvent) -> ModalEvent {
        if m.kind != MouseEventKind::Down(MouseButton::Left) {
            return ModalEvent::None;
        }
        let Some(target) = self.hit_test(m.x, m.y) else {
            return ModalEvent::None;
        };
        if target == ClickTarget::Panel {
            let pos = Position::new(m.x, m.y);
            if let Some(i) = self.button_areas.iter().position(|r| r.contains(pos)) {
                tracing::debug!(button = i, "modal button clicked");
                self.focus.focus(&i);
                return ModalEvent::Activated(i);
            }
        }
        match self.controller.handle_click(target) {
            ModalAction::Close => ModalEvent::Close,
            _ => ModalEvent::None,
        }
    }
}
