use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_design::crossterm_input::input_event_from_crossterm;
use ratatui_design::help::HelpBar;
use ratatui_design::help::HelpBarOptions;
use ratatui_design::input::InputEvent;
use ratatui_design::input::KeyCode;
use ratatui_design::keymap;
use ratatui_design::modal::Modal;
use ratatui_design::modal::ModalEvent;
use ratatui_design::render;
use ratatui_design::reveal::RevealAction;
use ratatui_design::reveal::RevealOptions;
use ratatui_design::scroll_lock::ScrollLock;
use ratatui_design::sidenav::Sidenav;
use ratatui_design::sidenav::SidenavAction;
use ratatui_design::sidenav::SidenavItem;
use ratatui_design::theme::ThemeConfig;
use ratatui_design::theme::ThemeProvider;
use ratatui_design::thinking_text::ThinkingText;
use ratatui_design::thinking_text::ThinkingTextOptions;
use ratatui_design::timer::Clock;
use ratatui_design::timer::SystemClock;
use ratatui_design::timer::next_deadline;
use std::io;
use std::io::Stdout;
use std::time::Duration;

const MESSAGES: [&str; 3] = [
    "Reading the workspace layout...",
    "Comparing the two drafts line by line.",
    "Done. Press o to open a dialog.",
];

fn quit_binding() -> keymap::Binding {
    keymap::Binding::new("q", "quit", vec![keymap::key_char('q'), keymap::key_ctrl('c')])
}

struct App {
    clock: SystemClock,
    themes: ThemeProvider,
    lock: ScrollLock,
    nav: Sidenav,
    thinking: ThinkingText,
    modal: Modal,
    message: Option<usize>,
    scroll: u16,
    status: String,
}

impl App {
    fn new(config: ThemeConfig) -> Self {
        let lock = ScrollLock::new();
        let mut modal = Modal::new(lock.clone());
        modal.set_title("Discard changes?");
        modal.set_body("Unsaved edits in this buffer will be lost.\nThis cannot be undone.");
        modal.set_buttons(vec!["Keep editing".into(), "Discard".into()]);

        let thinking = ThinkingText::with_options(ThinkingTextOptions {
            reveal: RevealOptions {
                looping: true,
                ..Default::default()
            },
            ..Default::default()
        });

        Self {
            clock: SystemClock::new(),
            themes: ThemeProvider::new(config),
            lock,
            nav: Sidenav::new(vec![
                SidenavItem::new("⌂", "Home"),
                SidenavItem::new("✎", "Drafts"),
                SidenavItem::new("★", "Starred"),
                SidenavItem::new("⚑", "Reports"),
            ]),
            thinking,
            modal,
            message: None,
            scroll: 0,
            status: String::from("hover the rail, n: next message, o: dialog, t: theme"),
        }
    }

    fn next_message(&mut self) {
        let next = match self.message {
            None => Some(0),
            Some(i) if i + 1 < MESSAGES.len() => Some(i + 1),
            Some(_) => None,
        };
        self.message = next;
        let now = self.clock.now();
        self.thinking.set_text(next.map(|i| MESSAGES[i]), now);
    }

    /// Returns `false` when the app should quit.
    fn handle(&mut self, ev: InputEvent) -> bool {
        let now = self.clock.now();
        if self.modal.is_open() {
            match self.modal.handle_event(ev) {
                ModalEvent::Close => {
                    self.modal.set_open(false);
                    self.status = "dialog dismissed".into();
                }
                ModalEvent::Activated(i) => {
                    self.modal.set_open(false);
                    self.status = format!("dialog button {i} pressed");
                }
                ModalEvent::Redraw | ModalEvent::None => {}
            }
            return true;
        }

        if let SidenavAction::Selected(i) = self.nav.handle_event(ev.clone(), now) {
            self.status = format!("nav item {i} selected");
        }

        if let InputEvent::Key(key) = ev {
            if quit_binding().matches(&key) {
                return false;
            }
            match key.code {
                KeyCode::Char('o') => {
                    self.modal.set_open(true);
                }
                KeyCode::Char('n') => self.next_message(),
                KeyCode::Char('t') => self.themes.toggle_mode(),
                KeyCode::Char('j') if !self.lock.is_locked() => {
                    self.scroll = self.scroll.saturating_add(1)
                }
                KeyCode::Char('k') if !self.lock.is_locked() => {
                    self.scroll = self.scroll.saturating_sub(1)
                }
                _ => {}
            }
        }
        true
    }

    fn tick(&mut self) {
        let now = self.clock.now();
        self.nav.tick(now);
        if self.thinking.tick(now) == RevealAction::Completed {
            tracing::info!(message = ?self.message, "message fully revealed");
        }
    }

    fn poll_timeout(&self) -> Duration {
        let now = self.clock.now();
        next_deadline([self.nav.deadline(), self.thinking.deadline(now)])
            .map(|d| d.saturating_sub(now))
            .unwrap_or(Duration::from_millis(250))
    }

    fn draw(&mut self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let theme = self.themes.theme().clone();
        let [body, status] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .areas(area);
        let [rail, main] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(self.nav.width()), Constraint::Min(1)])
            .areas(body);

        self.nav.render(rail, buf, &theme);

        let block = Block::default()
            .title(" ratatui-design gallery ")
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(main);
        ratatui::widgets::Widget::render(block, main, buf);

        if inner.height > 0 {
            self.thinking.render(
                Rect::new(inner.x, inner.y, inner.width, 1),
                buf,
                &theme,
                self.clock.now(),
            );
            for row in 2..inner.height {
                let n = u32::from(self.scroll) + u32::from(row - 2);
                let line = format!("background line {n:03} (j/k scroll while no dialog is open)");
                render::render_str_clipped(
                    inner.x,
                    inner.y + row,
                    inner.width,
                    buf,
                    &line,
                    theme.text_muted,
                );
            }
        }

        let help = HelpBar::with_options(
            vec![
                keymap::Binding::new("n", "next", vec![keymap::key_char('n')]),
                keymap::Binding::new("o", "dialog", vec![keymap::key_char('o')]),
                keymap::Binding::new("t", "theme", vec![keymap::key_char('t')]),
                quit_binding(),
            ],
            HelpBarOptions::themed(&theme),
        );
        help.render_ref(status, buf);
        let w = render::str_width(&self.status);
        if w < status.width {
            render::render_str_clipped(
                status.right() - w,
                status.y,
                w,
                buf,
                &self.status,
                theme.text_muted,
            );
        }

        self.modal.render(area, buf, &theme);
    }
}

fn main() -> io::Result<()> {
    if std::env::var_os("RUST_LOG").is_some() {
        // The terminal is in the alternate screen; send logs to a file.
        let file = std::fs::File::create("gallery.log")?;
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let config = ThemeConfig {
        mode: std::env::var("GALLERY_THEME")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default(),
        ..Default::default()
    };

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| {
            let area = f.area();
            app.draw(area, f.buffer_mut());
        })?;

        if !crossterm::event::poll(app.poll_timeout())? {
            continue;
        }
        let Some(ev) = input_event_from_crossterm(crossterm::event::read()?) else {
            continue;
        };
        if !app.handle(ev) {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    #[test]
    fn background_numbering_survives_saturated_scroll() {
        let mut app = App::new(ThemeConfig::default());
        app.scroll = u16::MAX;
        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);
        app.draw(area, &mut buf);
        let row: String = (0..area.width).map(|x| buf[(x, 4)].symbol().to_string()).collect();
        assert!(row.contains("background line 65536"));
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = App::new(ThemeConfig::default());
        assert!(!app.handle(InputEvent::Key(keymap::key_ctrl('c'))));
    }
}
