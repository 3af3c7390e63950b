use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fusionstudies::app::{build_runtime, StudyMode};
use fusionstudies::config::Config;
use fusionstudies::runtime::frontend::{FrontendAdapter, UserInputEvent};
use fusionstudies::state::{NavTarget, View};
use fusionstudies::types::GeneratorKind;
use fusionstudies::ui::input_metrics::clamp_to_char_boundary_left;
use fusionstudies::ui::layout::split_screen;
use fusionstudies::ui::render::{input_visual_rows, render_body, render_input, render_status_line};
use fusionstudies::{logging, terminal};
use ratatui::widgets::Clear;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(16);
const PAGE_ROWS: u16 = 10;

struct ManagedTuiFrontend {
    terminal: terminal::TerminalType,
    quit: bool,
    input_buffer: String,
    cursor: usize,
    scroll: u16,
    last_view: View,
}

impl ManagedTuiFrontend {
    fn new() -> Result<Self> {
        let terminal = terminal::setup()?;
        Self::drain_startup_events();
        Ok(Self {
            terminal,
            quit: false,
            input_buffer: String::new(),
            cursor: 0,
            scroll: 0,
            last_view: View::Home,
        })
    }

    fn drain_startup_events() {
        for _ in 0..1024 {
            match event::poll(Duration::from_millis(0)) {
                Ok(true) => {
                    if event::read().is_err() {
                        break;
                    }
                }
                Ok(false) | Err(_) => break,
            }
        }
    }

    fn clamp_cursor_to_boundary_left(&self, idx: usize) -> usize {
        clamp_to_char_boundary_left(&self.input_buffer, idx)
    }

    fn prev_char_boundary(&self, idx: usize) -> usize {
        let i = self.clamp_cursor_to_boundary_left(idx);
        self.input_buffer[..i]
            .char_indices()
            .next_back()
            .map_or(0, |(j, _)| j)
    }

    fn next_char_boundary(&self, idx: usize) -> usize {
        let i = self.clamp_cursor_to_boundary_left(idx);
        match self.input_buffer[i..].chars().next() {
            Some(ch) => i + ch.len_utf8(),
            None => self.input_buffer.len(),
        }
    }

    fn insert_str(&mut self, value: &str) {
        let cursor = self.clamp_cursor_to_boundary_left(self.cursor);
        self.input_buffer.insert_str(cursor, value);
        self.cursor = cursor + value.len();
    }

    fn backspace(&mut self) {
        let end = self.clamp_cursor_to_boundary_left(self.cursor);
        if end == 0 {
            return;
        }
        let start = self.prev_char_boundary(end);
        self.input_buffer.replace_range(start..end, "");
        self.cursor = start;
    }

    fn delete(&mut self) {
        let start = self.clamp_cursor_to_boundary_left(self.cursor);
        if start >= self.input_buffer.len() {
            return;
        }
        let end = self.next_char_boundary(start);
        self.input_buffer.replace_range(start..end, "");
        self.cursor = start;
    }

    fn submit_input(&mut self) -> Option<String> {
        let value = self.input_buffer.trim().to_string();
        self.input_buffer.clear();
        self.cursor = 0;
        (!value.is_empty()).then_some(value)
    }

    /// Keys that work in every view.
    fn map_global_key(&mut self, key: KeyEvent) -> Option<Option<UserInputEvent>> {
        let event = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                UserInputEvent::Quit
            }
            KeyCode::Char('d')
                if key.modifiers.contains(KeyModifiers::CONTROL) && self.input_buffer.is_empty() =>
            {
                UserInputEvent::Quit
            }
            KeyCode::F(2) => UserInputEvent::Generate(GeneratorKind::Materials),
            KeyCode::F(3) => UserInputEvent::Generate(GeneratorKind::Quiz),
            KeyCode::F(4) => UserInputEvent::RestartQuiz,
            KeyCode::F(5) => UserInputEvent::QuestionCountDown,
            KeyCode::F(6) => UserInputEvent::QuestionCountUp,
            KeyCode::F(7) => UserInputEvent::CycleQuizLanguage,
            KeyCode::F(8) => UserInputEvent::CycleLocale,
            KeyCode::F(9) => UserInputEvent::ClearFiles,
            KeyCode::F(10) => UserInputEvent::Navigate(NavTarget::About),
            KeyCode::Esc => UserInputEvent::Navigate(NavTarget::Home),
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(PAGE_ROWS);
                return Some(None);
            }
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(PAGE_ROWS);
                return Some(None);
            }
            _ => return None,
        };
        Some(Some(event))
    }

    fn map_editor_key(&mut self, key: KeyEvent) -> Option<UserInputEvent> {
        match key.code {
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.input_buffer.len(),
            KeyCode::Left => self.cursor = self.prev_char_boundary(self.cursor),
            KeyCode::Right => self.cursor = self.next_char_boundary(self.cursor),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Enter => return self.submit_input().map(UserInputEvent::Text),
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.insert_str(&ch.to_string());
            }
            _ => {}
        }
        None
    }

    fn map_key(&mut self, key: KeyEvent, view: View) -> Option<UserInputEvent> {
        if let Some(mapped) = self.map_global_key(key) {
            return mapped;
        }
        if view == View::Quiz {
            if let Some(event) = quiz_key_event(key, self.input_buffer.is_empty()) {
                return Some(event);
            }
        }
        self.map_editor_key(key)
    }
}

/// Single-key quiz controls, active while the input line is empty. Letters
/// always go to the input line so relative paths can still be typed.
fn quiz_key_event(key: KeyEvent, input_empty: bool) -> Option<UserInputEvent> {
    if !input_empty || !key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
        return None;
    }
    match key.code {
        KeyCode::Char(ch @ '1'..='4') => {
            Some(UserInputEvent::ChooseOption(ch as usize - '1' as usize))
        }
        KeyCode::Enter => Some(UserInputEvent::NextQuestion),
        _ => None,
    }
}

impl Drop for ManagedTuiFrontend {
    fn drop(&mut self) {
        terminal::restore();
    }
}

impl FrontendAdapter<StudyMode> for ManagedTuiFrontend {
    fn poll_user_input(&mut self, mode: &StudyMode) -> Option<UserInputEvent> {
        let Ok(has_event) = event::poll(POLL_INTERVAL) else {
            self.quit = true;
            return None;
        };
        if !has_event {
            return None;
        }

        let Ok(ev) = event::read() else {
            self.quit = true;
            return None;
        };

        match ev {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                self.map_key(key, mode.state().view())
            }
            Event::Paste(text) => {
                // Dropped files arrive as a paste; keep them on one line.
                let joined = text.lines().map(str::trim).collect::<Vec<_>>().join(" ");
                self.insert_str(&joined);
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, mode: &StudyMode) {
        let view = mode.state().view();
        if view != self.last_view {
            self.last_view = view;
            self.scroll = 0;
        }

        let status = mode.status_line();
        let input = self.input_buffer.as_str();
        let cursor = self.cursor;
        let scroll = self.scroll;

        let _ = self.terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(Clear, area);
            let input_width = area.width.saturating_sub(2).max(1) as usize;
            let input_rows = input_visual_rows(input, input_width) as u16;
            let panes = split_screen(area, input_rows);

            render_status_line(frame, panes.header, &status);
            render_body(frame, panes.body, mode.state(), mode.translator(), scroll);
            render_input(frame, panes.input, input, cursor);
        });
    }

    fn should_quit(&self) -> bool {
        self.quit
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    config.validate()?;
    logging::init(&config.log_path)?;
    tracing::info!(model = %config.model, locale = config.locale.code(), "starting fusion");

    let (mut runtime, mut ctx) = build_runtime(config)?;
    let mut frontend = ManagedTuiFrontend::new()?;
    runtime.run(&mut frontend, &mut ctx).await;
    drop(frontend);

    tracing::info!("fusion exited");
    Ok(())
}
