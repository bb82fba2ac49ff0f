//! Terminal Presenter - Full-screen ratatui frontend
//!
//! Owns raw mode and the alternate screen for its whole lifetime and gives
//! both back on drop, including when the poll loop exits with an error.

use std::io::{self, Stdout};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::draw;
use crate::error::DashboardResult;
use crate::logic::engine::PollStats;
use crate::logic::poll_loop::Presenter;
use crate::logic::view::DashboardView;

type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

pub struct TuiPresenter {
    terminal: DashboardTerminal,
    restored: bool,
}

impl TuiPresenter {
    pub fn enter() -> DashboardResult<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Leave the alternate screen and raw mode. Safe to call twice.
    pub fn restore(&mut self) -> DashboardResult<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Presenter for TuiPresenter {
    fn present(&mut self, view: &DashboardView, stats: &PollStats) -> DashboardResult<()> {
        self.terminal
            .draw(|frame| draw::draw(frame, view, stats))?;
        Ok(())
    }
}

impl Drop for TuiPresenter {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::warn!("Failed to restore terminal: {}", e);
        }
    }
}

/// Quit keys: `q`, `Esc`, `Ctrl-C`
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Resolves when the operator presses a quit key or terminal input ends
pub async fn quit_requested() {
    let mut events = EventStream::new();

    while let Some(event) = events.next().await {
        match event {
            Ok(Event::Key(key)) if is_quit_key(&key) => {
                log::info!("Quit requested");
                return;
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("Terminal input error: {}", e);
                return;
            }
        }
    }
}
