use crate::app::App;
use crate::config::EditorConfig;
use crate::error::{EditorError, Result, UiError};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::time::Duration;

/// イベントポーリング間隔
const POLL_INTERVAL: Duration = Duration::from_millis(16);

pub struct TuiApplication {
    app: App,
}

impl TuiApplication {
    /// 設定からアプリケーションを作成し、初期ファイルがあれば開く
    pub fn new(config: EditorConfig) -> Self {
        let initial_file = config.initial_file.clone();
        let mut app = App::new(config);
        if let Some(path) = initial_file {
            app.open_initial_file(&path);
        }
        Self { app }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = leave_terminal();
                log::error!("terminal init failed: {}", err);
                return Err(EditorError::Ui(UiError::TerminalInit));
            }
        };

        let loop_result = self.event_loop(&mut terminal);
        let show_cursor_result = terminal.show_cursor().map_err(|err| terminal_error("show cursor", err));
        drop(terminal);
        let cleanup_result = leave_terminal();

        loop_result.and(show_cursor_result).and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.app.is_running() {
            terminal
                .draw(|frame| self.app.render(frame))
                .map_err(|err| terminal_error("render", err))?;

            if event::poll(POLL_INTERVAL).map_err(|err| terminal_error("event poll", err))? {
                match event::read().map_err(|err| terminal_error("event read", err))? {
                    Event::Key(key_event) => self.app.handle_key_event(key_event)?,
                    Event::Resize(_, _) => {}
                    Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
                }
            }
        }

        Ok(())
    }
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|err| terminal_error("enable raw mode", err))?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen).map_err(|err| terminal_error("enter alternate screen", err))?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, LeaveAlternateScreen).map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> EditorError {
    EditorError::Ui(UiError::RenderingFailed {
        component: format!("{}: {}", context, err),
    })
}
