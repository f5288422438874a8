//! メインアプリケーション構造体
//!
//! エディタ本体とプロンプト・メニュー・ポップアップの状態を束ね、
//! キー入力を適切な処理先へ振り分ける

use crate::config::EditorConfig;
use crate::editor::{CodeEditor, RunRequest, SaveOutcome};
use crate::error::{EditorError, ErrorDialog, ErrorLevel, Result};
use crate::file::{display_path, expand_path, with_default_extension};
use crate::input::{Action, KeyMap};
use crate::minibuffer::{PromptKind, PromptManager, PromptResult};
use crate::runner::RunOutput;
use crate::ui::{MenuBar, MenuResponse, OutputWindow, RenderState, Renderer, Theme, Viewport};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use std::path::{Path, PathBuf};

/// 出力ウィンドウのページ送り行数
const OUTPUT_PAGE_ROWS: usize = 10;

/// メインアプリケーション構造体
///
/// キー入力の優先順位: ダイアログ > 出力ウィンドウ > プロンプト > メニュー > キーマップ
pub struct App {
    /// アプリケーション実行状態
    running: bool,
    /// エディタ本体
    editor: CodeEditor,
    /// キーマップ
    keymap: KeyMap,
    /// ミニバッファのプロンプト
    prompt: PromptManager,
    /// メニューバー
    menu: MenuBar,
    /// 実行結果ウィンドウ
    output: Option<OutputWindow>,
    /// エラーダイアログ
    dialog: Option<ErrorDialog>,
    /// ステータスラインのメッセージ
    status: Option<String>,
    /// テキスト領域のスクロール位置
    viewport: Viewport,
    renderer: Renderer,
}

impl App {
    pub fn new(config: EditorConfig) -> Self {
        let variant = config.variant;
        Self {
            running: true,
            editor: CodeEditor::new(config),
            keymap: KeyMap::new(variant),
            prompt: PromptManager::new(),
            menu: MenuBar::for_variant(variant),
            output: None,
            dialog: None,
            status: None,
            viewport: Viewport::default(),
            renderer: Renderer::new(Theme::dark()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn editor(&self) -> &CodeEditor {
        &self.editor
    }

    pub fn prompt(&self) -> &PromptManager {
        &self.prompt
    }

    pub fn menu(&self) -> &MenuBar {
        &self.menu
    }

    pub fn output(&self) -> Option<&OutputWindow> {
        self.output.as_ref()
    }

    pub fn dialog(&self) -> Option<&ErrorDialog> {
        self.dialog.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// 起動時に指定されたファイルを開く
    pub fn open_initial_file(&mut self, path: &Path) {
        self.open_path(path);
    }

    /// 1フレーム描画
    pub fn render(&mut self, frame: &mut Frame<'_>) {
        self.renderer.draw(
            frame,
            RenderState {
                editor: &self.editor,
                viewport: &mut self.viewport,
                menu: &self.menu,
                prompt: &self.prompt,
                output: self.output.as_ref(),
                dialog: self.dialog.as_ref(),
                status: self.status.as_deref(),
            },
        );
        self.keymap.set_page_rows(self.viewport.height());
    }

    /// キーイベントを処理
    pub fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        if event.kind == KeyEventKind::Release {
            return Ok(());
        }

        if self.dialog.take().is_some() {
            return Ok(());
        }

        if self.output.is_some() {
            self.handle_output_key(&event);
            return Ok(());
        }

        if self.prompt.is_active() {
            return self.handle_prompt_key(&event);
        }

        if self.menu.is_open() {
            if let MenuResponse::Activate(action) = self.menu.handle_key(&event) {
                return self.dispatch(action);
            }
            return Ok(());
        }

        match self.keymap.lookup(&event) {
            Some(action) => self.dispatch(action),
            None => Ok(()),
        }
    }

    fn handle_output_key(&mut self, event: &KeyEvent) {
        if matches!(event.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            self.output = None;
            return;
        }
        if let Some(output) = self.output.as_mut() {
            match event.code {
                KeyCode::Up => output.scroll_up(1),
                KeyCode::Down => output.scroll_down(1),
                KeyCode::PageUp => output.scroll_up(OUTPUT_PAGE_ROWS),
                KeyCode::PageDown => output.scroll_down(OUTPUT_PAGE_ROWS),
                _ => {}
            }
        }
    }

    fn handle_prompt_key(&mut self, event: &KeyEvent) -> Result<()> {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        match event.code {
            KeyCode::Esc => {
                self.prompt.cancel();
                self.status = Some("Cancelled".to_string());
            }
            KeyCode::Char('g') if ctrl => {
                self.prompt.cancel();
                self.status = Some("Cancelled".to_string());
            }
            KeyCode::Enter => {
                let kind = self.prompt.kind();
                if let (Some(kind), PromptResult::Completed(input)) = (kind, self.prompt.submit()) {
                    self.finish_prompt(kind, &input);
                }
            }
            KeyCode::Tab => self.prompt.complete(),
            KeyCode::Backspace => {
                self.prompt.backspace();
            }
            KeyCode::Char(ch) if !ctrl => self.prompt.add_char(ch),
            _ => {}
        }
        Ok(())
    }

    /// プロンプト確定後の処理
    fn finish_prompt(&mut self, kind: PromptKind, input: &str) {
        match kind {
            PromptKind::Search => self.search(input),
            PromptKind::OpenFile => match expand_path(input) {
                Ok(path) => self.open_path(&path),
                Err(err) => self.report_error(err),
            },
            PromptKind::SaveAs => match self.save_path(input) {
                Ok(path) => match self.editor.save_file_as(&path) {
                    Ok(()) => self.status = Some(format!("Saved {}", display_path(&path))),
                    Err(err) => self.report_error(err),
                },
                Err(err) => self.report_error(err),
            },
            PromptKind::SaveBeforeRun => match self.save_path(input) {
                Ok(path) => match self.editor.save_as_and_run(&path) {
                    Ok(output) => self.show_output(output),
                    Err(err) => self.report_error(err),
                },
                Err(err) => self.report_error(err),
            },
        }
    }

    /// 保存先の入力をパスへ展開（拡張子がなければ補う）
    fn save_path(&self, input: &str) -> Result<PathBuf> {
        let extension = self.editor.config().variant.default_extension();
        Ok(with_default_extension(expand_path(input)?, extension))
    }

    /// アクションを実行
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        log::debug!("dispatch {:?}", action);
        match action {
            Action::Edit(command) => {
                self.editor.edit(command)?;
            }
            Action::Move(motion) => self.editor.move_cursor(motion),
            Action::Open => self.prompt.start(PromptKind::OpenFile, ""),
            Action::Save => match self.editor.save_file() {
                Ok(SaveOutcome::Saved(path)) => self.status = Some(format!("Saved {}", display_path(&path))),
                Ok(SaveOutcome::NeedsPath) => self.prompt.start(PromptKind::SaveAs, ""),
                Err(err) => self.report_error(err),
            },
            Action::SaveAs => {
                let initial = self.editor.file_path().map(display_path).unwrap_or_default();
                self.prompt.start(PromptKind::SaveAs, &initial);
            }
            Action::Search => {
                let initial = self.editor.last_search_query().unwrap_or_default().to_string();
                self.prompt.start(PromptKind::Search, &initial);
            }
            Action::ClearSearch => {
                self.editor.clear_search();
                self.status = None;
            }
            Action::Run => match self.editor.run_code() {
                Ok(RunRequest::Completed(output)) => self.show_output(output),
                Ok(RunRequest::NeedsPath) => self.prompt.start(PromptKind::SaveBeforeRun, ""),
                Err(err) => self.report_error(err),
            },
            Action::OpenMenu => self.menu.open(),
            Action::Quit => self.running = false,
        }
        Ok(())
    }

    fn open_path(&mut self, path: &Path) {
        match self.editor.open_file(path) {
            Ok(()) => {
                self.viewport.reset();
                self.status = Some(format!("Opened {}", display_path(path)));
            }
            Err(err) => self.report_error(err),
        }
    }

    fn search(&mut self, query: &str) {
        if query.is_empty() {
            self.editor.clear_search();
            self.status = None;
            return;
        }
        let count = self.editor.search_text(query);
        self.status = Some(match count {
            0 => format!("No matches for \"{}\"", query),
            1 => format!("1 match for \"{}\"", query),
            n => format!("{} matches for \"{}\"", n, query),
        });
    }

    fn show_output(&mut self, output: RunOutput) {
        log::info!("ran {} (exit {:?})", output.path.display(), output.exit_code);
        self.status = Some(output.title());
        self.output = Some(OutputWindow::from_run(&output));
    }

    /// エラーをダイアログで通知
    fn report_error(&mut self, error: EditorError) {
        let dialog = ErrorDialog::new(&error);
        match dialog.level {
            ErrorLevel::Warning => log::warn!("{}", error),
            ErrorLevel::Error | ErrorLevel::Fatal => log::error!("{}", error),
        }
        self.dialog = Some(dialog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorVariant;
    use std::fs;
    use tempfile::tempdir;

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_key_event(KeyEvent::new(code, modifiers)).unwrap();
    }

    fn type_str(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch), KeyModifiers::NONE);
        }
    }

    fn ctrl(app: &mut App, ch: char) {
        press(app, KeyCode::Char(ch), KeyModifiers::CONTROL);
    }

    #[test]
    fn save_without_path_prompts_then_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hello.py");
        let mut app = App::new(EditorConfig::default());

        type_str(&mut app, "print(1)   ");
        ctrl(&mut app, 's');
        assert_eq!(app.prompt().kind(), Some(PromptKind::SaveAs));

        type_str(&mut app, path.to_str().unwrap());
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert!(!app.prompt().is_active());
        assert_eq!(fs::read_to_string(&path).unwrap(), "print(1)");
        assert!(!app.editor().is_modified());
        assert!(app.editor().title().ends_with("hello.py"));
    }

    #[test]
    fn save_as_adds_python_extension() {
        let dir = tempdir().unwrap();
        let mut app = App::new(EditorConfig::default());

        type_str(&mut app, "x = 1");
        ctrl(&mut app, 's');
        type_str(&mut app, dir.path().join("notes").to_str().unwrap());
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        let expected = dir.path().join("notes.py");
        assert_eq!(fs::read_to_string(&expected).unwrap(), "x = 1");
        assert_eq!(app.editor().file_path(), Some(expected.as_path()));
    }

    #[test]
    fn simple_save_as_keeps_name() {
        let dir = tempdir().unwrap();
        let mut app = App::new(EditorConfig::simple());

        type_str(&mut app, "todo");
        ctrl(&mut app, 's');
        type_str(&mut app, dir.path().join("notes").to_str().unwrap());
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(fs::read_to_string(dir.path().join("notes")).unwrap(), "todo");
    }

    #[test]
    fn search_prompt_highlights_matches() {
        let mut app = App::new(EditorConfig::default());
        type_str(&mut app, "aaaa");
        ctrl(&mut app, 'f');
        type_str(&mut app, "aa");
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.editor().search_highlights().len(), 2);
        assert_eq!(app.status(), Some("2 matches for \"aa\""));

        ctrl(&mut app, 'f');
        assert_eq!(app.prompt().input(), "aa");
        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.editor().search_highlights().is_empty());
    }

    #[test]
    fn missing_file_shows_dialog() {
        let dir = tempdir().unwrap();
        let mut app = App::new(EditorConfig::default());
        app.open_initial_file(&dir.path().join("absent.py"));

        let dialog = app.dialog().expect("dialog");
        assert!(dialog.message.contains("absent.py"));

        type_str(&mut app, "x");
        assert!(app.dialog().is_none());
        assert_eq!(app.editor().text(), "");
    }

    #[test]
    fn menu_routes_to_actions() {
        let mut app = App::new(EditorConfig::default());
        press(&mut app, KeyCode::F(10), KeyModifiers::NONE);
        assert!(app.menu().is_open());

        press(&mut app, KeyCode::Right, KeyModifiers::NONE);
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.prompt().kind(), Some(PromptKind::Search));
    }

    #[test]
    fn quit_stops_running() {
        let mut app = App::new(EditorConfig::default());
        ctrl(&mut app, 'q');
        assert!(!app.is_running());
    }

    #[test]
    fn simple_editor_cannot_run() {
        let mut app = App::new(EditorConfig::simple());
        assert_eq!(app.editor().config().variant, EditorVariant::Simple);
        press(&mut app, KeyCode::F(5), KeyModifiers::NONE);
        assert!(app.prompt().kind().is_none());
        assert!(app.output().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn run_unsaved_buffer_asks_for_path_then_shows_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("script.sh");
        let config = EditorConfig {
            interpreter: "sh".to_string(),
            ..EditorConfig::default()
        };
        let mut app = App::new(config);

        type_str(&mut app, "echo hi");
        press(&mut app, KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(app.prompt().kind(), Some(PromptKind::SaveBeforeRun));

        type_str(&mut app, path.to_str().unwrap());
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        let output = app.output().expect("output window");
        assert_eq!(output.lines()[0], "hi");
        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.output().is_none());
    }
}
