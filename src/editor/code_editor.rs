//! エディタ本体
//!
//! テキストバッファ・ファイルパス・ウィンドウタイトルと、
//! 開く／保存／検索／実行の各操作をまとめた単一のエディタオブジェクト

use crate::buffer::{Motion, TextBuffer};
use crate::config::EditorConfig;
use crate::editor::LineNumbers;
use crate::error::{EditorError, Result, RunError};
use crate::file::{self, display_path, normalize_for_save};
use crate::runner::{RunOutput, Runner};
use crate::search::{SearchController, SearchHighlight};
use crate::syntax::{KeywordHighlighter, SyntaxSpan};
use std::path::{Path, PathBuf};

/// 保存操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// 指定パスへ保存した
    Saved(PathBuf),
    /// ファイルパス未設定のため、名前を付けて保存が必要
    NeedsPath,
}

/// 実行操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunRequest {
    /// インタプリタを実行した
    Completed(RunOutput),
    /// ファイルパス未設定のため、先に保存先の入力が必要
    NeedsPath,
}

/// バッファを変更する編集コマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    InsertChar(char),
    InsertNewline,
    InsertTab,
    DeleteBackward,
    DeleteForward,
    Undo,
    Redo,
}

/// エディタ本体
#[derive(Debug)]
pub struct CodeEditor {
    config: EditorConfig,
    buffer: TextBuffer,
    file_path: Option<PathBuf>,
    title: String,
    line_numbers: LineNumbers,
    highlighter: KeywordHighlighter,
    syntax_spans: Vec<SyntaxSpan>,
    search: SearchController,
    runner: Runner,
}

impl CodeEditor {
    /// 空のバッファで作成
    pub fn new(config: EditorConfig) -> Self {
        let mut search = SearchController::new();
        search.set_case_sensitive(config.case_sensitive_search);

        Self {
            title: config.variant.base_title().to_string(),
            runner: Runner::new(config.interpreter.clone()),
            config,
            buffer: TextBuffer::new(),
            file_path: None,
            line_numbers: LineNumbers::default(),
            highlighter: KeywordHighlighter::python(),
            syntax_spans: Vec::new(),
            search,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    pub fn line_numbers(&self) -> &LineNumbers {
        &self.line_numbers
    }

    pub fn syntax_spans(&self) -> &[SyntaxSpan] {
        &self.syntax_spans
    }

    pub fn search_highlights(&self) -> &[SearchHighlight] {
        self.search.highlights()
    }

    pub fn last_search_query(&self) -> Option<&str> {
        self.search.last_query()
    }

    /// ファイルを開いてバッファを置き換える
    ///
    /// 失敗した場合はバッファとパスを変更しない
    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        let content = file::read_file(path)?;

        self.buffer.set_text(&content);
        self.set_file_path(path);
        self.search.clear();
        self.update_line_numbers();
        self.apply_syntax_highlighting();
        log::info!("opened {}", path.display());
        Ok(())
    }

    /// 現在のパスへ保存（パス未設定なら `NeedsPath`）
    pub fn save_file(&mut self) -> Result<SaveOutcome> {
        let Some(path) = self.file_path.clone() else {
            return Ok(SaveOutcome::NeedsPath);
        };
        self.write_to(&path)?;
        Ok(SaveOutcome::Saved(path))
    }

    /// 指定パスへ保存し、以後の保存先とする
    pub fn save_file_as(&mut self, path: &Path) -> Result<()> {
        self.write_to(path)?;
        self.set_file_path(path);
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> Result<()> {
        let text = self.buffer.text();
        file::write_file(path, normalize_for_save(&text))?;
        self.buffer.set_modified(false);
        log::info!("saved {}", path.display());
        Ok(())
    }

    fn set_file_path(&mut self, path: &Path) {
        self.file_path = Some(path.to_path_buf());
        self.title = format!("{} - {}", self.config.variant.base_title(), display_path(path));
    }

    /// クエリの全マッチをハイライトし、件数を返す
    pub fn search_text(&mut self, query: &str) -> usize {
        let text = self.buffer.text();
        self.search.search(&text, query)
    }

    /// 検索ハイライトを消去
    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// 現在のファイルをインタプリタで実行
    ///
    /// 未保存の変更があれば先に保存する
    pub fn run_code(&mut self) -> Result<RunRequest> {
        if !self.config.variant.can_run() {
            return Err(EditorError::Application(
                "Run is not available in this editor".to_string(),
            ));
        }

        let Some(path) = self.file_path.clone() else {
            return Ok(RunRequest::NeedsPath);
        };

        if self.buffer.is_modified() {
            self.write_to(&path)?;
        }

        self.runner.run(&path).map(RunRequest::Completed)
    }

    /// 名前を付けて保存した直後に実行（`run_code` が `NeedsPath` を返した場合の続き）
    pub fn save_as_and_run(&mut self, path: &Path) -> Result<RunOutput> {
        self.save_file_as(path)?;
        match self.run_code()? {
            RunRequest::Completed(output) => Ok(output),
            RunRequest::NeedsPath => Err(RunError::NoFile.into()),
        }
    }

    /// 行番号を再計算
    pub fn update_line_numbers(&mut self) {
        self.line_numbers = LineNumbers::for_text(&self.buffer.text());
    }

    /// キーワード強調を再計算（簡易エディタでは何もしない）
    pub fn apply_syntax_highlighting(&mut self) {
        if !self.config.variant.highlights_syntax() {
            self.syntax_spans.clear();
            return;
        }
        self.syntax_spans = self.highlighter.highlight(&self.buffer.text());
    }

    /// 編集コマンドを適用（バッファが変化したかを返す）
    pub fn edit(&mut self, command: EditCommand) -> Result<bool> {
        let changed = match command {
            EditCommand::InsertChar(ch) => self.buffer.insert_char(ch).map(|_| true)?,
            EditCommand::InsertNewline => self.buffer.insert_newline().map(|_| true)?,
            EditCommand::InsertTab => self.buffer.insert_tab().map(|_| true)?,
            EditCommand::DeleteBackward => self.buffer.delete_backward()?,
            EditCommand::DeleteForward => self.buffer.delete_forward()?,
            EditCommand::Undo => self.buffer.undo()?,
            EditCommand::Redo => self.buffer.redo()?,
        };

        if changed {
            self.search.clear();
            self.update_line_numbers();
            self.apply_syntax_highlighting();
        }
        Ok(changed)
    }

    /// 文字列をまとめて挿入
    pub fn insert_str(&mut self, text: &str) -> Result<()> {
        self.buffer.insert_str(text)?;
        self.search.clear();
        self.update_line_numbers();
        self.apply_syntax_highlighting();
        Ok(())
    }

    /// カーソル移動
    pub fn move_cursor(&mut self, motion: Motion) {
        self.buffer.move_cursor(motion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorVariant;
    use tempfile::tempdir;

    fn type_text(editor: &mut CodeEditor, text: &str) {
        for ch in text.chars() {
            let command = if ch == '\n' {
                EditCommand::InsertNewline
            } else {
                EditCommand::InsertChar(ch)
            };
            editor.edit(command).unwrap();
        }
    }

    #[test]
    fn new_editor_has_base_title_and_no_path() {
        let editor = CodeEditor::new(EditorConfig::default());
        assert_eq!(editor.title(), "Advanced Code Editor");
        assert!(editor.file_path().is_none());
        assert_eq!(editor.line_numbers().count(), 1);
    }

    #[test]
    fn save_without_path_needs_path() {
        let mut editor = CodeEditor::new(EditorConfig::default());
        type_text(&mut editor, "x = 1");
        assert_eq!(editor.save_file().unwrap(), SaveOutcome::NeedsPath);
        assert!(editor.is_modified());
    }

    #[test]
    fn save_as_sets_path_and_title() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.py");
        let mut editor = CodeEditor::new(EditorConfig::default());
        type_text(&mut editor, "print(1)\n\n");

        editor.save_file_as(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "print(1)");
        assert_eq!(editor.file_path(), Some(path.as_path()));
        assert_eq!(editor.title(), format!("Advanced Code Editor - {}", path.display()));
        assert!(!editor.is_modified());

        assert_eq!(editor.save_file().unwrap(), SaveOutcome::Saved(path));
    }

    #[test]
    fn failed_open_keeps_state() {
        let dir = tempdir().unwrap();
        let mut editor = CodeEditor::new(EditorConfig::default());
        type_text(&mut editor, "keep me");

        assert!(editor.open_file(&dir.path().join("missing.py")).is_err());
        assert_eq!(editor.text(), "keep me");
        assert!(editor.file_path().is_none());
    }

    #[test]
    fn typing_updates_line_numbers_and_keywords() {
        let mut editor = CodeEditor::new(EditorConfig::default());
        type_text(&mut editor, "if x:\n    pass");
        assert_eq!(editor.line_numbers().count(), 2);
        assert_eq!(editor.syntax_spans().len(), 2);

        editor.edit(EditCommand::Undo).unwrap();
        assert_eq!(editor.text(), "if x:\n");
    }

    #[test]
    fn simple_variant_has_no_highlighting_or_run() {
        let mut editor = CodeEditor::new(EditorConfig::simple());
        type_text(&mut editor, "def f(): return");
        assert!(editor.syntax_spans().is_empty());
        assert_eq!(editor.title(), EditorVariant::Simple.base_title());
        assert!(editor.run_code().is_err());
    }

    #[test]
    fn edits_clear_search_highlights() {
        let mut editor = CodeEditor::new(EditorConfig::default());
        type_text(&mut editor, "a a a");
        assert_eq!(editor.search_text("a"), 3);
        assert_eq!(editor.search_highlights().len(), 3);

        editor.edit(EditCommand::DeleteBackward).unwrap();
        assert!(editor.search_highlights().is_empty());
        assert_eq!(editor.last_search_query(), Some("a"));
    }

    #[test]
    fn run_without_path_needs_path() {
        let mut editor = CodeEditor::new(EditorConfig::default());
        assert_eq!(editor.run_code().unwrap(), RunRequest::NeedsPath);
    }
}
