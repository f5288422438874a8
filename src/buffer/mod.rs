//! バッファ管理モジュール
//!
//! テキストデータ、カーソル位置、編集履歴をまとめたテキストウィジェットのモデル

pub mod cursor;
pub mod gap_buffer;
pub mod history;

pub use cursor::CursorPosition;
pub use gap_buffer::GapBuffer;
pub use history::{AtomicEdit, HistoryEntry, HistoryStack};

use thiserror::Error;

/// タブ入力で挿入する空白数
pub const TAB_WIDTH: usize = 4;

/// バッファ操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Invalid position: {position}")]
    InvalidPosition { position: usize },
}

/// 編集中のテキストバッファ
#[derive(Debug, Clone)]
pub struct TextBuffer {
    content: GapBuffer,
    cursor: CursorPosition,
    /// 上下移動時に維持する列
    preferred_column: Option<usize>,
    history: HistoryStack,
    modified: bool,
}

impl TextBuffer {
    /// 空のバッファを作成
    pub fn new() -> Self {
        Self {
            content: GapBuffer::new(),
            cursor: CursorPosition::new(),
            preferred_column: None,
            history: HistoryStack::new(),
            modified: false,
        }
    }

    /// 文字列からバッファを作成（未変更状態）
    pub fn from_str(text: &str) -> Self {
        Self {
            content: GapBuffer::from_str(text),
            ..Self::new()
        }
    }

    /// 内容全体を置き換え、カーソル・履歴・変更フラグをリセット
    pub fn set_text(&mut self, text: &str) {
        self.content.replace_all(text);
        self.cursor = CursorPosition::new();
        self.preferred_column = None;
        self.history.clear();
        self.modified = false;
    }

    /// 全テキスト
    pub fn text(&self) -> String {
        self.content.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.content.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn cursor(&self) -> &CursorPosition {
        &self.cursor
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    /// 行数（空のバッファも1行）
    pub fn line_count(&self) -> usize {
        self.content.chars().filter(|&ch| ch == '\n').count() + 1
    }

    /// 行ごとのテキスト（改行文字は含まない）
    pub fn lines(&self) -> Vec<String> {
        self.text().split('\n').map(str::to_string).collect()
    }

    /// カーソル位置に文字を挿入
    pub fn insert_char(&mut self, ch: char) -> Result<(), BufferError> {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf))
    }

    /// カーソル位置に文字列を挿入
    pub fn insert_str(&mut self, text: &str) -> Result<(), BufferError> {
        if text.is_empty() {
            return Ok(());
        }
        let position = self.cursor.char_pos;
        self.content.insert_str(position, text)?;
        let after = position + text.chars().count();
        self.history.push(HistoryEntry {
            edit: AtomicEdit::Insert { position, text: text.to_string() },
            cursor_before: position,
            cursor_after: after,
        });
        self.after_edit(after);
        Ok(())
    }

    /// 改行を挿入
    pub fn insert_newline(&mut self) -> Result<(), BufferError> {
        self.insert_char('\n')
    }

    /// タブ幅分の空白を挿入
    pub fn insert_tab(&mut self) -> Result<(), BufferError> {
        self.insert_str(&" ".repeat(TAB_WIDTH))
    }

    /// カーソル前の1文字を削除（削除したかを返す）
    pub fn delete_backward(&mut self) -> Result<bool, BufferError> {
        let position = self.cursor.char_pos;
        if position == 0 {
            return Ok(false);
        }
        self.delete_at(position - 1, position)?;
        Ok(true)
    }

    /// カーソル位置の1文字を削除（削除したかを返す）
    pub fn delete_forward(&mut self) -> Result<bool, BufferError> {
        let position = self.cursor.char_pos;
        if position >= self.content.len_chars() {
            return Ok(false);
        }
        self.delete_at(position, position)?;
        Ok(true)
    }

    fn delete_at(&mut self, position: usize, cursor_before: usize) -> Result<(), BufferError> {
        let ch = self.content.delete(position)?;
        self.history.push(HistoryEntry {
            edit: AtomicEdit::Delete { position, text: ch.to_string() },
            cursor_before,
            cursor_after: position,
        });
        self.after_edit(position);
        Ok(())
    }

    fn after_edit(&mut self, char_pos: usize) {
        self.modified = true;
        self.preferred_column = None;
        self.set_cursor_char(char_pos);
    }

    fn set_cursor_char(&mut self, char_pos: usize) {
        self.cursor = CursorPosition::at_char(&self.content.to_string(), char_pos);
    }

    /// 直前の編集を取り消す
    pub fn undo(&mut self) -> Result<bool, BufferError> {
        let Some(entry) = self.history.take_for_undo() else {
            return Ok(false);
        };
        self.apply(&entry.edit.inverse())?;
        let cursor = entry.cursor_before;
        self.history.push_redo(entry);
        self.after_edit(cursor);
        Ok(true)
    }

    /// 取り消した編集をやり直す
    pub fn redo(&mut self) -> Result<bool, BufferError> {
        let Some(entry) = self.history.take_for_redo() else {
            return Ok(false);
        };
        self.apply(&entry.edit)?;
        let cursor = entry.cursor_after;
        self.history.push_without_clearing(entry);
        self.after_edit(cursor);
        Ok(true)
    }

    fn apply(&mut self, edit: &AtomicEdit) -> Result<(), BufferError> {
        match edit {
            AtomicEdit::Insert { position, text } => self.content.insert_str(*position, text),
            AtomicEdit::Delete { position, text } => self
                .content
                .delete_range(*position, *position + text.chars().count())
                .map(|_| ()),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// カーソル移動
    pub fn move_cursor(&mut self, motion: Motion) {
        let text = self.content.to_string();
        let current = self.cursor;
        let line_count = text.split('\n').count();

        let target = match motion {
            Motion::Left => {
                CursorPosition::at_char(&text, current.char_pos.saturating_sub(1))
            }
            Motion::Right => CursorPosition::at_char(&text, current.char_pos + 1),
            Motion::Up | Motion::Down | Motion::PageUp(_) | Motion::PageDown(_) => {
                let column = self.preferred_column.unwrap_or(current.column);
                let line = match motion {
                    Motion::Up => current.line.saturating_sub(1),
                    Motion::Down => (current.line + 1).min(line_count - 1),
                    Motion::PageUp(rows) => current.line.saturating_sub(rows),
                    Motion::PageDown(rows) => (current.line + rows).min(line_count - 1),
                    _ => current.line,
                };
                self.cursor = CursorPosition::at_line_column(&text, line, column);
                self.preferred_column = Some(column);
                return;
            }
            Motion::LineStart => CursorPosition::at_line_column(&text, current.line, 0),
            Motion::LineEnd => CursorPosition::at_line_column(&text, current.line, usize::MAX),
            Motion::BufferStart => CursorPosition::new(),
            Motion::BufferEnd => CursorPosition::at_char(&text, usize::MAX),
        };

        self.cursor = target;
        self.preferred_column = None;
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// カーソル移動の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    /// 指定行数だけ上へ
    PageUp(usize),
    /// 指定行数だけ下へ
    PageDown(usize),
    LineStart,
    LineEnd,
    BufferStart,
    BufferEnd,
}
