//! 編集履歴（Undo/Redo）

/// 1回分の編集操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomicEdit {
    /// `position` に `text` を挿入した
    Insert { position: usize, text: String },
    /// `position` から `text` を削除した
    Delete { position: usize, text: String },
}

impl AtomicEdit {
    /// 逆操作
    pub fn inverse(&self) -> AtomicEdit {
        match self {
            AtomicEdit::Insert { position, text } => AtomicEdit::Delete {
                position: *position,
                text: text.clone(),
            },
            AtomicEdit::Delete { position, text } => AtomicEdit::Insert {
                position: *position,
                text: text.clone(),
            },
        }
    }
}

/// 履歴エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub edit: AtomicEdit,
    pub cursor_before: usize,
    pub cursor_after: usize,
}

impl HistoryEntry {
    /// 連続した1文字入力・後退削除はまとめる
    fn try_merge(&mut self, next: &HistoryEntry) -> bool {
        match (&mut self.edit, &next.edit) {
            (
                AtomicEdit::Insert { position, text },
                AtomicEdit::Insert { position: next_pos, text: next_text },
            ) => {
                let joinable = *next_pos == *position + text.chars().count()
                    && next_text.chars().count() == 1
                    && !next_text.starts_with('\n')
                    && !text.ends_with('\n');
                if joinable {
                    text.push_str(next_text);
                    self.cursor_after = next.cursor_after;
                }
                joinable
            }
            (
                AtomicEdit::Delete { position, text },
                AtomicEdit::Delete { position: next_pos, text: next_text },
            ) => {
                let joinable = next_text.chars().count() == 1
                    && *next_pos + 1 == *position
                    && !next_text.starts_with('\n');
                if joinable {
                    text.insert_str(0, next_text);
                    *position = *next_pos;
                    self.cursor_after = next.cursor_after;
                }
                joinable
            }
            _ => false,
        }
    }
}

/// 編集履歴スタック
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    undo: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// 新しい編集を記録（Redo 履歴は破棄）
    pub fn push(&mut self, entry: HistoryEntry) {
        self.redo.clear();
        if let Some(last) = self.undo.last_mut() {
            if last.try_merge(&entry) {
                return;
            }
        }
        self.undo.push(entry);
    }

    pub fn take_for_undo(&mut self) -> Option<HistoryEntry> {
        self.undo.pop()
    }

    pub fn push_redo(&mut self, entry: HistoryEntry) {
        self.redo.push(entry);
    }

    pub fn take_for_redo(&mut self) -> Option<HistoryEntry> {
        self.redo.pop()
    }

    /// Redo 由来のエントリを Redo 履歴を残したまま積む
    pub fn push_without_clearing(&mut self, entry: HistoryEntry) {
        self.undo.push(entry);
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
