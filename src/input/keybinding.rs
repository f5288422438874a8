//! キーバインドシステム
//!
//! 端末のキーイベントをエディタのアクションへ変換する

use crate::buffer::Motion;
use crate::config::EditorVariant;
use crate::editor::EditCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// ページ送りの行数（描画領域が分かるまでの既定値）
pub const DEFAULT_PAGE_ROWS: usize = 20;

/// アクション定義
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// バッファ編集
    Edit(EditCommand),
    /// カーソル移動
    Move(Motion),
    /// ファイル操作
    Open,
    Save,
    SaveAs,
    /// 検索ダイアログ
    Search,
    /// 検索ハイライトを消去
    ClearSearch,
    /// 現在のファイルを実行
    Run,
    /// メニューバーを開く
    OpenMenu,
    /// アプリケーション終了
    Quit,
}

/// キーマップ
#[derive(Debug, Clone)]
pub struct KeyMap {
    variant: EditorVariant,
    page_rows: usize,
}

impl KeyMap {
    pub fn new(variant: EditorVariant) -> Self {
        Self {
            variant,
            page_rows: DEFAULT_PAGE_ROWS,
        }
    }

    /// ページ送り行数を描画領域の高さに合わせる
    pub fn set_page_rows(&mut self, rows: usize) {
        self.page_rows = rows.max(1);
    }

    /// キーイベントをアクションへ変換
    pub fn lookup(&self, event: &KeyEvent) -> Option<Action> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let alt = event.modifiers.contains(KeyModifiers::ALT);
        let shift = event.modifiers.contains(KeyModifiers::SHIFT);

        let action = match event.code {
            KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
                'o' => Action::Open,
                's' if shift || c.is_ascii_uppercase() => Action::SaveAs,
                's' => Action::Save,
                'w' => Action::SaveAs,
                'f' => Action::Search,
                'r' => Action::Run,
                'q' => Action::Quit,
                'z' => Action::Edit(EditCommand::Undo),
                'y' => Action::Edit(EditCommand::Redo),
                'a' => Action::Move(Motion::LineStart),
                'e' => Action::Move(Motion::LineEnd),
                _ => return None,
            },
            KeyCode::Char(_) if alt => return None,
            KeyCode::Char(c) => Action::Edit(EditCommand::InsertChar(c)),
            KeyCode::Enter => Action::Edit(EditCommand::InsertNewline),
            KeyCode::Tab => Action::Edit(EditCommand::InsertTab),
            KeyCode::Backspace => Action::Edit(EditCommand::DeleteBackward),
            KeyCode::Delete => Action::Edit(EditCommand::DeleteForward),
            KeyCode::Left => Action::Move(Motion::Left),
            KeyCode::Right => Action::Move(Motion::Right),
            KeyCode::Up => Action::Move(Motion::Up),
            KeyCode::Down => Action::Move(Motion::Down),
            KeyCode::Home if ctrl => Action::Move(Motion::BufferStart),
            KeyCode::End if ctrl => Action::Move(Motion::BufferEnd),
            KeyCode::Home => Action::Move(Motion::LineStart),
            KeyCode::End => Action::Move(Motion::LineEnd),
            KeyCode::PageUp => Action::Move(Motion::PageUp(self.page_rows)),
            KeyCode::PageDown => Action::Move(Motion::PageDown(self.page_rows)),
            KeyCode::F(5) => Action::Run,
            KeyCode::F(10) => Action::OpenMenu,
            KeyCode::Esc => Action::ClearSearch,
            _ => return None,
        };

        if action == Action::Run && !self.variant.can_run() {
            return None;
        }
        Some(action)
    }
}
