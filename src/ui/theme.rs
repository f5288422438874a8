//! テーマシステム
//!
//! ダークテーマ固定。コンポーネントごとのスタイルを返す

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

/// UIコンポーネントの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// テキストエリア
    TextArea,
    /// 行番号
    LineNumber,
    /// タイトルバー
    TitleBar,
    /// メニューバー
    MenuBar,
    /// 選択中のメニュー項目
    MenuSelected,
    /// ステータスライン
    StatusLine,
    /// ミニバッファ
    Minibuffer,
    /// ポップアップの枠
    PopupBorder,
    /// エラーメッセージ
    Error,
    /// キーワード
    SyntaxKeyword,
    /// 検索マッチ
    SearchMatch,
}

/// テーマ設定
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    styles: HashMap<ComponentType, Style>,
}

impl Theme {
    /// ダークテーマ
    pub fn dark() -> Self {
        let mut styles = HashMap::new();
        styles.insert(ComponentType::TextArea, Style::default().fg(Color::White).bg(Color::Black));
        styles.insert(ComponentType::LineNumber, Style::default().fg(Color::DarkGray).bg(Color::Black));
        styles.insert(
            ComponentType::TitleBar,
            Style::default().fg(Color::White).bg(Color::Blue).add_modifier(Modifier::BOLD),
        );
        styles.insert(ComponentType::MenuBar, Style::default().fg(Color::Black).bg(Color::Gray));
        styles.insert(ComponentType::MenuSelected, Style::default().fg(Color::White).bg(Color::Blue));
        styles.insert(ComponentType::StatusLine, Style::default().fg(Color::Black).bg(Color::Gray));
        styles.insert(ComponentType::Minibuffer, Style::default().fg(Color::White).bg(Color::Black));
        styles.insert(ComponentType::PopupBorder, Style::default().fg(Color::Cyan).bg(Color::Black));
        styles.insert(ComponentType::Error, Style::default().fg(Color::Red).bg(Color::Black));
        styles.insert(ComponentType::SyntaxKeyword, Style::default().fg(Color::Cyan));
        styles.insert(ComponentType::SearchMatch, Style::default().fg(Color::Black).bg(Color::Yellow));

        Self {
            name: "dark".to_string(),
            styles,
        }
    }

    /// 特定のコンポーネントのスタイルを取得
    pub fn style(&self, component: ComponentType) -> Style {
        self.styles.get(&component).copied().unwrap_or_default()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
