//! メニューバー
//!
//! File / Edit / Run メニュー。F10 で開き、矢印キーで選択、Enter で実行する

use crate::config::EditorVariant;
use crate::input::Action;
use crossterm::event::{KeyCode, KeyEvent};

/// メニュー項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub shortcut: &'static str,
    pub action: Action,
}

/// 1つのメニュー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub label: &'static str,
    pub items: Vec<MenuItem>,
}

/// キー入力に対するメニューの応答
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuResponse {
    /// 選択状態のみ変化
    Handled,
    /// メニューを閉じた
    Closed,
    /// 項目を実行する
    Activate(Action),
}

/// メニューバー
#[derive(Debug, Clone)]
pub struct MenuBar {
    menus: Vec<Menu>,
    open: bool,
    selected_menu: usize,
    selected_item: usize,
}

impl MenuBar {
    /// エディタの種類に応じたメニューを構築
    pub fn for_variant(variant: EditorVariant) -> Self {
        let mut menus = vec![
            Menu {
                label: "File",
                items: vec![
                    MenuItem { label: "Open", shortcut: "Ctrl+O", action: Action::Open },
                    MenuItem { label: "Save", shortcut: "Ctrl+S", action: Action::Save },
                    MenuItem { label: "Save As", shortcut: "Ctrl+W", action: Action::SaveAs },
                    MenuItem { label: "Exit", shortcut: "Ctrl+Q", action: Action::Quit },
                ],
            },
            Menu {
                label: "Edit",
                items: vec![MenuItem { label: "Search", shortcut: "Ctrl+F", action: Action::Search }],
            },
        ];

        if variant.can_run() {
            menus.push(Menu {
                label: "Run",
                items: vec![MenuItem { label: "Run Code", shortcut: "F5", action: Action::Run }],
            });
        }

        Self {
            menus,
            open: false,
            selected_menu: 0,
            selected_item: 0,
        }
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected_menu(&self) -> usize {
        self.selected_menu
    }

    pub fn selected_item(&self) -> usize {
        self.selected_item
    }

    pub fn open(&mut self) {
        self.open = true;
        self.selected_menu = 0;
        self.selected_item = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    fn current_items(&self) -> &[MenuItem] {
        self.menus
            .get(self.selected_menu)
            .map(|menu| menu.items.as_slice())
            .unwrap_or(&[])
    }

    fn cycle_menu(&mut self, forward: bool) {
        let count = self.menus.len();
        if count == 0 {
            return;
        }
        self.selected_menu = if forward {
            (self.selected_menu + 1) % count
        } else {
            (self.selected_menu + count - 1) % count
        };
        self.selected_item = 0;
    }

    fn cycle_item(&mut self, forward: bool) {
        let count = self.current_items().len();
        if count == 0 {
            return;
        }
        self.selected_item = if forward {
            (self.selected_item + 1) % count
        } else {
            (self.selected_item + count - 1) % count
        };
    }

    /// メニューが開いている間のキー処理
    pub fn handle_key(&mut self, event: &KeyEvent) -> MenuResponse {
        match event.code {
            KeyCode::Left => self.cycle_menu(false),
            KeyCode::Right | KeyCode::Tab => self.cycle_menu(true),
            KeyCode::Up => self.cycle_item(false),
            KeyCode::Down => self.cycle_item(true),
            KeyCode::Enter => {
                let action = self.current_items().get(self.selected_item).map(|item| item.action);
                self.close();
                return match action {
                    Some(action) => MenuResponse::Activate(action),
                    None => MenuResponse::Closed,
                };
            }
            KeyCode::Esc | KeyCode::F(10) => {
                self.close();
                return MenuResponse::Closed;
            }
            _ => {}
        }
        MenuResponse::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(menu: &mut MenuBar, code: KeyCode) -> MenuResponse {
        menu.handle_key(&KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn advanced_has_run_menu() {
        let labels: Vec<_> = MenuBar::for_variant(EditorVariant::Advanced)
            .menus()
            .iter()
            .map(|m| m.label)
            .collect();
        assert_eq!(labels, vec!["File", "Edit", "Run"]);

        let simple = MenuBar::for_variant(EditorVariant::Simple);
        assert_eq!(simple.menus().len(), 2);
    }

    #[test]
    fn navigate_and_activate() {
        let mut menu = MenuBar::for_variant(EditorVariant::Advanced);
        menu.open();
        assert_eq!(press(&mut menu, KeyCode::Down), MenuResponse::Handled);
        assert_eq!(press(&mut menu, KeyCode::Enter), MenuResponse::Activate(Action::Save));
        assert!(!menu.is_open());
    }

    #[test]
    fn left_wraps_to_last_menu() {
        let mut menu = MenuBar::for_variant(EditorVariant::Advanced);
        menu.open();
        press(&mut menu, KeyCode::Left);
        assert_eq!(menu.selected_menu(), 2);
        assert_eq!(press(&mut menu, KeyCode::Enter), MenuResponse::Activate(Action::Run));
    }

    #[test]
    fn escape_closes() {
        let mut menu = MenuBar::for_variant(EditorVariant::Simple);
        menu.open();
        assert_eq!(press(&mut menu, KeyCode::Esc), MenuResponse::Closed);
        assert!(!menu.is_open());
    }

    #[test]
    fn exit_item_quits() {
        let mut menu = MenuBar::for_variant(EditorVariant::Simple);
        menu.open();
        press(&mut menu, KeyCode::Up);
        assert_eq!(press(&mut menu, KeyCode::Enter), MenuResponse::Activate(Action::Quit));
    }
}
