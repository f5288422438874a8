//! 入力処理モジュール

pub mod keybinding;

pub use keybinding::{Action, KeyMap, DEFAULT_PAGE_ROWS};
