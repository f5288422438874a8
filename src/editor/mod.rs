//! エディタモジュール
//!
//! 文書状態と各操作をまとめたエディタ本体

pub mod code_editor;
pub mod line_numbers;

pub use code_editor::{CodeEditor, EditCommand, RunRequest, SaveOutcome};
pub use line_numbers::LineNumbers;
