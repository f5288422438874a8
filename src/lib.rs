//! codepad - small terminal code editor
//!
//! 行番号・キーワード強調・全件検索・外部インタプリタ実行を備えたエディタと、
//! それらを省いた簡易エディタの2種類を提供する

// コアモジュール
pub mod app;
pub mod config;
pub mod error;
pub mod frontend;
pub mod logging;

// データ層
pub mod buffer;
pub mod file;

// 編集層
pub mod editor;
pub mod runner;
pub mod syntax;

// ロジック層
pub mod input;
pub mod minibuffer;
pub mod search;

// 表示層
pub mod ui;

// 公開API
pub use app::App;
pub use config::{CliArgs, EditorConfig, EditorVariant};
pub use editor::CodeEditor;
pub use error::{EditorError, Result};
pub use frontend::TuiApplication;
