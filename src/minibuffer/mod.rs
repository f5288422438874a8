//! ミニバッファ
//!
//! ファイル名・検索語の入力プロンプトとパス補完

pub mod completion;
pub mod prompt;

pub use completion::{CompletionResult, PathCompletion};
pub use prompt::{PromptKind, PromptManager, PromptResult};
