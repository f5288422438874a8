//! エラーハンドリングシステム
//!
//! codepad 全体で使用される統一されたエラー型と、エラーダイアログ用の整形処理を定義

use crate::buffer::BufferError;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum EditorError {
    /// ファイル操作エラー
    #[error("File operation failed: {0}")]
    File(#[from] FileError),

    /// バッファ操作エラー
    #[error("Buffer operation failed: {0}")]
    Buffer(#[from] BufferError),

    /// 外部インタプリタ実行エラー
    #[error("Run failed: {0}")]
    Run(#[from] RunError),

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(#[from] UiError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// アプリケーション論理エラー
    #[error("Application error: {0}")]
    Application(String),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("Encoding error: {message}")]
    Encoding { message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl FileError {
    /// `std::io::Error` をパス付きのファイルエラーへ変換
    pub fn from_io(error: &std::io::Error, path: &Path) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            ErrorKind::NotFound => FileError::NotFound { path },
            ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
            ErrorKind::InvalidData => FileError::Encoding {
                message: format!("{}: {}", path, error),
            },
            _ => FileError::Io {
                message: format!("{}: {}", path, error),
            },
        }
    }
}

/// 外部プロセス実行固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("Interpreter not found on PATH: {interpreter}")]
    InterpreterNotFound { interpreter: String },

    #[error("Failed to start {interpreter}: {message}")]
    Spawn { interpreter: String, message: String },

    #[error("No file to run")]
    NoFile,
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum UiError {
    #[error("Terminal initialization failed")]
    TerminalInit,

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid configuration file: {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("Missing value for option: {option}")]
    MissingValue { option: String },

    #[error("Unknown option: {option}")]
    UnknownOption { option: String },
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Warning,
    Error,
    Fatal,
}

/// エラーダイアログの表示情報
#[derive(Debug, Clone)]
pub struct ErrorDialog {
    /// ダイアログのタイトル
    pub title: String,
    /// エラーメッセージ
    pub message: String,
    /// エラーレベル
    pub level: ErrorLevel,
}

impl ErrorDialog {
    pub fn new(error: &EditorError) -> Self {
        let (message, level) = Self::format_error(error);
        let title = match level {
            ErrorLevel::Warning => "Warning",
            ErrorLevel::Error => "Error",
            ErrorLevel::Fatal => "Fatal Error",
        };
        Self {
            title: title.to_string(),
            message,
            level,
        }
    }

    fn format_error(error: &EditorError) -> (String, ErrorLevel) {
        match error {
            EditorError::File(FileError::NotFound { path }) => {
                (format!("File not found: {}", path), ErrorLevel::Error)
            }
            EditorError::File(FileError::PermissionDenied { path }) => {
                (format!("Permission denied: {}", path), ErrorLevel::Error)
            }
            EditorError::File(FileError::InvalidPath { path }) => {
                (format!("Not a regular file: {}", path), ErrorLevel::Error)
            }
            EditorError::File(FileError::Encoding { message }) => {
                (format!("File is not valid UTF-8: {}", message), ErrorLevel::Error)
            }
            EditorError::File(FileError::Io { message }) => {
                (format!("I/O error: {}", message), ErrorLevel::Error)
            }
            EditorError::Run(RunError::InterpreterNotFound { interpreter }) => (
                format!("Interpreter '{}' was not found on PATH", interpreter),
                ErrorLevel::Error,
            ),
            EditorError::Run(RunError::NoFile) => {
                ("Save the file before running it".to_string(), ErrorLevel::Warning)
            }
            EditorError::Ui(UiError::TerminalInit) => {
                ("Terminal initialization failed".to_string(), ErrorLevel::Fatal)
            }
            _ => (error.to_string(), ErrorLevel::Error),
        }
    }
}

/// パニックハンドラの設定
///
/// 端末を通常モードへ戻してから位置情報を出力する
pub fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);

        if let Some(location) = panic_info.location() {
            log::error!("panic at {}:{}", location.file(), location.line());
        }
        default_hook(panic_info);
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, EditorError>;

// std::io::Error から EditorError への変換
impl From<std::io::Error> for EditorError {
    fn from(error: std::io::Error) -> Self {
        EditorError::File(FileError::Io {
            message: error.to_string(),
        })
    }
}
