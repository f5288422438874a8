//! ロギングシステム
//!
//! `log` ファサードのバックエンド。TUI 描画を壊さないよう、出力先はファイルのみ

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// ロガー
///
/// ログファイルが未設定の場合は何も出力しない
#[derive(Debug)]
pub struct Logger {
    level: LevelFilter,
    output_file: Option<PathBuf>,
    lock: Mutex<()>,
}

impl Logger {
    /// デフォルト構築
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            output_file: None,
            lock: Mutex::new(()),
        }
    }

    /// 開発者向けロガー
    pub fn for_development() -> Self {
        Self::new(LevelFilter::Debug)
    }

    /// ログレベルを取得
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// ファイル出力を設定
    pub fn with_file_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// 出力先ファイル
    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    /// 整形済みの1行を生成（`[ミリ秒] LEVEL target: message`）
    pub fn format_line(level: Level, target: &str, message: &str) -> String {
        format!("[{}] {:<5} {}: {}", timestamp_ms(), level, target, message)
    }

    fn write_line(&self, line: &str) {
        let Some(path) = &self.output_file else {
            return;
        };

        let _guard = self.lock.lock();
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = writeln!(file, "{}", line);
        }
    }

    /// グローバルロガーとして登録
    ///
    /// 既に登録済みの場合は何もしない
    pub fn install(self) {
        let level = self.level;
        if let Some(path) = &self.output_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
        }
        if log::set_boxed_logger(Box::new(self)).is_ok() {
            log::set_max_level(level);
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format_line(record.level(), record.target(), &record.args().to_string());
        self.write_line(&line);
    }

    fn flush(&self) {}
}

/// 既定のデバッグログ出力先（`~/.codepad-log/debug.log`）
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".codepad-log").join("debug.log"))
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|dur| dur.as_millis())
        .unwrap_or_default()
}
