//! エディタ設定
//!
//! 既定値 < 設定ファイル（`~/.codepad/config.json`）< 環境変数 < コマンドライン引数 の順で上書きする

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 既定のインタプリタ
pub const DEFAULT_INTERPRETER: &str = "python";

/// インタプリタ上書き用の環境変数
pub const INTERPRETER_ENV: &str = "CODEPAD_INTERPRETER";

/// デバッグログ有効化用の環境変数
pub const DEBUG_ENV: &str = "CODEPAD_DEBUG";

/// エディタの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorVariant {
    /// 行番号・キーワード強調・実行機能付き
    Advanced,
    /// テキスト編集・保存・検索のみ
    Simple,
}

impl EditorVariant {
    /// ウィンドウタイトルの基本部分
    pub fn base_title(self) -> &'static str {
        match self {
            EditorVariant::Advanced => "Advanced Code Editor",
            EditorVariant::Simple => "Simple Editor",
        }
    }

    pub fn shows_line_numbers(self) -> bool {
        matches!(self, EditorVariant::Advanced)
    }

    pub fn highlights_syntax(self) -> bool {
        matches!(self, EditorVariant::Advanced)
    }

    pub fn can_run(self) -> bool {
        matches!(self, EditorVariant::Advanced)
    }

    /// 拡張子なしで保存したときに補う拡張子
    pub fn default_extension(self) -> Option<&'static str> {
        match self {
            EditorVariant::Advanced => Some("py"),
            EditorVariant::Simple => None,
        }
    }
}

/// 設定ファイルの内容（全項目任意）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub variant: Option<EditorVariant>,
    pub interpreter: Option<String>,
    pub debug_log: Option<PathBuf>,
    pub case_sensitive_search: Option<bool>,
}

impl ConfigFile {
    /// JSON 文字列から読み込み
    pub fn from_json(path: &Path, source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|err| {
            ConfigError::InvalidFile {
                path: path.display().to_string(),
                message: err.to_string(),
            }
            .into()
        })
    }

    /// ファイルから読み込み（存在しなければ既定値）
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(source) => Self::from_json(path, &source),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::InvalidFile {
                path: path.display().to_string(),
                message: err.to_string(),
            }
            .into()),
        }
    }
}

/// 既定の設定ファイルパス
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".codepad").join("config.json"))
}

/// コマンドライン引数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub simple: bool,
    pub interpreter: Option<String>,
    pub debug_log: Option<PathBuf>,
    pub file: Option<PathBuf>,
}

impl CliArgs {
    /// 引数列を解析（プログラム名は含めない）
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut cli = CliArgs::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--simple" => cli.simple = true,
                "--interpreter" => {
                    let value = iter.next().ok_or_else(|| ConfigError::MissingValue {
                        option: arg.clone(),
                    })?;
                    cli.interpreter = Some(value.clone());
                }
                "--debug-log" => {
                    let value = iter.next().ok_or_else(|| ConfigError::MissingValue {
                        option: arg.clone(),
                    })?;
                    cli.debug_log = Some(PathBuf::from(value));
                }
                option if option.starts_with("--") => {
                    return Err(ConfigError::UnknownOption {
                        option: option.to_string(),
                    }
                    .into());
                }
                path => cli.file = Some(PathBuf::from(path)),
            }
        }

        Ok(cli)
    }
}

/// 解決済みのエディタ設定
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub variant: EditorVariant,
    pub interpreter: String,
    pub debug: bool,
    pub debug_log: Option<PathBuf>,
    pub case_sensitive_search: bool,
    pub initial_file: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            variant: EditorVariant::Advanced,
            interpreter: DEFAULT_INTERPRETER.to_string(),
            debug: false,
            debug_log: None,
            case_sensitive_search: true,
            initial_file: None,
        }
    }
}

impl EditorConfig {
    /// 簡易エディタ向け設定
    pub fn simple() -> Self {
        Self {
            variant: EditorVariant::Simple,
            ..Self::default()
        }
    }

    /// 設定ファイルの値で上書き
    pub fn merged_with_file(mut self, file: &ConfigFile) -> Self {
        if let Some(variant) = file.variant {
            self.variant = variant;
        }
        if let Some(interpreter) = &file.interpreter {
            self.interpreter = interpreter.clone();
        }
        if let Some(path) = &file.debug_log {
            self.debug_log = Some(path.clone());
        }
        if let Some(case_sensitive) = file.case_sensitive_search {
            self.case_sensitive_search = case_sensitive;
        }
        self
    }

    /// 環境変数の値で上書き
    pub fn merged_with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(interpreter) = lookup(INTERPRETER_ENV).filter(|value| !value.is_empty()) {
            self.interpreter = interpreter;
        }
        if lookup(DEBUG_ENV).is_some() {
            self.debug = true;
        }
        self
    }

    /// コマンドライン引数で上書き
    pub fn merged_with_cli(mut self, cli: &CliArgs) -> Self {
        if cli.simple {
            self.variant = EditorVariant::Simple;
        }
        if let Some(interpreter) = &cli.interpreter {
            self.interpreter = interpreter.clone();
        }
        if let Some(path) = &cli.debug_log {
            self.debug_log = Some(path.clone());
            self.debug = true;
        }
        if let Some(file) = &cli.file {
            self.initial_file = Some(file.clone());
        }
        self
    }

    /// 既定の読み込み順で設定を解決
    pub fn load(cli: &CliArgs) -> Result<Self> {
        let file = match default_config_path() {
            Some(path) => ConfigFile::load(&path)?,
            None => ConfigFile::default(),
        };

        Ok(Self::default()
            .merged_with_file(&file)
            .merged_with_env(|key| std::env::var(key).ok())
            .merged_with_cli(cli))
    }

    /// ログ出力先（デバッグ有効時のみ既定パスを使用）
    pub fn resolve_log_path(&self) -> Option<PathBuf> {
        match &self.debug_log {
            Some(path) => Some(path.clone()),
            None if self.debug => crate::logging::default_log_path(),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_starts_advanced_editor() {
        let cli = CliArgs::parse(&[]).unwrap();
        let config = EditorConfig::default().merged_with_cli(&cli);
        assert_eq!(config.variant, EditorVariant::Advanced);
        assert_eq!(config.interpreter, "python");
        assert!(config.initial_file.is_none());
    }

    #[test]
    fn parses_all_options() {
        let cli = CliArgs::parse(&args(&[
            "--simple",
            "--interpreter",
            "python3",
            "--debug-log",
            "/tmp/log.txt",
            "main.py",
        ]))
        .unwrap();

        assert!(cli.simple);
        assert_eq!(cli.interpreter.as_deref(), Some("python3"));
        assert_eq!(cli.debug_log, Some(PathBuf::from("/tmp/log.txt")));
        assert_eq!(cli.file, Some(PathBuf::from("main.py")));
    }

    #[test]
    fn missing_option_value_is_error() {
        assert!(CliArgs::parse(&args(&["--interpreter"])).is_err());
        assert!(CliArgs::parse(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn precedence_is_file_then_env_then_cli() {
        let file = ConfigFile::from_json(
            Path::new("config.json"),
            r#"{ "variant": "simple", "interpreter": "pypy", "case_sensitive_search": false }"#,
        )
        .unwrap();

        let config = EditorConfig::default().merged_with_file(&file);
        assert_eq!(config.variant, EditorVariant::Simple);
        assert_eq!(config.interpreter, "pypy");
        assert!(!config.case_sensitive_search);

        let config = config.merged_with_env(|key| match key {
            INTERPRETER_ENV => Some("python3".to_string()),
            _ => None,
        });
        assert_eq!(config.interpreter, "python3");
        assert!(!config.debug);

        let cli = CliArgs {
            interpreter: Some("python3.12".to_string()),
            ..CliArgs::default()
        };
        let config = config.merged_with_cli(&cli);
        assert_eq!(config.interpreter, "python3.12");
    }

    #[test]
    fn invalid_config_file_is_reported() {
        let result = ConfigFile::from_json(Path::new("config.json"), "{ not json");
        assert!(result.is_err());
    }

    #[test]
    fn debug_log_path_only_when_debugging() {
        let config = EditorConfig::default();
        assert!(config.resolve_log_path().is_none());

        let config = EditorConfig {
            debug_log: Some(PathBuf::from("/tmp/codepad.log")),
            ..EditorConfig::default()
        };
        assert_eq!(config.resolve_log_path(), Some(PathBuf::from("/tmp/codepad.log")));
    }
}
