//! パス処理ユーティリティ
//!
//! プロンプトに入力されたパスの展開（`~` と環境変数）

use crate::error::{EditorError, Result};
use std::path::{Path, PathBuf};

/// 入力文字列をファイルパスへ展開
pub fn expand_path(input: &str) -> Result<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EditorError::Application("Empty file name".to_string()));
    }

    let expanded = shellexpand::full(trimmed)
        .map_err(|err| EditorError::Application(format!("Cannot expand path: {}", err)))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// 拡張子のないパスに既定の拡張子を付ける
pub fn with_default_extension(mut path: PathBuf, extension: Option<&str>) -> PathBuf {
    if let Some(extension) = extension {
        if path.extension().is_none() {
            path.set_extension(extension);
        }
    }
    path
}

/// ウィンドウタイトル用の表示文字列
pub fn display_path(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_path_is_unchanged() {
        assert_eq!(expand_path(" src/main.py ").unwrap(), PathBuf::from("src/main.py"));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(expand_path("   ").is_err());
    }

    #[test]
    fn home_is_expanded() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/notes.txt").unwrap(), home.join("notes.txt"));
        }
    }

    #[test]
    fn default_extension_only_when_missing() {
        assert_eq!(
            with_default_extension(PathBuf::from("dir/notes"), Some("py")),
            PathBuf::from("dir/notes.py")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("notes.txt"), Some("py")),
            PathBuf::from("notes.txt")
        );
        assert_eq!(with_default_extension(PathBuf::from("notes"), None), PathBuf::from("notes"));
    }

    #[test]
    fn unknown_variable_is_error() {
        assert!(expand_path("$CODEPAD_SURELY_UNDEFINED_VAR/x").is_err());
    }
}
