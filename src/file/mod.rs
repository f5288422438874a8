//! ファイル操作モジュール
//!
//! - ファイル全体の読み込み・書き込み（チャンク処理なし）
//! - 保存時は末尾の空白・改行を除去
//! - 書き込み失敗はエラーダイアログで表示（エディタは継続）

pub mod io;
pub mod path;

pub use io::{normalize_for_save, read_file, write_file, DefaultFileOperations, FileOperations};
pub use path::{display_path, expand_path, with_default_extension};
