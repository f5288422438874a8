//! ファイルI/O操作
//!
//! テキストファイル全体の読み込みと保存。保存は一時ファイル経由で原子的に行う

use crate::error::{FileError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// ファイル操作のトレイト
pub trait FileOperations {
    /// ファイルからテキストを読み込み
    fn read_file(&self, path: &Path) -> Result<String>;

    /// テキストをファイルに書き込み
    fn write_file(&self, path: &Path, content: &str) -> Result<()>;
}

/// ファイル操作の実装
#[derive(Debug, Clone, Default)]
pub struct DefaultFileOperations;

impl FileOperations for DefaultFileOperations {
    fn read_file(&self, path: &Path) -> Result<String> {
        if path.is_dir() {
            return Err(FileError::InvalidPath {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(path).map_err(|err| FileError::from_io(&err, path))?;
        log::debug!("read {} bytes from {}", content.len(), path.display());
        Ok(content)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if path.is_dir() {
            return Err(FileError::InvalidPath {
                path: path.display().to_string(),
            }
            .into());
        }

        // シンボリックリンクはリンク先を置き換える
        let target = resolve_target(path)?;
        let temp_path = temp_path_for(&target)?;
        fs::write(&temp_path, content.as_bytes()).map_err(|err| FileError::from_io(&err, path))?;

        if let Err(err) = copy_permissions(&target, &temp_path).and_then(|_| fs::rename(&temp_path, &target)) {
            let _ = fs::remove_file(&temp_path);
            return Err(FileError::from_io(&err, path).into());
        }

        log::debug!("wrote {} bytes to {}", content.len(), target.display());
        Ok(())
    }
}

/// 書き込み先の実体パスを解決
fn resolve_target(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            Ok(fs::canonicalize(path).map_err(|err| FileError::from_io(&err, path))?)
        }
        _ => Ok(path.to_path_buf()),
    }
}

/// 既存ファイルのパーミッションを一時ファイルへ引き継ぐ
fn copy_permissions(target: &Path, temp_path: &Path) -> std::io::Result<()> {
    match fs::metadata(target) {
        Ok(meta) => fs::set_permissions(temp_path, meta.permissions()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

/// 同じディレクトリ内の一時ファイル名を生成
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let filename = path.file_name().ok_or_else(|| FileError::InvalidPath {
        path: path.display().to_string(),
    })?;
    let temp_name = format!(".{}_{}.tmp", filename.to_string_lossy(), std::process::id());

    Ok(match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(temp_name),
        _ => PathBuf::from(temp_name),
    })
}

/// 保存時の正規化：バッファ末尾の空白・改行を除去する
pub fn normalize_for_save(content: &str) -> &str {
    content.trim_end()
}

/// ファイル読み込みの便利関数
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    DefaultFileOperations.read_file(path.as_ref())
}

/// ファイル書き込みの便利関数
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    DefaultFileOperations.write_file(path.as_ref(), content)
}
