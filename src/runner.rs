//! 外部インタプリタ実行
//!
//! 保存済みファイルを `<interpreter> <path>` として同期実行し、標準出力と標準エラー出力を取得する。
//! タイムアウト・逐次表示・中断はない。実行中はイベントループが停止する。

use crate::error::{Result, RunError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// 実行結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// 実行したファイル
    pub path: PathBuf,
    pub stdout: String,
    pub stderr: String,
    /// 終了コード（シグナル終了時は None）
    pub exit_code: Option<i32>,
}

impl RunOutput {
    /// 出力ウィンドウに表示する内容（stdout + 改行 + stderr）
    pub fn combined(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// 出力ウィンドウのタイトル
    pub fn title(&self) -> String {
        match self.exit_code {
            Some(code) => format!("Code Output (exit {})", code),
            None => "Code Output (terminated)".to_string(),
        }
    }
}

/// インタプリタ起動器
#[derive(Debug, Clone)]
pub struct Runner {
    interpreter: String,
}

impl Runner {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    /// ファイルを実行し、終了まで待つ
    pub fn run(&self, path: &Path) -> Result<RunOutput> {
        log::info!("running {} {}", self.interpreter, path.display());

        let output = Command::new(&self.interpreter)
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => RunError::InterpreterNotFound {
                    interpreter: self.interpreter.clone(),
                },
                _ => RunError::Spawn {
                    interpreter: self.interpreter.clone(),
                    message: err.to_string(),
                },
            })?;

        let result = RunOutput {
            path: path.to_path_buf(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };
        log::info!("{} exited with {:?}", self.interpreter, result.exit_code);
        Ok(result)
    }
}
