//! ポップアップウィンドウ
//!
//! 実行結果の出力ウィンドウ

use crate::runner::RunOutput;

/// 実行結果を表示するウィンドウ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputWindow {
    title: String,
    lines: Vec<String>,
    scroll: usize,
}

impl OutputWindow {
    pub fn new(title: impl Into<String>, text: &str) -> Self {
        Self {
            title: title.into(),
            lines: text.split('\n').map(str::to_string).collect(),
            scroll: 0,
        }
    }

    /// 実行結果から作成（stdout と stderr を連結）
    pub fn from_run(output: &RunOutput) -> Self {
        Self::new(output.title(), &output.combined())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn scroll_down(&mut self, rows: usize) {
        let max = self.lines.len().saturating_sub(1);
        self.scroll = (self.scroll + rows).min(max);
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_sub(rows);
    }
}
