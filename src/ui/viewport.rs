//! ビューポート管理
//!
//! テキスト領域のスクロール位置を管理する。行番号ガターは縦スクロールを共有する

use unicode_width::UnicodeWidthChar;

/// 1文字の表示幅（タブは1セルとして扱う）
pub fn cell_width(ch: char) -> usize {
    if ch == '\t' {
        1
    } else {
        ch.width().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// 表示の開始行
    top_line: usize,
    /// 表示の開始列（文字単位）
    left_column: usize,
    /// 表示可能な行数
    height: usize,
    /// 表示可能な列数
    width: usize,
}

impl Viewport {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            top_line: 0,
            left_column: 0,
            height: height.max(1),
            width: width.max(1),
        }
    }

    /// ビューポートの寸法を更新
    pub fn set_dimensions(&mut self, height: usize, width: usize) {
        self.height = height.max(1);
        self.width = width.max(1);
    }

    /// カーソルが画面内に収まるようスクロールする（スクロールしたかを返す）
    pub fn ensure_visible(&mut self, line: usize, column: usize) -> bool {
        let before = (self.top_line, self.left_column);

        if line < self.top_line {
            self.top_line = line;
        } else if line >= self.top_line + self.height {
            self.top_line = line + 1 - self.height;
        }

        if column < self.left_column {
            self.left_column = column;
        } else if column >= self.left_column + self.width {
            self.left_column = column + 1 - self.width;
        }

        before != (self.top_line, self.left_column)
    }

    /// 全角文字を考慮してカーソルを画面内に収める
    ///
    /// `column` は文字単位。開始列からカーソルまでのセル幅が表示幅を超える間、開始列を進める
    pub fn ensure_cursor_visible(&mut self, line: usize, column: usize, line_text: &str) -> bool {
        let mut scrolled = self.ensure_visible(line, column);
        let chars: Vec<char> = line_text.chars().collect();
        let end = column.min(chars.len());

        while self.left_column < end {
            let cells: usize = chars[self.left_column..end].iter().copied().map(cell_width).sum();
            if cells < self.width {
                break;
            }
            self.left_column += 1;
            scrolled = true;
        }
        scrolled
    }

    /// 先頭へ戻す（ファイルを開いたときなど）
    pub fn reset(&mut self) {
        self.top_line = 0;
        self.left_column = 0;
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    pub fn left_column(&self) -> usize {
        self.left_column
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1, 1)
    }
}
