//! カーソル位置管理

/// カーソル位置
///
/// `char_pos` がバッファ内の正となる位置で、`line`/`column` はそこから導出する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    /// バッファ先頭からの文字インデックス
    pub char_pos: usize,
    /// 行番号（0-based）
    pub line: usize,
    /// 行内の列（0-based、文字単位）
    pub column: usize,
}

impl CursorPosition {
    /// バッファ先頭のカーソル
    pub fn new() -> Self {
        Self::default()
    }

    /// 文字インデックスから行・列を計算
    pub fn at_char(text: &str, char_pos: usize) -> Self {
        let mut line = 0;
        let mut column = 0;
        let mut clamped = 0;

        for ch in text.chars().take(char_pos) {
            clamped += 1;
            if ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }

        Self {
            char_pos: clamped,
            line,
            column,
        }
    }

    /// 行・列から文字インデックスを計算（列は行末でクランプ）
    pub fn at_line_column(text: &str, line: usize, column: usize) -> Self {
        let mut char_pos = 0;
        let mut current_line = 0;

        for segment in text.split('\n') {
            let len = segment.chars().count();
            if current_line == line {
                let column = column.min(len);
                return Self {
                    char_pos: char_pos + column,
                    line,
                    column,
                };
            }
            char_pos += len + 1;
            current_line += 1;
        }

        // 範囲外の行は末尾へ
        Self::at_char(text, usize::MAX)
    }
}
