//! 検索関連の共通型

/// 1件の検索マッチ情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// マッチ開始位置（文字インデックス）
    pub start: usize,
    /// マッチ終了位置（文字インデックス、排他的）
    pub end: usize,
    /// マッチ開始行
    pub line: usize,
    /// マッチ開始列
    pub column: usize,
}

impl SearchMatch {
    /// マッチ長（文字数）
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// UI描画用のハイライト情報（1行内の範囲）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHighlight {
    /// 行番号
    pub line: usize,
    /// 行内開始位置（文字単位）
    pub start_column: usize,
    /// 行内終了位置（文字単位、排他的）
    pub end_column: usize,
}
