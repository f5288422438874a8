//! 行番号ガター

/// 行番号の一覧（1-based、連番）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNumbers {
    count: usize,
}

impl LineNumbers {
    /// テキストの行数から作成（空のテキストも1行）
    pub fn for_text(text: &str) -> Self {
        Self {
            count: text.split('\n').count(),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// 表示用ラベル
    pub fn labels(&self) -> impl Iterator<Item = String> {
        (1..=self.count).map(|n| n.to_string())
    }

    /// ガター幅（番号の最大桁数）
    pub fn digits(&self) -> usize {
        self.count.to_string().len()
    }
}

impl Default for LineNumbers {
    fn default() -> Self {
        Self { count: 1 }
    }
}
