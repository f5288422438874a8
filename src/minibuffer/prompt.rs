//! プロンプト管理
//!
//! ファイル選択・検索ダイアログの代わりに、画面下部の1行で入力を受け付ける

use super::completion::PathCompletion;

/// プロンプトの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// 入力が完了した
    Completed(String),
    /// 入力がキャンセルされた
    Cancelled,
}

/// プロンプトの種類（入力完了後に行う操作）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// 開くファイル
    OpenFile,
    /// 名前を付けて保存
    SaveAs,
    /// 実行前の保存先
    SaveBeforeRun,
    /// 検索クエリ
    Search,
}

impl PromptKind {
    /// プロンプト表示文字列
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::OpenFile => "Open file: ",
            PromptKind::SaveAs => "Save as: ",
            PromptKind::SaveBeforeRun => "Save as (then run): ",
            PromptKind::Search => "Search: ",
        }
    }

    /// ファイルパスを入力するプロンプトか
    pub fn is_file_path(self) -> bool {
        !matches!(self, PromptKind::Search)
    }
}

/// プロンプト管理器
#[derive(Debug, Clone, Default)]
pub struct PromptManager {
    kind: Option<PromptKind>,
    input: String,
    /// 直近の補完候補（表示用）
    candidates: Vec<String>,
    completion: PathCompletion,
}

impl PromptManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// プロンプトを開始
    pub fn start(&mut self, kind: PromptKind, initial: &str) {
        self.kind = Some(kind);
        self.input = initial.to_string();
        self.candidates.clear();
    }

    /// プロンプトを終了
    pub fn end(&mut self) {
        self.kind = None;
        self.input.clear();
        self.candidates.clear();
    }

    pub fn is_active(&self) -> bool {
        self.kind.is_some()
    }

    pub fn kind(&self) -> Option<PromptKind> {
        self.kind
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// 表示用の1行（ラベル + 入力）
    pub fn display_line(&self) -> String {
        match self.kind {
            Some(kind) => format!("{}{}", kind.label(), self.input),
            None => String::new(),
        }
    }

    pub fn add_char(&mut self, ch: char) {
        if self.is_active() {
            self.input.push(ch);
            self.candidates.clear();
        }
    }

    /// 最後の文字を削除（削除したかを返す）
    pub fn backspace(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.candidates.clear();
        self.input.pop().is_some()
    }

    /// ファイル名プロンプトで Tab 補完
    pub fn complete(&mut self) {
        match self.kind {
            Some(kind) if kind.is_file_path() => {
                let result = self.completion.complete(&self.input);
                self.input = result.completed_input;
                self.candidates = result.candidates;
            }
            _ => {}
        }
    }

    /// 入力を完了
    pub fn submit(&mut self) -> PromptResult {
        if !self.is_active() {
            return PromptResult::Cancelled;
        }
        let result = self.input.clone();
        self.end();
        PromptResult::Completed(result)
    }

    /// 入力をキャンセル
    pub fn cancel(&mut self) -> PromptResult {
        self.end();
        PromptResult::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_returns_input_and_closes() {
        let mut prompt = PromptManager::new();
        prompt.start(PromptKind::Search, "");
        for ch in "def".chars() {
            prompt.add_char(ch);
        }
        assert_eq!(prompt.display_line(), "Search: def");
        assert_eq!(prompt.submit(), PromptResult::Completed("def".to_string()));
        assert!(!prompt.is_active());
    }

    #[test]
    fn cancel_discards_input() {
        let mut prompt = PromptManager::new();
        prompt.start(PromptKind::OpenFile, "main.py");
        assert_eq!(prompt.cancel(), PromptResult::Cancelled);
        assert_eq!(prompt.input(), "");
    }

    #[test]
    fn backspace_on_empty_input() {
        let mut prompt = PromptManager::new();
        prompt.start(PromptKind::SaveAs, "a");
        assert!(prompt.backspace());
        assert!(!prompt.backspace());
    }

    #[test]
    fn inactive_prompt_ignores_input() {
        let mut prompt = PromptManager::new();
        prompt.add_char('x');
        assert_eq!(prompt.input(), "");
        assert_eq!(prompt.submit(), PromptResult::Cancelled);
    }

    #[test]
    fn search_prompt_does_not_complete_paths() {
        let mut prompt = PromptManager::new();
        prompt.start(PromptKind::Search, "/");
        prompt.complete();
        assert_eq!(prompt.input(), "/");
        assert!(prompt.candidates().is_empty());
    }
}
