//! 検索モジュール
//!
//! 検索ダイアログから入力されたクエリの全マッチを求め、描画用ハイライトへ変換する

mod matcher;
pub mod types;

pub use matcher::{LiteralMatcher, StringMatcher};
pub use types::{SearchHighlight, SearchMatch};

/// 大文字小文字を区別して、重ならないマッチをすべて求める
pub fn find_all(text: &str, query: &str) -> Vec<SearchMatch> {
    LiteralMatcher::new().find_matches(text, query, true)
}

/// 検索制御インターフェース
#[derive(Debug)]
pub struct SearchController<M: StringMatcher = LiteralMatcher> {
    matcher: M,
    case_sensitive: bool,
    last_query: Option<String>,
    matches: Vec<SearchMatch>,
    highlights: Vec<SearchHighlight>,
}

impl SearchController<LiteralMatcher> {
    /// 既定のリテラルマッチャーで作成
    pub fn new() -> Self {
        Self::with_matcher(LiteralMatcher::new())
    }
}

impl Default for SearchController<LiteralMatcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: StringMatcher> SearchController<M> {
    /// マッチャーを差し替えて作成
    pub fn with_matcher(matcher: M) -> Self {
        Self {
            matcher,
            case_sensitive: true,
            last_query: None,
            matches: Vec::new(),
            highlights: Vec::new(),
        }
    }

    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
    }

    /// 直前に検索したクエリ
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    pub fn highlights(&self) -> &[SearchHighlight] {
        &self.highlights
    }

    /// 既存のハイライトを置き換えて検索し、マッチ数を返す
    pub fn search(&mut self, text: &str, query: &str) -> usize {
        self.matches = self.matcher.find_matches(text, query, self.case_sensitive);
        self.highlights = to_highlights(text, &self.matches);
        if !query.is_empty() {
            self.last_query = Some(query.to_string());
        }
        log::debug!("search {:?}: {} matches", query, self.matches.len());
        self.matches.len()
    }

    /// ハイライトを消去（クエリは保持）
    pub fn clear(&mut self) {
        self.matches.clear();
        self.highlights.clear();
    }
}

/// マッチを行単位のハイライトへ分割（改行をまたぐマッチは行ごとに分ける）
fn to_highlights(text: &str, matches: &[SearchMatch]) -> Vec<SearchHighlight> {
    let chars: Vec<char> = text.chars().collect();
    let mut highlights = Vec::with_capacity(matches.len());

    for m in matches {
        let mut line = m.line;
        let mut start_column = m.column;
        let mut column = m.column;

        for &ch in &chars[m.start..m.end] {
            if ch == '\n' {
                if column > start_column {
                    highlights.push(SearchHighlight { line, start_column, end_column: column });
                }
                line += 1;
                start_column = 0;
                column = 0;
            } else {
                column += 1;
            }
        }

        if column > start_column {
            highlights.push(SearchHighlight { line, start_column, end_column: column });
        }
    }

    highlights
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_all_resumes_after_each_match() {
        let starts: Vec<usize> = find_all("aaaaa", "aa").iter().map(|m| m.start).collect();
        assert_eq!(starts, vec![0, 2]);
        assert!(find_all("abc", "").is_empty());
    }

    #[test]
    fn search_replaces_previous_highlights() {
        let mut search = SearchController::new();
        assert_eq!(search.search("x = x + 1", "x"), 2);
        assert_eq!(search.highlights().len(), 2);

        assert_eq!(search.search("x = x + 1", "1"), 1);
        assert_eq!(
            search.highlights(),
            &[SearchHighlight { line: 0, start_column: 8, end_column: 9 }]
        );
        assert_eq!(search.last_query(), Some("1"));
    }

    #[test]
    fn multiline_match_is_split_per_line() {
        let mut search = SearchController::new();
        search.search("ab\ncd", "b\nc");
        assert_eq!(
            search.highlights(),
            &[
                SearchHighlight { line: 0, start_column: 1, end_column: 2 },
                SearchHighlight { line: 1, start_column: 0, end_column: 1 },
            ]
        );
    }

    #[test]
    fn clear_keeps_last_query() {
        let mut search = SearchController::new();
        search.search("abc", "b");
        search.clear();
        assert!(search.highlights().is_empty());
        assert_eq!(search.last_query(), Some("b"));
    }

    #[test]
    fn case_insensitive_mode() {
        let mut search = SearchController::new();
        search.set_case_sensitive(false);
        assert_eq!(search.search("True true TRUE", "true"), 3);
    }
}
