//! 検索用マッチャー

use super::types::SearchMatch;

/// 文字列マッチング戦略
pub trait StringMatcher {
    /// 文字列内の重ならないマッチをすべて返す
    fn find_matches(&self, text: &str, pattern: &str, case_sensitive: bool) -> Vec<SearchMatch>;
}

/// 先頭から走査し、マッチの直後から再開するリテラルマッチャー
#[derive(Debug, Default, Clone)]
pub struct LiteralMatcher;

impl LiteralMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl StringMatcher for LiteralMatcher {
    fn find_matches(&self, text: &str, pattern: &str, case_sensitive: bool) -> Vec<SearchMatch> {
        let chars: Vec<char> = text.chars().collect();
        let pattern_chars: Vec<char> = pattern.chars().collect();

        if pattern_chars.is_empty() || pattern_chars.len() > chars.len() {
            return Vec::new();
        }

        let last_start = chars.len() - pattern_chars.len();
        let mut matches = Vec::new();
        let mut line = 0usize;
        let mut column = 0usize;
        let mut start = 0usize;

        while start <= last_start {
            let found = pattern_chars
                .iter()
                .enumerate()
                .all(|(offset, pat)| chars_equal(chars[start + offset], *pat, case_sensitive));

            let step = if found {
                let end = start + pattern_chars.len();
                matches.push(SearchMatch { start, end, line, column });
                pattern_chars.len()
            } else {
                1
            };

            for ch in &chars[start..start + step] {
                if *ch == '\n' {
                    line += 1;
                    column = 0;
                } else {
                    column += 1;
                }
            }
            start += step;
        }

        matches
    }
}

fn chars_equal(a: char, b: char, case_sensitive: bool) -> bool {
    if case_sensitive {
        return a == b;
    }
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
