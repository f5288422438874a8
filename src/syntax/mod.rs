//! キーワード強調
//!
//! 正規表現ベースの簡易トークナイザでバッファを走査し、Python キーワードの範囲を求める。
//! 文字列リテラル・コメント内の単語はキーワードとして扱わない。

use regex::Regex;
use std::sync::OnceLock;

/// Python のキーワード（ソフトキーワードを含む）
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "case", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "match", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// トークン種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    String,
    Comment,
    Number,
}

/// 1行内のトークン範囲（列は文字単位、終端は排他的）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxSpan {
    pub line: usize,
    pub start_column: usize,
    pub end_column: usize,
    pub kind: TokenKind,
}

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(concat!(
            r#"(?P<comment>#[^\n]*)"#,
            r#"|(?P<string>(?:[rRbBuUfF]{1,2})?(?:"""(?s:.*?)(?:"""|\z)|'''(?s:.*?)(?:'''|\z)|"(?:[^"\\\n]|\\.)*"?|'(?:[^'\\\n]|\\.)*'?))"#,
            r#"|(?P<ident>[^\W\d]\w*)"#,
            r#"|(?P<number>\b\d[\d_]*(?:\.[\d_]*)?(?:[eE][+-]?\d+)?[jJ]?)"#,
        ))
        .expect("token pattern is valid")
    })
}

/// キーワード強調器
#[derive(Debug, Clone)]
pub struct KeywordHighlighter {
    keywords: &'static [&'static str],
}

impl KeywordHighlighter {
    /// Python キーワードで作成
    pub fn python() -> Self {
        Self { keywords: PYTHON_KEYWORDS }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(&word)
    }

    /// 全トークンを行単位の範囲として返す
    pub fn tokenize(&self, text: &str) -> Vec<SyntaxSpan> {
        let mut spans = Vec::new();
        let mut locator = Locator::new(text);

        for caps in token_regex().captures_iter(text) {
            let (kind, m) = if let Some(m) = caps.name("comment") {
                (TokenKind::Comment, m)
            } else if let Some(m) = caps.name("string") {
                (TokenKind::String, m)
            } else if let Some(m) = caps.name("ident") {
                let kind = if self.is_keyword(m.as_str()) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Identifier
                };
                (kind, m)
            } else if let Some(m) = caps.name("number") {
                (TokenKind::Number, m)
            } else {
                continue;
            };

            let (line, column) = locator.advance_to(m.start());
            push_span(&mut spans, kind, line, column, m.as_str());
            locator.advance_to(m.end());
        }

        spans
    }

    /// キーワードの範囲のみを返す
    pub fn highlight(&self, text: &str) -> Vec<SyntaxSpan> {
        self.tokenize(text)
            .into_iter()
            .filter(|span| span.kind == TokenKind::Keyword)
            .collect()
    }
}

impl Default for KeywordHighlighter {
    fn default() -> Self {
        Self::python()
    }
}

/// 複数行にまたがるトークン（三重引用符の文字列など）は行ごとに分割
fn push_span(spans: &mut Vec<SyntaxSpan>, kind: TokenKind, line: usize, column: usize, token: &str) {
    for (offset, segment) in token.split('\n').enumerate() {
        let start_column = if offset == 0 { column } else { 0 };
        let len = segment.chars().count();
        if len > 0 {
            spans.push(SyntaxSpan {
                line: line + offset,
                start_column,
                end_column: start_column + len,
                kind,
            });
        }
    }
}

/// バイトオフセットから行・列（文字単位）を前方に向かって求める
struct Locator<'a> {
    text: &'a str,
    byte: usize,
    line: usize,
    column: usize,
}

impl<'a> Locator<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, byte: 0, line: 0, column: 0 }
    }

    fn advance_to(&mut self, byte: usize) -> (usize, usize) {
        if byte > self.byte {
            for ch in self.text[self.byte..byte].chars() {
                if ch == '\n' {
                    self.line += 1;
                    self.column = 0;
                } else {
                    self.column += 1;
                }
            }
            self.byte = byte;
        }
        (self.line, self.column)
    }
}
