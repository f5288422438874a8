//! テキストエリア描画
//!
//! 表示範囲の行を、キーワード強調と検索ハイライトを重ねて描画する。
//! 検索ハイライトはキーワード強調より優先される。

use crate::editor::{CodeEditor, LineNumbers};
use crate::search::SearchHighlight;
use crate::syntax::SyntaxSpan;
use crate::ui::theme::{ComponentType, Theme};
use crate::ui::viewport::{cell_width, Viewport};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::collections::HashMap;

/// 1行を文字ごとのスタイルに分解してから、同じスタイルの連続をSpanにまとめる
pub fn styled_line(
    line_text: &str,
    keywords: &[&SyntaxSpan],
    highlights: &[&SearchHighlight],
    left_column: usize,
    width: usize,
    theme: &Theme,
) -> Line<'static> {
    let chars: Vec<char> = line_text.chars().collect();
    let base = theme.style(ComponentType::TextArea);
    let mut styles = vec![base; chars.len()];

    let keyword = base.patch(theme.style(ComponentType::SyntaxKeyword));
    for span in keywords {
        fill(&mut styles, span.start_column, span.end_column, keyword);
    }

    let matched = base.patch(theme.style(ComponentType::SearchMatch));
    for highlight in highlights {
        fill(&mut styles, highlight.start_column, highlight.end_column, matched);
    }

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut segment = String::new();
    let mut current: Option<Style> = None;

    for (ch, style) in chars.iter().zip(styles.iter()).skip(left_column).take(width) {
        if current.is_some_and(|s| s != *style) {
            if let Some(prev) = current {
                spans.push(Span::styled(std::mem::take(&mut segment), prev));
            }
        }
        current = Some(*style);
        segment.push(if *ch == '\t' { ' ' } else { *ch });
    }

    if let Some(style) = current {
        spans.push(Span::styled(segment, style));
    }

    Line::from(spans)
}

fn fill(styles: &mut [Style], start: usize, end: usize, style: Style) {
    let end = end.min(styles.len());
    if start < end {
        styles[start..end].iter_mut().for_each(|slot| *slot = style);
    }
}

fn group_by_line<T, F>(items: &[T], line_of: F) -> HashMap<usize, Vec<&T>>
where
    F: Fn(&T) -> usize,
{
    let mut grouped: HashMap<usize, Vec<&T>> = HashMap::new();
    for item in items {
        grouped.entry(line_of(item)).or_default().push(item);
    }
    grouped
}

/// ビューポート内の行を構築
pub fn visible_lines(editor: &CodeEditor, viewport: &Viewport, theme: &Theme) -> Vec<Line<'static>> {
    let keywords = group_by_line(editor.syntax_spans(), |span| span.line);
    let highlights = group_by_line(editor.search_highlights(), |h| h.line);

    editor
        .buffer()
        .lines()
        .iter()
        .enumerate()
        .skip(viewport.top_line())
        .take(viewport.height())
        .map(|(idx, text)| {
            styled_line(
                text,
                keywords.get(&idx).map(Vec::as_slice).unwrap_or(&[]),
                highlights.get(&idx).map(Vec::as_slice).unwrap_or(&[]),
                viewport.left_column(),
                viewport.width(),
                theme,
            )
        })
        .collect()
}

/// 行番号ガターの行（テキストと同じ縦スクロール）
pub fn gutter_lines(line_numbers: &LineNumbers, viewport: &Viewport) -> Vec<Line<'static>> {
    line_numbers
        .labels()
        .skip(viewport.top_line())
        .take(viewport.height())
        .map(|label| Line::from(format!("{} ", label)))
        .collect()
}

/// カーソルの画面座標（表示範囲外なら None）
pub fn cursor_screen_position(editor: &CodeEditor, viewport: &Viewport, area: Rect) -> Option<(u16, u16)> {
    let cursor = editor.buffer().cursor();
    if cursor.line < viewport.top_line() || cursor.column < viewport.left_column() {
        return None;
    }

    let row = cursor.line - viewport.top_line();
    if row >= area.height as usize {
        return None;
    }

    let line_text = editor.buffer().lines().into_iter().nth(cursor.line).unwrap_or_default();
    let offset: usize = line_text
        .chars()
        .skip(viewport.left_column())
        .take(cursor.column - viewport.left_column())
        .map(cell_width)
        .sum();

    if offset >= area.width as usize {
        return None;
    }

    Some((area.x + offset as u16, area.y + row as u16))
}

/// ガターとテキストを描画
pub fn render(frame: &mut Frame<'_>, gutter: Rect, text: Rect, editor: &CodeEditor, viewport: &Viewport, theme: &Theme) {
    if gutter.width > 0 {
        let numbers = Paragraph::new(gutter_lines(editor.line_numbers(), viewport))
            .alignment(Alignment::Right)
            .style(theme.style(ComponentType::LineNumber));
        frame.render_widget(numbers, gutter);
    }

    let paragraph = Paragraph::new(visible_lines(editor, viewport, theme)).style(theme.style(ComponentType::TextArea));
    frame.render_widget(paragraph, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::TokenKind;

    fn keyword(start: usize, end: usize) -> SyntaxSpan {
        SyntaxSpan {
            line: 0,
            start_column: start,
            end_column: end,
            kind: TokenKind::Keyword,
        }
    }

    fn content(line: &Line<'_>) -> Vec<String> {
        line.spans.iter().map(|span| span.content.to_string()).collect()
    }

    #[test]
    fn plain_line_is_single_span() {
        let theme = Theme::dark();
        let line = styled_line("x = 1", &[], &[], 0, 80, &theme);
        assert_eq!(content(&line), vec!["x = 1"]);
    }

    #[test]
    fn keyword_and_search_split_spans() {
        let theme = Theme::dark();
        let kw = keyword(0, 3);
        let hl = SearchHighlight {
            line: 0,
            start_column: 4,
            end_column: 5,
        };
        let line = styled_line("def f(): pass", &[&kw], &[&hl], 0, 80, &theme);
        assert_eq!(content(&line), vec!["def", " ", "f", "(): pass"]);
        assert_eq!(line.spans[2].style.bg, theme.style(ComponentType::SearchMatch).bg);
    }

    #[test]
    fn search_overrides_keyword() {
        let theme = Theme::dark();
        let kw = keyword(0, 2);
        let hl = SearchHighlight {
            line: 0,
            start_column: 0,
            end_column: 2,
        };
        let line = styled_line("if x", &[&kw], &[&hl], 0, 80, &theme);
        assert_eq!(line.spans[0].style.fg, theme.style(ComponentType::SearchMatch).fg);
    }

    #[test]
    fn horizontal_scroll_skips_columns() {
        let theme = Theme::dark();
        let line = styled_line("abcdefgh", &[], &[], 3, 2, &theme);
        assert_eq!(content(&line), vec!["de"]);
    }

    #[test]
    fn cursor_stays_on_screen_after_wide_characters() {
        let mut editor = CodeEditor::new(crate::config::EditorConfig::default());
        editor.insert_str("字字字字字字").unwrap();
        let area = Rect::new(0, 0, 8, 4);
        let mut viewport = Viewport::new(4, 8);
        viewport.ensure_cursor_visible(0, 6, &editor.text());

        assert_eq!(viewport.left_column(), 3);
        assert_eq!(cursor_screen_position(&editor, &viewport, area), Some((6, 0)));
    }

    #[test]
    fn gutter_follows_viewport() {
        let mut viewport = Viewport::new(2, 80);
        viewport.ensure_visible(4, 0);
        let lines = gutter_lines(&LineNumbers::for_text("a\nb\nc\nd\ne\nf"), &viewport);
        let labels: Vec<String> = lines.iter().map(|l| l.spans[0].content.to_string()).collect();
        assert_eq!(labels, vec!["4 ", "5 "]);
    }
}
