//! 画面描画
//!
//! 1フレーム分の状態を受け取り、タイトル・メニュー・エディタ・ステータス・
//! ミニバッファ・ポップアップの順に描画する

use crate::editor::CodeEditor;
use crate::error::{ErrorDialog, ErrorLevel};
use crate::minibuffer::PromptManager;
use crate::ui::layout::{centered_rect, AppLayout};
use crate::ui::menu::MenuBar;
use crate::ui::popup::OutputWindow;
use crate::ui::text_area;
use crate::ui::theme::{ComponentType, Theme};
use crate::ui::viewport::Viewport;
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// 1フレームの描画に必要な状態
pub struct RenderState<'a> {
    pub editor: &'a CodeEditor,
    pub viewport: &'a mut Viewport,
    pub menu: &'a MenuBar,
    pub prompt: &'a PromptManager,
    pub output: Option<&'a OutputWindow>,
    pub dialog: Option<&'a ErrorDialog>,
    pub status: Option<&'a str>,
}

/// レンダラー
#[derive(Debug, Default)]
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// 1フレーム描画
    pub fn draw(&self, frame: &mut Frame<'_>, state: RenderState<'_>) {
        let editor = state.editor;
        let gutter_digits = editor
            .config()
            .variant
            .shows_line_numbers()
            .then(|| editor.line_numbers().digits());
        let layout = AppLayout::calculate(frame.area(), gutter_digits);

        let cursor = editor.buffer().cursor();
        state
            .viewport
            .set_dimensions(layout.text.height as usize, layout.text.width as usize);
        let cursor_line = editor.buffer().lines().into_iter().nth(cursor.line).unwrap_or_default();
        state
            .viewport
            .ensure_cursor_visible(cursor.line, cursor.column, &cursor_line);

        self.render_title(frame, layout.title, editor);
        self.render_menu_bar(frame, layout.menu, state.menu);
        text_area::render(frame, layout.gutter, layout.text, editor, state.viewport, &self.theme);
        self.render_status_line(frame, layout.status, editor, state.status);
        let prompt_cursor = self.render_minibuffer(frame, layout.minibuffer, state.prompt);

        if state.menu.is_open() {
            self.render_menu_dropdown(frame, layout.menu, state.menu);
        }

        let popup_open = state.output.is_some() || state.dialog.is_some();
        if let Some(output) = state.output {
            self.render_output(frame, output);
        }
        if let Some(dialog) = state.dialog {
            self.render_dialog(frame, dialog);
        }

        let cursor_position = if popup_open || state.menu.is_open() {
            None
        } else if state.prompt.is_active() {
            prompt_cursor
        } else {
            text_area::cursor_screen_position(editor, state.viewport, layout.text)
        };

        if let Some((x, y)) = cursor_position {
            frame.set_cursor_position(Position::new(x, y));
        }
    }

    fn render_title(&self, frame: &mut Frame<'_>, area: Rect, editor: &CodeEditor) {
        let marker = if editor.is_modified() { " *" } else { "" };
        let title = Paragraph::new(format!(" {}{}", editor.title(), marker))
            .style(self.theme.style(ComponentType::TitleBar));
        frame.render_widget(title, area);
    }

    /// メニューラベルの開始列
    fn menu_label_offsets(menu: &MenuBar) -> Vec<u16> {
        let mut offsets = Vec::with_capacity(menu.menus().len());
        let mut x = 1u16;
        for item in menu.menus() {
            offsets.push(x);
            x += item.label.width() as u16 + 3;
        }
        offsets
    }

    fn render_menu_bar(&self, frame: &mut Frame<'_>, area: Rect, menu: &MenuBar) {
        let normal = self.theme.style(ComponentType::MenuBar);
        let selected = self.theme.style(ComponentType::MenuSelected);

        let mut spans = vec![Span::styled(" ", normal)];
        for (idx, item) in menu.menus().iter().enumerate() {
            let style = if menu.is_open() && idx == menu.selected_menu() {
                selected
            } else {
                normal
            };
            spans.push(Span::styled(format!(" {} ", item.label), style));
            spans.push(Span::styled(" ", normal));
        }
        if !menu.is_open() {
            spans.push(Span::styled(" F10: menu", normal));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(normal), area);
    }

    fn render_menu_dropdown(&self, frame: &mut Frame<'_>, bar: Rect, menu: &MenuBar) {
        let Some(current) = menu.menus().get(menu.selected_menu()) else {
            return;
        };
        let offsets = Self::menu_label_offsets(menu);
        let x = bar.x + offsets.get(menu.selected_menu()).copied().unwrap_or(1);

        let inner_width = current
            .items
            .iter()
            .map(|item| item.label.width() + item.shortcut.width() + 4)
            .max()
            .unwrap_or(10);

        let screen = frame.area();
        let width = (inner_width as u16 + 2).min(screen.width.saturating_sub(x));
        let height = (current.items.len() as u16 + 2).min(screen.height.saturating_sub(bar.y + 1));
        let area = Rect::new(x, bar.y + 1, width, height);

        let lines: Vec<Line<'static>> = current
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let padding = inner_width.saturating_sub(item.label.width() + item.shortcut.width() + 2);
                let text = format!(" {}{}{} ", item.label, " ".repeat(padding), item.shortcut);
                let style = if idx == menu.selected_item() {
                    self.theme.style(ComponentType::MenuSelected)
                } else {
                    self.theme.style(ComponentType::MenuBar)
                };
                Line::from(Span::styled(text, style))
            })
            .collect();

        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.style(ComponentType::PopupBorder));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_status_line(&self, frame: &mut Frame<'_>, area: Rect, editor: &CodeEditor, message: Option<&str>) {
        let cursor = editor.buffer().cursor();
        let mut text = format!(
            " Ln {}, Col {}  Lines: {}",
            cursor.line + 1,
            cursor.column + 1,
            editor.buffer().line_count()
        );
        if let Some(query) = editor.last_search_query() {
            if !editor.search_highlights().is_empty() {
                text.push_str(&format!("  Search: \"{}\"", query));
            }
        }
        if let Some(message) = message {
            text.push_str("  ");
            text.push_str(message);
        }

        let paragraph = Paragraph::new(text).style(self.theme.style(ComponentType::StatusLine));
        frame.render_widget(paragraph, area);
    }

    /// ミニバッファ描画（プロンプト中はカーソル位置を返す）
    fn render_minibuffer(&self, frame: &mut Frame<'_>, area: Rect, prompt: &PromptManager) -> Option<(u16, u16)> {
        frame.render_widget(Clear, area);
        let Some(kind) = prompt.kind() else {
            frame.render_widget(Paragraph::new("").style(self.theme.style(ComponentType::Minibuffer)), area);
            return None;
        };

        let mut spans = vec![
            Span::styled(kind.label().to_string(), Style::default().fg(Color::Cyan)),
            Span::raw(prompt.input().to_string()),
        ];
        if !prompt.candidates().is_empty() {
            spans.push(Span::styled(
                format!("  [{}]", prompt.candidates().join(" ")),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).style(self.theme.style(ComponentType::Minibuffer));
        frame.render_widget(paragraph, area);

        let column = (kind.label().width() + prompt.input().width()).min(area.width.saturating_sub(1) as usize);
        Some((area.x + column as u16, area.y))
    }

    fn render_output(&self, frame: &mut Frame<'_>, output: &OutputWindow) {
        let area = centered_rect(frame.area(), 80, 70);
        let lines: Vec<Line<'static>> = output
            .lines()
            .iter()
            .skip(output.scroll())
            .map(|line| Line::from(line.clone()))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", output.title()))
            .title_bottom(" Esc/Enter: close  Up/Down: scroll ")
            .border_style(self.theme.style(ComponentType::PopupBorder));

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .style(self.theme.style(ComponentType::TextArea)),
            area,
        );
    }

    fn render_dialog(&self, frame: &mut Frame<'_>, dialog: &ErrorDialog) {
        let area = centered_rect(frame.area(), 60, 30);
        let border = match dialog.level {
            ErrorLevel::Warning => self.theme.style(ComponentType::PopupBorder),
            ErrorLevel::Error | ErrorLevel::Fatal => self.theme.style(ComponentType::Error),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", dialog.title))
            .title_bottom(" Enter: OK ")
            .border_style(border);

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(dialog.message.clone())
                .block(block)
                .wrap(Wrap { trim: true })
                .style(self.theme.style(ComponentType::TextArea)),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::minibuffer::PromptKind;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
    }

    fn draw(editor: &CodeEditor, prompt: &PromptManager, menu: &MenuBar) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let mut viewport = Viewport::default();
        let renderer = Renderer::default();
        terminal
            .draw(|frame| {
                renderer.draw(
                    frame,
                    RenderState {
                        editor,
                        viewport: &mut viewport,
                        menu,
                        prompt,
                        output: None,
                        dialog: None,
                        status: Some("ready"),
                    },
                )
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn draws_title_menu_and_gutter() {
        let mut editor = CodeEditor::new(EditorConfig::default());
        editor.insert_str("import os\nx = 1").unwrap();
        let menu = MenuBar::for_variant(editor.config().variant);
        let buffer = draw(&editor, &PromptManager::new(), &menu);

        assert!(row(&buffer, 0).contains("Advanced Code Editor *"));
        assert!(row(&buffer, 1).contains("File"));
        assert!(row(&buffer, 1).contains("Run"));
        assert!(row(&buffer, 2).contains("1 import os"));
        assert!(row(&buffer, 3).contains("2 x = 1"));
        assert!(row(&buffer, 10).contains("ready"));
    }

    #[test]
    fn simple_variant_has_no_gutter() {
        let mut editor = CodeEditor::new(EditorConfig::simple());
        editor.insert_str("hello").unwrap();
        let menu = MenuBar::for_variant(editor.config().variant);
        let buffer = draw(&editor, &PromptManager::new(), &menu);

        assert!(row(&buffer, 0).contains("Simple Editor"));
        assert!(row(&buffer, 2).starts_with("hello"));
        assert!(!row(&buffer, 1).contains("Run"));
    }

    #[test]
    fn prompt_is_shown_in_minibuffer() {
        let editor = CodeEditor::new(EditorConfig::default());
        let mut prompt = PromptManager::new();
        prompt.start(PromptKind::Search, "def");
        let menu = MenuBar::for_variant(editor.config().variant);
        let buffer = draw(&editor, &prompt, &menu);

        assert!(row(&buffer, 11).starts_with("Search: def"));
    }
}
