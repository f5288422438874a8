//! 画面レイアウト
//!
//! タイトルバー・メニューバー・エディタ（行番号ガター + テキスト）・ステータスライン・ミニバッファ

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// ガター右側の余白
const GUTTER_PADDING: u16 = 2;
/// ガターの最小桁数
const GUTTER_MIN_DIGITS: usize = 4;

/// アプリケーション全体のレイアウト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLayout {
    pub title: Rect,
    pub menu: Rect,
    /// 行番号ガター（非表示なら幅0）
    pub gutter: Rect,
    pub text: Rect,
    pub status: Rect,
    pub minibuffer: Rect,
}

impl AppLayout {
    /// 画面全体からレイアウトを計算
    pub fn calculate(area: Rect, gutter_digits: Option<usize>) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let gutter_width = gutter_digits
            .map(|digits| digits.max(GUTTER_MIN_DIGITS) as u16 + GUTTER_PADDING)
            .unwrap_or(0)
            .min(rows[2].width);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(gutter_width), Constraint::Min(0)])
            .split(rows[2]);

        Self {
            title: rows[0],
            menu: rows[1],
            gutter: columns[0],
            text: columns[1],
            status: rows[3],
            minibuffer: rows[4],
        }
    }
}

/// 画面中央に配置するポップアップ領域
pub fn centered_rect(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let width = (area.width as u32 * width_percent.min(100) as u32 / 100) as u16;
    let height = (area.height as u32 * height_percent.min(100) as u32 / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
