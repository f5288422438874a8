//! UIモジュール
//!
//! ratatuiベースのターミナルUI機能

pub mod layout;
pub mod menu;
pub mod popup;
pub mod renderer;
pub mod text_area;
pub mod theme;
pub mod viewport;

// 公開API
pub use layout::{centered_rect, AppLayout};
pub use menu::{Menu, MenuBar, MenuItem, MenuResponse};
pub use popup::OutputWindow;
pub use renderer::{RenderState, Renderer};
pub use theme::{ComponentType, Theme};
pub use viewport::Viewport;
