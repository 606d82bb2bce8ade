use ratatui::style::Color;

pub mod app_layout;
pub mod header;
pub mod input_box;
pub mod status_line;
pub mod views;

pub const ACCENT: Color = Color::Yellow;
