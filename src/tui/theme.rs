//! Centralized Indigo & Amber color theme for the Kasparro TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals, and domain tokens from
//! `core::presentation` are resolved to concrete colors and glyphs here.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::models::Status;
use crate::core::presentation::{status_to_color, BadgeEmphasis, ColorToken, IconToken};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Indigo: primary accent, focused borders.
pub const PRIMARY: Color = Color::Rgb(0x5C, 0x6B, 0xC0);
/// Light indigo: hints, secondary focus.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x9F, 0xA8, 0xDA);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Amber: selection, brand badge.
pub const ACCENT: Color = Color::Rgb(0xFF, 0xB3, 0x00);

// ── Backgrounds ─────────────────────────────────────────────────────────────

pub const BG_BASE: Color = Color::Rgb(0x10, 0x12, 0x1C);
/// Surface: elevated panels, sidebar.
pub const BG_SURFACE: Color = Color::Rgb(0x1A, 0x1D, 0x2B);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
pub const TEXT_MUTED: Color = Color::Rgb(0x8A, 0x8F, 0xA3);
pub const TEXT_DIM: Color = Color::Rgb(0x52, 0x56, 0x68);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const GREEN: Color = Color::Rgb(0x66, 0xBB, 0x6A);
/// High-impact badges.
pub const GREEN_STRONG: Color = Color::Rgb(0x2E, 0xD5, 0x73);
pub const BLUE: Color = Color::Rgb(0x42, 0xA5, 0xF5);
pub const YELLOW: Color = Color::Rgb(0xFF, 0xD5, 0x4F);
pub const RED: Color = Color::Rgb(0xEF, 0x53, 0x50);
pub const PURPLE: Color = Color::Rgb(0xAB, 0x47, 0xBC);
pub const ORANGE: Color = Color::Rgb(0xFF, 0x8A, 0x3D);
pub const GRAY: Color = Color::Rgb(0x9E, 0x9E, 0x9E);

// ── Token resolution ────────────────────────────────────────────────────────

pub fn color(token: ColorToken) -> Color {
    match token {
        ColorToken::Green => GREEN,
        ColorToken::GreenEmphasis => GREEN_STRONG,
        ColorToken::Blue => BLUE,
        ColorToken::Yellow => YELLOW,
        ColorToken::Red => RED,
        ColorToken::Purple => PURPLE,
        ColorToken::Orange => ORANGE,
        ColorToken::Gray => GRAY,
    }
}

pub fn icon_glyph(token: IconToken) -> &'static str {
    match token {
        IconToken::Alert => "▲",
        IconToken::Info | IconToken::InfoNeutral => "●",
        IconToken::Database => "⛁",
        IconToken::Brain => "✱",
        IconToken::Chart => "▥",
        IconToken::File => "▤",
        IconToken::Activity => "∿",
    }
}

/// Foreground style for a token.
pub fn tone(token: ColorToken) -> Style {
    Style::default().fg(color(token))
}

/// Filled badge for a status, e.g. ` NEEDS IMPROVEMENT `.
pub fn status_badge(status: Status) -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(color(status_to_color(status)))
        .add_modifier(Modifier::BOLD)
}

/// Filled badge in a token color.
pub fn badge(token: ColorToken) -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(color(token))
        .add_modifier(Modifier::BOLD)
}

pub fn priority_badge(emphasis: BadgeEmphasis) -> Style {
    match emphasis {
        BadgeEmphasis::Primary => Style::default()
            .fg(BG_BASE)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD),
        BadgeEmphasis::Secondary => Style::default().fg(TEXT).bg(TEXT_DIM),
    }
}

// ── Style helpers ───────────────────────────────────────────────────────────

/// Bold accent text (titles, active items).
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Section header style.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY_LIGHT).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "[q]:quit").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}

pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_default())
}
