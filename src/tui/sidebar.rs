//! Collapsible left sidebar: navigation plus the active brand.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::selection::SelectionState;

use super::events::{AreaFocus, Focus};
use super::layout::SidebarVisibility;
use super::theme;

/// Sidebar cursor. Open/closed lives in the selection store.
#[derive(Debug, Default)]
pub struct SidebarState {
    /// Currently highlighted item index (into Focus::ALL).
    pub selected: usize,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % Focus::ALL.len();
    }

    pub fn select_prev(&mut self) {
        if self.selected == 0 {
            self.selected = Focus::ALL.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn selected_focus(&self) -> Focus {
        Focus::ALL[self.selected]
    }

    /// Sync the cursor to the active focus (e.g., after Tab navigation).
    pub fn sync_to_focus(&mut self, focus: Focus) {
        if let Some(idx) = Focus::ALL.iter().position(|&f| f == focus) {
            self.selected = idx;
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        visibility: SidebarVisibility,
        current_focus: Focus,
        area_focus: AreaFocus,
        selection: &SelectionState,
    ) {
        let lines = match visibility {
            SidebarVisibility::Hidden => return,
            SidebarVisibility::Collapsed => self.collapsed_lines(area, current_focus),
            SidebarVisibility::Expanded => {
                self.expanded_lines(area, current_focus, area_focus, selection)
            }
        };

        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme::BG_SURFACE)),
            area,
        );
    }

    fn collapsed_lines(&self, area: Rect, current_focus: Focus) -> Vec<Line<'static>> {
        Focus::ALL
            .iter()
            .take(area.height as usize)
            .map(|&view| {
                let style = if view == current_focus {
                    theme::highlight()
                } else {
                    theme::muted()
                };
                Line::from(Span::styled(format!(" {}", view.icon()), style))
            })
            .collect()
    }

    fn expanded_lines(
        &self,
        area: Rect,
        current_focus: Focus,
        area_focus: AreaFocus,
        selection: &SelectionState,
    ) -> Vec<Line<'static>> {
        let sidebar_focused = area_focus == AreaFocus::Sidebar;
        let width = area.width as usize;

        let mut lines = vec![
            Line::from(Span::styled(" KASPARRO", theme::title())),
            Line::raw(""),
            Line::from(Span::styled(" Navigate", theme::heading())),
        ];

        for (idx, &view) in Focus::ALL.iter().enumerate() {
            let is_current = view == current_focus;
            let is_selected = sidebar_focused && idx == self.selected;

            let (prefix, style) = match (is_selected, is_current) {
                (true, true) => ("▸ ", theme::highlight()),
                (true, false) => (
                    "▸ ",
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                ),
                (false, true) => ("  ", theme::highlight()),
                (false, false) => ("  ", theme::muted()),
            };

            let label = format!("{prefix}{} {} [{}]", view.icon(), view.label(), view.hotkey());
            lines.push(Line::from(Span::styled(
                format!("{:<width$}", label, width = width),
                style,
            )));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(" Brand", theme::heading())));
        match &selection.selected_brand {
            Some(brand) => {
                lines.push(Line::from(Span::styled(
                    format!("  {}", brand.name),
                    Style::default().fg(theme::TEXT),
                )));
                lines.push(Line::from(Span::styled(
                    format!("  {}", brand.domain),
                    theme::dim(),
                )));
            }
            None => lines.push(Line::from(Span::styled("  none selected", theme::dim()))),
        }

        if let Some(module) = selection.selected_module {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(" Module", theme::heading())));
            lines.push(Line::from(Span::styled(
                format!("  {module}"),
                Style::default().fg(theme::TEXT),
            )));
        }

        lines.truncate(area.height as usize);
        lines
    }
}
