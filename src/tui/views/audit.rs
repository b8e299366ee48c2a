//! Audit viewer: module list plus the findings of the selected module.
//!
//! Moving the list cursor writes the module selection to the shared store, so
//! the status bar and sidebar follow along.

use std::cell::Cell;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::super::theme;
use crate::core::models::{AuditModule, ModuleId};
use crate::core::presentation::{
    impact_to_color, insight_tone, priority_emphasis, score_color, score_percent,
    severity_to_icon, severity_tone, status_headline,
};
use crate::core::selection::{resolve_module, SelectionState};
use crate::tui::services::Services;

/// Rows moved by `d` / `u`.
const PAGE: u16 = 10;

// ── State ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct AuditViewState {
    /// Cursor into the fixture module list.
    cursor: usize,
    /// Detail pane scroll offset.
    scroll: u16,
    /// Wrapped detail height minus the viewport, as of the last render.
    max_scroll: Cell<u16>,
}

impl AuditViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Align the cursor with the store and make sure a module is selected.
    pub fn load(&mut self, services: &Services) {
        self.sync(&services.selection.snapshot(), services);
        if services.selection.selected_module().is_none() {
            if let Some(first) = services.fixtures.modules().first() {
                services.selection.select_module(Some(first.id));
            }
        }
    }

    pub fn sync(&mut self, selection: &SelectionState, services: &Services) {
        let position = selection
            .selected_module
            .and_then(|id| services.fixtures.module_position(id));
        if let Some(position) = position {
            if position != self.cursor {
                self.cursor = position;
                self.scroll = 0;
            }
        }
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) = event
        else {
            return false;
        };

        let count = services.fixtures.modules().len();
        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                if count > 0 {
                    self.move_to((self.cursor + 1).min(count - 1), services);
                }
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.move_to(self.cursor.saturating_sub(1), services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Enter) => {
                self.move_to(self.cursor, services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('d') | KeyCode::PageDown) => {
                self.scroll = self.scroll.saturating_add(PAGE).min(self.max_scroll.get());
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('u') | KeyCode::PageUp) => {
                self.scroll = self.scroll.min(self.max_scroll.get()).saturating_sub(PAGE);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('g')) => {
                self.scroll = 0;
                true
            }
            _ => false,
        }
    }

    fn move_to(&mut self, index: usize, services: &Services) {
        let Some(module) = services.fixtures.modules().get(index) else {
            return;
        };
        if index != self.cursor {
            self.scroll = 0;
        }
        self.cursor = index;
        services.selection.select_module(Some(module.id));
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, services: &Services) {
        let [list_area, detail_area] =
            Layout::horizontal([Constraint::Length(30), Constraint::Min(20)]).areas(area);

        let selected = services.selection.selected_module();
        self.render_list(frame, list_area, services, selected);

        let block = theme::block_focused("Findings");
        let inner = block.inner(detail_area);
        frame.render_widget(block, detail_area);

        match resolve_module(&services.fixtures, selected) {
            Some(module) => {
                let paragraph = Paragraph::new(detail_lines(module)).wrap(Wrap { trim: false });
                let rows = u16::try_from(paragraph.line_count(inner.width)).unwrap_or(u16::MAX);
                let max_scroll = rows.saturating_sub(inner.height);
                self.max_scroll.set(max_scroll);
                frame.render_widget(paragraph.scroll((self.scroll.min(max_scroll), 0)), inner);
            }
            None => {
                self.max_scroll.set(0);
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        "  No audit modules loaded",
                        theme::muted(),
                    ))),
                    inner,
                );
            }
        }
    }

    fn render_list(
        &self,
        frame: &mut Frame,
        area: Rect,
        services: &Services,
        selected: Option<ModuleId>,
    ) {
        let block = theme::block_default("Modules");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let name_width = inner.width.saturating_sub(8) as usize;
        let lines: Vec<Line> = services
            .fixtures
            .modules()
            .iter()
            .enumerate()
            .map(|(i, module)| {
                let is_cursor = i == self.cursor;
                let is_selected = selected == Some(module.id);
                let marker = if is_cursor { "▸" } else { " " };
                let name_style = if is_selected {
                    theme::highlight()
                } else {
                    Style::default().fg(theme::TEXT)
                };
                let name: String = module.name.chars().take(name_width).collect();
                Line::from(vec![
                    Span::styled(format!("{marker} "), Style::default().fg(theme::ACCENT)),
                    Span::styled(format!("{name:<name_width$}"), name_style),
                    Span::styled(
                        format!(" {:>3}", module.score),
                        theme::tone(score_color(module.score, module.max_score))
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Full detail text for one module.
pub fn detail_lines(module: &AuditModule) -> Vec<Line<'static>> {
    let score_tone = theme::tone(score_color(module.score, module.max_score));
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", module.name), theme::title()),
            Span::styled(
                format!(" {} ", status_headline(module.status)),
                theme::status_badge(module.status),
            ),
        ]),
        Line::from(Span::styled(format!(" {}", module.description), theme::muted())),
        Line::from(vec![
            Span::styled(
                format!(" {}/{}", module.score, module.max_score),
                score_tone.add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({}%)", score_percent(module.score, module.max_score)),
                score_tone,
            ),
            Span::styled(
                format!("  updated {}", module.last_updated.format("%b %d, %Y %H:%M")),
                theme::dim(),
            ),
        ]),
        Line::raw(""),
    ];

    section(&mut lines, "Insights", module.insights.len());
    for insight in &module.insights {
        lines.push(Line::from(vec![
            Span::styled(" ● ", theme::tone(insight_tone(insight.kind))),
            Span::styled(insight.title.clone(), Style::default().fg(theme::TEXT)),
            Span::raw(" "),
            Span::styled(
                format!(" {} impact ", insight.impact),
                theme::badge(impact_to_color(insight.impact)),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", insight.description),
            theme::muted(),
        )));
    }

    section(&mut lines, "Issues", module.issues.len());
    for issue in &module.issues {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", theme::icon_glyph(severity_to_icon(issue.severity))),
                theme::tone(severity_tone(issue.severity)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(issue.title.clone(), Style::default().fg(theme::TEXT)),
            Span::styled(
                format!("  {} · {}", issue.severity, issue.category),
                theme::dim(),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", issue.description),
            theme::muted(),
        )));
        for url in issue.urls() {
            lines.push(Line::from(Span::styled(
                format!("   ↳ {url}"),
                Style::default().fg(theme::BLUE),
            )));
        }
    }

    section(&mut lines, "Recommendations", module.recommendations.len());
    for rec in &module.recommendations {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", rec.priority.as_str().to_uppercase()),
                theme::priority_badge(priority_emphasis(rec.priority)),
            ),
            Span::raw(" "),
            Span::styled(rec.title.clone(), Style::default().fg(theme::TEXT)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", rec.description),
            theme::muted(),
        )));
        lines.push(Line::from(vec![
            Span::styled("   Impact: ", theme::dim()),
            Span::styled(rec.estimated_impact.clone(), Style::default().fg(theme::GREEN)),
        ]));
        for item in &rec.action_items {
            lines.push(Line::from(Span::styled(
                format!("   □ {item}"),
                Style::default().fg(theme::TEXT),
            )));
        }
    }

    lines
}

fn section(lines: &mut Vec<Line<'static>>, title: &str, count: usize) {
    if lines.last().is_some_and(|l| l.width() > 0) {
        lines.push(Line::raw(""));
    }
    lines.push(Line::from(vec![
        Span::styled(format!(" {title}"), theme::heading()),
        Span::styled(format!(" ({count})"), theme::dim()),
    ]));
    if count == 0 {
        lines.push(Line::from(Span::styled("   none", theme::dim())));
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
