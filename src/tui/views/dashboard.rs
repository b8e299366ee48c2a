//! Dashboard: headline metrics for the selected brand.
//!
//! Shows the overall health badge, the three metric cards, audit dates, the
//! weekly trend rows and a per-module score summary. The snapshot document
//! holds a single brand's numbers; it is shown whichever brand is selected.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::super::theme;
use crate::core::models::{Brand, DashboardSnapshot};
use crate::core::presentation::{
    next_audit_date, score_color, status_headline, status_label, status_band,
};
use crate::core::selection::{resolve_brand, SelectionState};
use crate::tui::events::NotificationLevel;
use crate::tui::services::Services;

/// Metric scale for the snapshot numbers.
const METRIC_MAX: u32 = 100;

const DATE_FORMAT: &str = "%b %d, %Y";

// ── State ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct DashboardViewState {
    /// Index of the selected brand in the fixture list, if it is a member.
    brand_index: Option<usize>,
}

impl DashboardViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, services: &Services) {
        self.sync(&services.selection.snapshot(), services);
    }

    /// Follow selection changes made elsewhere.
    pub fn sync(&mut self, selection: &SelectionState, services: &Services) {
        self.brand_index = selection
            .selected_brand
            .as_ref()
            .and_then(|b| services.fixtures.brand_position(&b.id));
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

        let forward = match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char(']')) => true,
            (KeyModifiers::NONE, KeyCode::Char('[')) => false,
            _ => return false,
        };

        let brands = services.fixtures.brands();
        let Some(next) = cycle_brand(brands, self.brand_index, forward) else {
            return true;
        };
        self.brand_index = Some(next);
        let brand = brands[next].clone();
        services.notify(format!("Brand: {}", brand.name), NotificationLevel::Info);
        services.selection.select_brand(Some(brand));
        true
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, services: &Services) {
        let selection = services.selection.snapshot();
        let brand = resolve_brand(&services.fixtures, selection.selected_brand.as_ref());
        let snapshot = services.fixtures.snapshot();

        let [header, cards, dates, body] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .areas(area);

        self.render_header(frame, header, brand, snapshot, services);
        render_metric_cards(frame, cards, snapshot);
        render_dates(frame, dates, snapshot);

        let [trends, modules] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(body);
        render_trends(frame, trends, snapshot);
        render_module_summary(frame, modules, services);
    }

    fn render_header(
        &self,
        frame: &mut Frame,
        area: Rect,
        brand: Option<&Brand>,
        snapshot: &DashboardSnapshot,
        services: &Services,
    ) {
        let block = theme::block_focused("Dashboard");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (name, domain) = brand
            .map(|b| (b.name.as_str(), b.domain.as_str()))
            .unwrap_or(("No brand selected", ""));

        let mut lines = vec![Line::from(vec![
            Span::styled(format!(" {name} "), theme::title()),
            Span::styled(domain.to_string(), theme::muted()),
            Span::raw("  "),
            Span::styled(
                format!(" {} ", status_headline(snapshot.overall_health)),
                theme::status_badge(snapshot.overall_health),
            ),
        ])];

        let shown_for = services
            .fixtures
            .brand(&snapshot.brand_id)
            .map(|b| b.name.as_str())
            .unwrap_or(snapshot.brand_id.as_str());
        let hint = if brand.is_some_and(|b| b.id != snapshot.brand_id) {
            format!(" Snapshot data for {shown_for}  [/] switch brand")
        } else {
            " [/] switch brand".to_string()
        };
        lines.push(Line::from(Span::styled(hint, theme::key_hint())));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Next brand index, wrapping. A selection outside the list starts at the
/// first (forward) or last (backward) brand.
pub fn cycle_brand(brands: &[Brand], current: Option<usize>, forward: bool) -> Option<usize> {
    let len = brands.len();
    if len == 0 {
        return None;
    }
    Some(match (current, forward) {
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
        (None, true) => 0,
        (None, false) => len - 1,
    })
}

/// Horizontal bar of `width` cells filled in proportion to `value / max`.
pub fn bar(value: u32, max: u32, width: usize) -> String {
    if max == 0 || width == 0 {
        return " ".repeat(width);
    }
    let filled = ((value.min(max) as usize) * width) / max as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn render_metric_cards(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let metrics = [
        ("AI Visibility", snapshot.ai_visibility_score),
        ("Trust Score", snapshot.trust_score),
        ("Keyword Coverage", snapshot.keyword_coverage),
    ];
    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);

    for ((label, value), column) in metrics.into_iter().zip(columns.iter()) {
        let block = theme::block_default(label);
        let inner = block.inner(*column);
        frame.render_widget(block, *column);

        let tone = theme::tone(score_color(value, METRIC_MAX));
        let status = status_band(value, METRIC_MAX);
        let bar_width = inner.width.saturating_sub(2) as usize;
        let lines = vec![
            Line::from(vec![
                Span::styled(format!(" {value}"), tone.add_modifier(Modifier::BOLD)),
                Span::styled(format!("/{METRIC_MAX}  "), theme::dim()),
                Span::styled(status_label(status), tone),
            ]),
            Line::from(Span::styled(format!(" {}", bar(value, METRIC_MAX, bar_width)), tone)),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn render_dates(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let block = theme::block_default("Audit Schedule");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let last = snapshot.last_audit_date;
    let line = Line::from(vec![
        Span::styled(" Last audit ", theme::muted()),
        Span::styled(last.format(DATE_FORMAT).to_string(), Style::default().fg(theme::TEXT)),
        Span::raw("   "),
        Span::styled("Next audit ", theme::muted()),
        Span::styled(
            next_audit_date(last).format(DATE_FORMAT).to_string(),
            Style::default().fg(theme::PRIMARY_LIGHT),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_trends(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let block = theme::block_default("Weekly Trends");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if snapshot.trends_data.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("  No trend data", theme::muted()))),
            inner,
        );
        return;
    }

    let bar_width = (inner.width.saturating_sub(12) / 3).saturating_sub(4) as usize;
    let mut lines = vec![Line::from(Span::styled(
        format!(
            " {:<8} {:<w$} {:<w$} {:<w$}",
            "Week",
            "Visibility",
            "Trust",
            "Keywords",
            w = bar_width + 4
        ),
        theme::heading(),
    ))];

    for point in &snapshot.trends_data {
        let mut spans = vec![Span::styled(
            format!(" {:<8} ", point.date.format("%b %d")),
            theme::muted(),
        )];
        for value in [
            point.ai_visibility_score,
            point.trust_score,
            point.keyword_coverage,
        ] {
            let tone = theme::tone(score_color(value, METRIC_MAX));
            spans.push(Span::styled(bar(value, METRIC_MAX, bar_width), tone));
            spans.push(Span::styled(format!("{value:>3} "), tone));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_module_summary(frame: &mut Frame, area: Rect, services: &Services) {
    let block = theme::block_default("Modules");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = services
        .fixtures
        .modules()
        .iter()
        .map(|module| {
            let tone = theme::tone(score_color(module.score, module.max_score));
            Line::from(vec![
                Span::styled(format!(" {:>3} ", module.score), tone.add_modifier(Modifier::BOLD)),
                Span::styled(module.name.clone(), Style::default().fg(theme::TEXT)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

// ── Tests ──────────────────────────────────────────────────────────────────
