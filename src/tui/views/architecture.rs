//! Architecture view: pipeline stages, layered component list and the
//! connection graph.

use std::cell::Cell;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::super::theme;
use super::super::widgets::component_graph::{ComponentGraph, GraphLayout};
use crate::core::fixtures::FixtureStore;
use crate::core::models::{ComponentType, SystemComponent};
use crate::core::presentation::{
    component_color, component_icon, component_layer, connection_preview,
};
use crate::tui::services::Services;

/// Connections listed under each component before "+N more".
const CONNECTION_PREVIEW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Pipeline,
    Components,
    Graph,
}

impl Pane {
    const ALL: [Pane; 3] = [Pane::Pipeline, Pane::Components, Pane::Graph];

    fn next(self) -> Self {
        match self {
            Pane::Pipeline => Pane::Components,
            Pane::Components => Pane::Graph,
            Pane::Graph => Pane::Pipeline,
        }
    }

    fn prev(self) -> Self {
        match self {
            Pane::Pipeline => Pane::Graph,
            Pane::Components => Pane::Pipeline,
            Pane::Graph => Pane::Components,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Pane::Pipeline => "Audit Pipeline",
            Pane::Components => "Components",
            Pane::Graph => "Connections",
        }
    }
}

// ── State ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ArchitectureViewState {
    pane: Pane,
    /// Cursor into `ordered_components`.
    cursor: usize,
    graph_layout: GraphLayout,
    /// Scroll offset of the pipeline or graph pane.
    scroll: usize,
    /// Scroll limit of the pane drawn last.
    max_scroll: Cell<usize>,
}

impl ArchitectureViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, services: &Services) {
        let count = ordered_components(&services.fixtures).len();
        if self.cursor >= count {
            self.cursor = count.saturating_sub(1);
        }
    }

    pub fn pane(&self) -> Pane {
        self.pane
    }

    /// Component under the cursor.
    pub fn selected_component<'a>(&self, fixtures: &'a FixtureStore) -> Option<&'a SystemComponent> {
        ordered_components(fixtures).get(self.cursor).copied()
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

        if *modifiers != KeyModifiers::NONE {
            return false;
        }

        match code {
            KeyCode::Char('l') | KeyCode::Right => {
                self.pane = self.pane.next();
                self.scroll = 0;
                true
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.pane = self.pane.prev();
                self.scroll = 0;
                true
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let count = ordered_components(&services.fixtures).len();
                if self.cursor + 1 < count {
                    self.cursor += 1;
                }
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Char('t') => {
                self.graph_layout = self.graph_layout.toggle();
                self.scroll = 0;
                true
            }
            KeyCode::Char('d') | KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(10).min(self.max_scroll.get());
                true
            }
            KeyCode::Char('u') | KeyCode::PageUp => {
                self.scroll = self.scroll.min(self.max_scroll.get()).saturating_sub(10);
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, services: &Services) {
        let [tabs_area, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(area);
        self.render_tabs(frame, tabs_area);

        match self.pane {
            Pane::Pipeline => self.render_pipeline(frame, body, &services.fixtures),
            Pane::Components => self.render_components(frame, body, &services.fixtures),
            Pane::Graph => self.render_graph(frame, body, &services.fixtures),
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for pane in Pane::ALL {
            let style = if pane == self.pane {
                theme::highlight()
            } else {
                theme::muted()
            };
            spans.push(Span::styled(format!(" {} ", pane.title()), style));
            spans.push(Span::styled("│", theme::dim()));
        }
        spans.push(Span::styled("  h/l switch", theme::key_hint()));
        if self.pane == Pane::Graph {
            spans.push(Span::styled("  t layout", theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_pipeline(&self, frame: &mut Frame, area: Rect, fixtures: &FixtureStore) {
        let block = theme::block_focused(Pane::Pipeline.title());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let stages = fixtures.architecture().pipeline.ordered_stages();
        let mut lines = Vec::new();
        for (i, stage) in stages.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} ", stage.order),
                    Style::default()
                        .fg(theme::BG_BASE)
                        .bg(theme::PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(stage.name.clone(), theme::heading()),
            ]));
            lines.push(Line::from(Span::styled(
                format!("     {}", stage.description),
                theme::muted(),
            )));

            let mut names = vec![Span::raw("     ")];
            for (j, id) in stage.components.iter().enumerate() {
                if j > 0 {
                    names.push(Span::styled(" · ", theme::dim()));
                }
                names.push(match fixtures.component(id) {
                    Ok(c) => Span::styled(c.name.clone(), theme::tone(component_color(c.kind))),
                    Err(_) => Span::styled(id.clone(), theme::dim()),
                });
            }
            lines.push(Line::from(names));

            if i + 1 < stages.len() {
                lines.push(Line::from(Span::styled("     │", theme::dim())));
                lines.push(Line::from(Span::styled("     ▼", theme::dim())));
            }
        }

        if lines.is_empty() {
            lines.push(Line::from(Span::styled("  No pipeline stages", theme::muted())));
        }

        let max_scroll = lines.len().saturating_sub(inner.height as usize);
        self.max_scroll.set(max_scroll);
        let offset = self.scroll.min(max_scroll) as u16;
        frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);
    }

    fn render_components(&self, frame: &mut Frame, area: Rect, fixtures: &FixtureStore) {
        let block = theme::block_focused(Pane::Components.title());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let selected_id = self.selected_component(fixtures).map(|c| c.id.as_str());
        let mut lines = Vec::new();
        let mut cursor_row = 0usize;

        for kind in ComponentType::LAYERS {
            let members: Vec<&SystemComponent> =
                fixtures.architecture().components_of(kind).collect();
            if members.is_empty() {
                continue;
            }
            if !lines.is_empty() {
                lines.push(Line::raw(""));
            }
            lines.push(Line::from(vec![
                Span::styled(format!(" {}", component_layer(kind)), theme::heading()),
                Span::styled(format!(" ({})", members.len()), theme::dim()),
            ]));

            for component in members {
                let is_selected = selected_id == Some(component.id.as_str());
                if is_selected {
                    cursor_row = lines.len();
                }
                lines.extend(component_lines(component, fixtures, is_selected));
            }
        }

        if lines.is_empty() {
            lines.push(Line::from(Span::styled("  No components", theme::muted())));
        }

        // Follows the cursor instead of `scroll`.
        self.max_scroll.set(0);
        let height = inner.height as usize;
        let offset = cursor_row.saturating_sub(height.saturating_sub(4));
        frame.render_widget(Paragraph::new(lines).scroll((offset as u16, 0)), inner);
    }

    fn render_graph(&self, frame: &mut Frame, area: Rect, fixtures: &FixtureStore) {
        let label = match self.graph_layout {
            GraphLayout::Tree => "Connections (tree)",
            GraphLayout::Flat => "Connections (flat)",
        };
        let block = theme::block_focused(label);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let selected_id = self.selected_component(fixtures).map(|c| c.id.as_str());
        let graph = ComponentGraph::new(&fixtures.architecture().components)
            .layout(self.graph_layout)
            .selected(selected_id);
        let max_scroll = graph.line_count().saturating_sub(inner.height as usize);
        self.max_scroll.set(max_scroll);
        frame.render_widget(graph.scroll(self.scroll.min(max_scroll)), inner);
    }
}

/// Components in layer order, the order the component pane lists them.
pub fn ordered_components(fixtures: &FixtureStore) -> Vec<&SystemComponent> {
    ComponentType::LAYERS
        .into_iter()
        .flat_map(|kind| fixtures.architecture().components_of(kind))
        .collect()
}

fn component_lines(
    component: &SystemComponent,
    fixtures: &FixtureStore,
    is_selected: bool,
) -> Vec<Line<'static>> {
    let marker = if is_selected { "▸" } else { " " };
    let name_style = if is_selected {
        theme::highlight()
    } else {
        Style::default().fg(theme::TEXT)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {marker} "), Style::default().fg(theme::ACCENT)),
            Span::styled(
                format!("{} ", theme::icon_glyph(component_icon(component.kind))),
                theme::tone(component_color(component.kind)),
            ),
            Span::styled(component.name.clone(), name_style),
            Span::styled(format!("  {}", component.status), theme::dim()),
        ]),
        Line::from(Span::styled(
            format!("     {}", component.description),
            theme::muted(),
        )),
    ];

    let (shown, rest) = connection_preview(&component.connections, CONNECTION_PREVIEW);
    if !shown.is_empty() {
        let mut spans = vec![Span::styled("     → ", theme::dim())];
        for (i, id) in shown.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(", ", theme::dim()));
            }
            let name = fixtures
                .component(id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|_| id.clone());
            spans.push(Span::styled(name, Style::default().fg(theme::PRIMARY_LIGHT)));
        }
        if rest > 0 {
            spans.push(Span::styled(format!(" +{rest} more"), theme::dim()));
        }
        lines.push(Line::from(spans));
    }

    lines
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::{render_view, test_services};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_pane_cycle() {
        let (services, _rx) = test_services();
        let mut view = ArchitectureViewState::new();
        assert_eq!(view.pane(), Pane::Pipeline);
        view.handle_input(&key(KeyCode::Char('l')), &services);
        assert_eq!(view.pane(), Pane::Components);
        view.handle_input(&key(KeyCode::Right), &services);
        assert_eq!(view.pane(), Pane::Graph);
        view.handle_input(&key(KeyCode::Char('l')), &services);
        assert_eq!(view.pane(), Pane::Pipeline);
        view.handle_input(&key(KeyCode::Char('h')), &services);
        assert_eq!(view.pane(), Pane::Graph);
    }

    #[test]
    fn test_tab_is_not_consumed() {
        let (services, _rx) = test_services();
        let mut view = ArchitectureViewState::new();
        assert!(!view.handle_input(&key(KeyCode::Tab), &services));
    }

    #[test]
    fn test_ordered_components_follow_layers() {
        let (services, _rx) = test_services();
        let ordered = ordered_components(&services.fixtures);
        assert_eq!(ordered.len(), services.fixtures.architecture().components.len());
        let ranks: Vec<usize> = ordered
            .iter()
            .map(|c| ComponentType::LAYERS.iter().position(|k| *k == c.kind).unwrap())
            .collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_cursor_clamped() {
        let (services, _rx) = test_services();
        let mut view = ArchitectureViewState::new();
        view.handle_input(&key(KeyCode::Char('k')), &services);
        assert_eq!(view.cursor, 0);
        let count = ordered_components(&services.fixtures).len();
        for _ in 0..count + 5 {
            view.handle_input(&key(KeyCode::Char('j')), &services);
        }
        assert_eq!(view.cursor, count - 1);
    }

    #[test]
    fn test_toggle_graph_layout() {
        let (services, _rx) = test_services();
        let mut view = ArchitectureViewState::new();
        assert_eq!(view.graph_layout, GraphLayout::Tree);
        view.handle_input(&key(KeyCode::Char('t')), &services);
        assert_eq!(view.graph_layout, GraphLayout::Flat);
    }

    #[test]
    fn test_graph_scroll_stops_at_end() {
        let (services, _rx) = test_services();
        let mut view = ArchitectureViewState::new();
        view.handle_input(&key(KeyCode::Char('h')), &services);
        render_view(100, 8, |frame, area| view.render(frame, area, &services));
        let max = view.max_scroll.get();
        assert!(max > 0);

        for _ in 0..20 {
            view.handle_input(&key(KeyCode::Char('d')), &services);
        }
        assert_eq!(view.scroll, max);
        view.handle_input(&key(KeyCode::Char('u')), &services);
        assert_eq!(view.scroll, max.saturating_sub(10));

        view.handle_input(&key(KeyCode::Char('l')), &services);
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_render_pipeline_in_order() {
        let (services, _rx) = test_services();
        let view = ArchitectureViewState::new();
        let text = render_view(100, 40, |frame, area| view.render(frame, area, &services));
        let stages = services.fixtures.architecture().pipeline.ordered_stages();
        let positions: Vec<usize> = stages
            .iter()
            .map(|s| text.find(&s.name).expect("stage rendered"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_render_components_groups_layers() {
        let (services, _rx) = test_services();
        let mut view = ArchitectureViewState::new();
        view.handle_input(&key(KeyCode::Char('l')), &services);
        let text = render_view(100, 60, |frame, area| view.render(frame, area, &services));
        assert!(text.contains("Input Layer"));
        assert!(text.contains("Analysis Modules"));
        assert!(text.contains("more"));
    }

    #[test]
    fn test_render_graph_pane() {
        let (services, _rx) = test_services();
        let mut view = ArchitectureViewState::new();
        view.handle_input(&key(KeyCode::Char('h')), &services);
        let text = render_view(100, 40, |frame, area| view.render(frame, area, &services));
        assert!(text.contains("Connections (tree)"));
    }
}
