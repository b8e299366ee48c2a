//! ASCII pipeline graph widget for ratatui.
//!
//! Renders the system architecture's component connections with Unicode
//! box-drawing characters. Supports a tree layout (walking connections from
//! the entry components) and a flat adjacency list, with color-coded
//! component types, scroll offset, and selection highlight.

use std::collections::HashSet;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::models::{ComponentStatus, ComponentType, SystemComponent};
use crate::core::presentation::component_color;
use crate::tui::theme;

/// Layout strategy for the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphLayout {
    /// Walk connections from components nothing points to.
    #[default]
    Tree,
    /// Each component followed by its outgoing connections.
    Flat,
}

impl GraphLayout {
    pub fn toggle(self) -> Self {
        match self {
            GraphLayout::Tree => GraphLayout::Flat,
            GraphLayout::Flat => GraphLayout::Tree,
        }
    }
}

fn type_tag(kind: ComponentType) -> &'static str {
    match kind {
        ComponentType::Input => "IN ",
        ComponentType::Processor => "PRC",
        ComponentType::Module => "MOD",
        ComponentType::Output => "OUT",
        ComponentType::Unknown => "---",
    }
}

fn status_dot(status: ComponentStatus) -> (&'static str, Style) {
    match status {
        ComponentStatus::Active => ("●", Style::default().fg(theme::GREEN)),
        ComponentStatus::Processing => ("◐", Style::default().fg(theme::YELLOW)),
        ComponentStatus::Idle => ("○", theme::muted()),
        ComponentStatus::Unknown => ("·", theme::dim()),
    }
}

/// Component connection graph.
///
/// ```ignore
/// let graph = ComponentGraph::new(&architecture.components)
///     .layout(GraphLayout::Tree)
///     .selected(Some("context-pack"))
///     .scroll(0);
/// frame.render_widget(graph, area);
/// ```
pub struct ComponentGraph<'a> {
    components: &'a [SystemComponent],
    selected: Option<&'a str>,
    scroll_offset: usize,
    layout_mode: GraphLayout,
}

impl<'a> ComponentGraph<'a> {
    pub fn new(components: &'a [SystemComponent]) -> Self {
        Self {
            components,
            selected: None,
            scroll_offset: 0,
            layout_mode: GraphLayout::default(),
        }
    }

    pub fn layout(mut self, mode: GraphLayout) -> Self {
        self.layout_mode = mode;
        self
    }

    pub fn selected(mut self, id: Option<&'a str>) -> Self {
        self.selected = id;
        self
    }

    pub fn scroll(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    fn find(&self, id: &str) -> Option<&'a SystemComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Total rendered rows, for clamping scroll in the owning view.
    pub fn line_count(&self) -> usize {
        self.build_lines().len()
    }

    fn build_lines(&self) -> Vec<Line<'static>> {
        match self.layout_mode {
            GraphLayout::Tree => self.build_tree_lines(),
            GraphLayout::Flat => self.build_flat_lines(),
        }
    }

    // ── Tree layout ─────────────────────────────────────────────────────

    /// Components that no other component connects to.
    fn root_ids(&self) -> Vec<&'a str> {
        let targets: HashSet<&str> = self
            .components
            .iter()
            .flat_map(|c| c.connections.iter().map(String::as_str))
            .collect();

        self.components
            .iter()
            .filter(|c| !targets.contains(c.id.as_str()))
            .map(|c| c.id.as_str())
            .collect()
    }

    fn build_tree_lines(&self) -> Vec<Line<'static>> {
        let roots = self.root_ids();
        if roots.is_empty() && !self.components.is_empty() {
            // Every component sits on a cycle; list them instead.
            return self.build_flat_lines();
        }

        let mut lines = Vec::new();
        let mut expanded = HashSet::new();
        for (i, root) in roots.iter().enumerate() {
            let is_last = i == roots.len() - 1;
            self.push_tree_node(root, &mut lines, "", is_last, true, &mut expanded);
        }

        // Cycles no root reaches become roots of their own.
        for component in self.components {
            if !expanded.contains(&component.id) {
                self.push_tree_node(&component.id, &mut lines, "", true, true, &mut expanded);
            }
        }
        lines
    }

    /// A component reached a second time is shown once more but not expanded.
    fn push_tree_node(
        &self,
        id: &str,
        lines: &mut Vec<Line<'static>>,
        prefix: &str,
        is_last: bool,
        is_root: bool,
        expanded: &mut HashSet<String>,
    ) {
        let branch = if is_root {
            String::new()
        } else if is_last {
            format!("{prefix}└── ")
        } else {
            format!("{prefix}├── ")
        };

        let Some(component) = self.find(id) else {
            lines.push(Line::from(vec![
                Span::raw(branch),
                Span::styled(format!("? {id}"), theme::dim()),
            ]));
            return;
        };

        let first_visit = expanded.insert(component.id.clone());
        let mut line = self.node_line(&branch, component);
        if !first_visit && !component.connections.is_empty() {
            line.spans.push(Span::styled(" ↺", theme::dim()));
        }
        lines.push(line);
        if !first_visit {
            return;
        }

        let continuation = if is_root {
            String::new()
        } else if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };

        let count = component.connections.len();
        for (ci, target) in component.connections.iter().enumerate() {
            self.push_tree_node(target, lines, &continuation, ci == count - 1, false, expanded);
        }
    }

    // ── Flat layout ─────────────────────────────────────────────────────

    fn build_flat_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for component in self.components {
            lines.push(self.node_line("", component));

            let count = component.connections.len();
            for (i, target) in component.connections.iter().enumerate() {
                let glyph = if i == count - 1 { "└─▸" } else { "├─▸" };
                let mut spans = vec![Span::styled(format!("    {glyph} "), theme::dim())];
                match self.find(target) {
                    Some(node) => {
                        spans.push(Span::styled(node.name.clone(), theme::muted()));
                        spans.push(Span::styled(
                            format!(" [{}]", type_tag(node.kind).trim_end()),
                            theme::tone(component_color(node.kind)),
                        ));
                    }
                    None => spans.push(Span::styled(target.clone(), theme::dim())),
                }
                lines.push(Line::from(spans));
            }
        }

        lines
    }

    // ── Shared styling ──────────────────────────────────────────────────

    fn node_line(&self, prefix: &str, component: &SystemComponent) -> Line<'static> {
        let is_selected = self.selected == Some(component.id.as_str());
        let label_style = if is_selected {
            theme::highlight()
        } else {
            Style::default().fg(theme::TEXT)
        };
        let indicator = if is_selected { "▸ " } else { "  " };
        let (dot, dot_style) = status_dot(component.status);

        Line::from(vec![
            Span::raw(prefix.to_string()),
            Span::styled(indicator, Style::default().fg(theme::ACCENT)),
            Span::styled(
                format!("[{}] ", type_tag(component.kind)),
                theme::tone(component_color(component.kind)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{dot} "), dot_style),
            Span::styled(component.name.clone(), label_style),
        ])
    }
}

impl Widget for ComponentGraph<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines = self.build_lines();
        let visible_height = area.height as usize;
        let max_offset = lines.len().saturating_sub(visible_height);
        let offset = self.scroll_offset.min(max_offset);

        for (i, line) in lines.iter().skip(offset).take(visible_height).enumerate() {
            let y = area.y + i as u16;
            let mut x = area.x;
            let max_x = area.x + area.width;

            for span in &line.spans {
                if x >= max_x {
                    break;
                }
                let (next_x, _) =
                    buf.set_stringn(x, y, &span.content, (max_x - x) as usize, span.style);
                x = next_x;
            }
        }
    }
}
