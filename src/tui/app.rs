use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::{mpsc, watch};

use crate::core::selection::{stale_entries, SelectionState};

use super::events::{Action, AppEvent, AreaFocus, Focus, Notification, NotificationLevel};
use super::layout::AppLayout;
use super::services::Services;
use super::sidebar::SidebarState;
use super::theme;
use super::views::architecture::ArchitectureViewState;
use super::views::audit::AuditViewState;
use super::views::dashboard::DashboardViewState;

/// Most notifications on screen at once.
const MAX_NOTIFICATIONS: usize = 3;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Currently focused top-level view.
    pub focus: Focus,
    /// Whether sidebar or main content has input focus.
    pub area_focus: AreaFocus,
    /// Sidebar cursor. Open/closed lives in the selection store.
    pub sidebar: SidebarState,
    pub dashboard: DashboardViewState,
    pub audit: AuditViewState,
    pub architecture: ArchitectureViewState,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for app events queued by views.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Selection changes made by any view.
    selection_rx: watch::Receiver<SelectionState>,
    /// Last selection the views were synced to.
    last_selection: SelectionState,
    services: Services,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        services: Services,
        start: Focus,
    ) -> Self {
        let selection_rx = services.selection.subscribe();
        let last_selection = selection_rx.borrow().clone();
        let mut sidebar = SidebarState::new();
        sidebar.sync_to_focus(start);

        let mut app = Self {
            running: true,
            focus: start,
            area_focus: AreaFocus::Main,
            sidebar,
            dashboard: DashboardViewState::new(),
            audit: AuditViewState::new(),
            architecture: ArchitectureViewState::new(),
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            event_rx,
            selection_rx,
            last_selection,
            services,
        };
        app.on_focus_changed();
        app
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render, select, update, repeat.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }

            self.sync_selection();
        }

        tracing::info!("Event loop stopped");
        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 2: Sidebar input (when focused)
                if self.area_focus == AreaFocus::Sidebar
                    && self.handle_sidebar_input(&crossterm_event)
                {
                    return;
                }

                // Priority 3: Focused view
                if self.dispatch_view_input(&crossterm_event) {
                    return;
                }

                // Priority 4: Global keybindings
                if let Some(action) = self.map_input_to_action(&crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::Notify { message, level } => self.push_notification(message, level),
        }
    }

    /// Dispatch input to the currently focused view. Returns true if consumed.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        match self.focus {
            Focus::Dashboard => self.dashboard.handle_input(event, &self.services),
            Focus::Audit => self.audit.handle_input(event, &self.services),
            Focus::Architecture => self.architecture.handle_input(event, &self.services),
        }
    }

    /// Handle sidebar-specific input. Returns true if consumed.
    fn handle_sidebar_input(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.sidebar.select_next();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.sidebar.select_prev();
                true
            }
            (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char('l')) => {
                let focus = self.sidebar.selected_focus();
                self.handle_action(focus.to_action());
                self.area_focus = AreaFocus::Main;
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('h')) => {
                self.handle_action(Action::CloseSidebar);
                true
            }
            _ => false,
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (*modifiers, *code) {
            (KeyModifiers::CONTROL, KeyCode::Char('b')) => Some(Action::ToggleSidebar),
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Esc => Some(Action::CloseSidebar),
                KeyCode::Tab => Some(Action::TabNext),
                KeyCode::BackTab => Some(Action::TabPrev),
                KeyCode::Char(c) => Focus::ALL
                    .into_iter()
                    .find(|f| f.hotkey() == c)
                    .map(Focus::to_action),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::FocusDashboard => self.set_focus(Focus::Dashboard),
            Action::FocusAudit => self.set_focus(Focus::Audit),
            Action::FocusArchitecture => self.set_focus(Focus::Architecture),
            Action::TabNext => self.set_focus(self.focus.next()),
            Action::TabPrev => self.set_focus(self.focus.prev()),
            Action::ToggleSidebar => {
                self.services.selection.toggle_sidebar();
                if self.services.selection.is_sidebar_open() {
                    self.area_focus = AreaFocus::Sidebar;
                    self.sidebar.sync_to_focus(self.focus);
                } else {
                    self.area_focus = AreaFocus::Main;
                }
            }
            Action::CloseSidebar => {
                self.services.selection.close_sidebar();
                self.area_focus = AreaFocus::Main;
            }
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
        }
    }

    /// Set focus and sync sidebar selection.
    fn set_focus(&mut self, focus: Focus) {
        let changed = self.focus != focus;
        self.focus = focus;
        self.sidebar.sync_to_focus(focus);
        self.area_focus = AreaFocus::Main;
        if changed {
            tracing::debug!(view = focus.label(), "focus changed");
            self.on_focus_changed();
        }
    }

    fn on_focus_changed(&mut self) {
        match self.focus {
            Focus::Dashboard => self.dashboard.load(&self.services),
            Focus::Audit => self.audit.load(&self.services),
            Focus::Architecture => self.architecture.load(&self.services),
        }
    }

    /// Bring views in line with selection writes made since the last call.
    pub fn sync_selection(&mut self) {
        if !self.selection_rx.has_changed().unwrap_or(false) {
            return;
        }
        let current = self.selection_rx.borrow_and_update().clone();

        if current.selected_module != self.last_selection.selected_module
            && self.focus != Focus::Audit
        {
            if let Some(module) = current
                .selected_module
                .and_then(|id| self.services.fixtures.module(id).ok())
            {
                self.push_notification(format!("Module: {}", module.name), NotificationLevel::Info);
            }
        }

        for miss in stale_entries(&self.services.fixtures, &current) {
            self.push_notification(
                format!("Unknown {} '{}', showing first entry", miss.collection, miss.id),
                NotificationLevel::Warning,
            );
        }

        self.dashboard.sync(&current, &self.services);
        self.audit.sync(&current, &self.services);
        self.last_selection = current;
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }
        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: 30,
        });
        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let selection = self.services.selection.snapshot();
        let (layout, visibility) = AppLayout::compute(area, selection.is_sidebar_open);

        if let Some(sidebar_area) = layout.sidebar {
            self.sidebar.render(
                frame,
                sidebar_area,
                visibility,
                self.focus,
                self.area_focus,
                &selection,
            );
        }

        match self.focus {
            Focus::Dashboard => self.dashboard.render(frame, layout.main, &self.services),
            Focus::Audit => self.audit.render(frame, layout.main, &self.services),
            Focus::Architecture => self.architecture.render(frame, layout.main, &self.services),
        }

        self.render_status_bar(frame, layout.status, &selection);

        // Overlays
        self.render_notifications(frame, area);
        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, selection: &SelectionState) {
        let brand = selection
            .selected_brand
            .as_ref()
            .map(|b| b.name.clone())
            .unwrap_or_else(|| "no brand".to_string());
        let module = selection
            .selected_module
            .and_then(|id| self.services.fixtures.module(id).ok())
            .map(|m| m.name.clone())
            .unwrap_or_else(|| "no module".to_string());

        let status = Line::from(vec![
            Span::styled(" KASPARRO ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled(
                self.focus.label(),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled(brand, Style::default().fg(theme::TEXT)),
            Span::raw(" │ "),
            Span::styled(module, theme::muted()),
            Span::raw(" │ "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":nav "),
            Span::styled("Ctrl+B", theme::key_hint()),
            Span::raw(":sidebar "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = (self.notifications.len() as u16).min(area.height);
        let x = area.width.saturating_sub(max_width + 1);
        let notification_area = Rect::new(x, 1.min(area.height), max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::BLUE),
                    NotificationLevel::Warning => ("⚠", theme::YELLOW),
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {prefix} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(n.message.as_str()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme::BG_SURFACE)),
            notification_area,
        );
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = [
            ("Global:", ""),
            ("q / Ctrl+C", "Quit"),
            ("?", "Toggle this help"),
            ("Tab / Shift+Tab", "Next / previous view"),
            ("1-3", "Jump to view by number"),
            ("Ctrl+B", "Open / close sidebar"),
            ("Esc", "Close sidebar"),
            ("", ""),
            ("Sidebar (when focused):", ""),
            ("j/k", "Navigate up/down"),
            ("Enter / l", "Open view"),
            ("h", "Close sidebar"),
            ("", ""),
            ("Dashboard:", ""),
            ("[ / ]", "Previous / next brand"),
            ("", ""),
            ("Audit:", ""),
            ("j/k", "Select module"),
            ("d/u", "Scroll findings"),
            ("g", "Back to top"),
            ("", ""),
            ("Architecture:", ""),
            ("h/l", "Switch pane"),
            ("j/k", "Move component cursor"),
            ("t", "Toggle graph layout"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(" Keybindings", theme::title())),
            Line::raw(""),
        ];

        for (key, desc) in keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(format!("  {key}"), theme::heading())));
            } else {
                lines.push(Line::from(vec![
                    Span::styled(format!("    {key:<18}"), theme::key_hint()),
                    Span::styled(desc, Style::default().fg(theme::TEXT)),
                ]));
            }
        }

        let block = theme::block_focused("Help");
        frame.render_widget(Clear, modal);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .style(Style::default().bg(theme::BG_BASE)),
            modal,
        );
    }
}

/// Rect of `percent_x` by `percent_y` centred in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);

    center
}
