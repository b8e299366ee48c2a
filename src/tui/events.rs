/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// Notification request from a view. `AppState` assigns the id and TTL.
    Notify {
        message: String,
        level: NotificationLevel,
    },
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    FocusDashboard,
    FocusAudit,
    FocusArchitecture,
    TabNext,
    TabPrev,

    // Sidebar
    ToggleSidebar,
    CloseSidebar,

    // Modals
    ShowHelp,
    CloseHelp,

    Quit,
}

/// Which top-level view has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Dashboard,
    Audit,
    Architecture,
}

impl Focus {
    pub const ALL: [Focus; 3] = [Focus::Dashboard, Focus::Audit, Focus::Architecture];

    pub fn label(self) -> &'static str {
        match self {
            Focus::Dashboard => "Dashboard",
            Focus::Audit => "Audit",
            Focus::Architecture => "Architecture",
        }
    }

    /// Single glyph shown in the collapsed sidebar.
    pub fn icon(self) -> &'static str {
        match self {
            Focus::Dashboard => "◫",
            Focus::Audit => "◉",
            Focus::Architecture => "⎔",
        }
    }

    /// Number key that jumps to this view.
    pub fn hotkey(self) -> char {
        match self {
            Focus::Dashboard => '1',
            Focus::Audit => '2',
            Focus::Architecture => '3',
        }
    }

    pub fn to_action(self) -> Action {
        match self {
            Focus::Dashboard => Action::FocusDashboard,
            Focus::Audit => Action::FocusAudit,
            Focus::Architecture => Action::FocusArchitecture,
        }
    }

    pub fn next(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + 1) % Focus::ALL.len()]
    }

    pub fn prev(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + Focus::ALL.len() - 1) % Focus::ALL.len()]
    }
}

impl From<crate::config::StartView> for Focus {
    fn from(view: crate::config::StartView) -> Self {
        use crate::config::StartView;
        match view {
            StartView::Dashboard => Focus::Dashboard,
            StartView::Audit => Focus::Audit,
            StartView::Architecture => Focus::Architecture,
        }
    }
}

/// Whether the sidebar or the main content receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AreaFocus {
    Sidebar,
    #[default]
    Main,
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    /// A selection fell back to the first fixture entry.
    Warning,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}
