//! Root layout computation for sidebar + main content + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the expanded sidebar (labels plus the brand block).
pub const SIDEBAR_EXPANDED_WIDTH: u16 = 24;
/// Width of the collapsed sidebar (single-char icons).
pub const SIDEBAR_COLLAPSED_WIDTH: u16 = 3;
/// Auto-collapse sidebar below this terminal width.
pub const AUTO_COLLAPSE_THRESHOLD: u16 = 70;
/// Hide sidebar entirely below this terminal width.
pub const HIDE_SIDEBAR_THRESHOLD: u16 = 30;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Sidebar area (None if hidden).
    pub sidebar: Option<Rect>,
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarVisibility {
    Expanded,
    Collapsed,
    Hidden,
}

impl SidebarVisibility {
    /// Effective visibility for a terminal width and the stored open flag.
    ///
    /// A closed sidebar keeps its icon rail so navigation stays discoverable.
    pub fn resolve(width: u16, sidebar_open: bool) -> Self {
        if width < HIDE_SIDEBAR_THRESHOLD {
            SidebarVisibility::Hidden
        } else if !sidebar_open || width < AUTO_COLLAPSE_THRESHOLD {
            SidebarVisibility::Collapsed
        } else {
            SidebarVisibility::Expanded
        }
    }
}

impl AppLayout {
    /// Compute layout regions from the terminal area and the selection
    /// store's sidebar flag.
    pub fn compute(area: Rect, sidebar_open: bool) -> (Self, SidebarVisibility) {
        let visibility = SidebarVisibility::resolve(area.width, sidebar_open);

        let [content_area, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        let sidebar_width = match visibility {
            SidebarVisibility::Hidden => None,
            SidebarVisibility::Collapsed => Some(SIDEBAR_COLLAPSED_WIDTH),
            SidebarVisibility::Expanded => Some(SIDEBAR_EXPANDED_WIDTH),
        };

        let (sidebar, main) = match sidebar_width {
            None => (None, content_area),
            Some(width) => {
                let [side, main] =
                    Layout::horizontal([Constraint::Length(width), Constraint::Min(1)])
                        .areas(content_area);
                (Some(side), main)
            }
        };

        (AppLayout { sidebar, main, status }, visibility)
    }
}
