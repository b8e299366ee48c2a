//! Common Test Utilities
//!
//! Shared helpers used across test modules:
//! - Hand-built model values (`fixtures`)
//! - A `Services` handle over the bundled fixtures
//! - Rendering a view into plain text through ratatui's `TestBackend`

pub mod fixtures;

use ratatui::{backend::TestBackend, layout::Rect, text::Line, Frame, Terminal};
use tokio::sync::mpsc;

use crate::core::fixtures::{FixtureSource, FixtureStore};
use crate::tui::events::AppEvent;
use crate::tui::services::Services;

/// Services over the bundled fixtures, plus the receiving end of its event
/// channel so notifications can be inspected.
pub fn test_services() -> (Services, mpsc::UnboundedReceiver<AppEvent>) {
    let fixtures = FixtureStore::load(&FixtureSource::Bundled).expect("bundled fixtures load");
    let (tx, rx) = mpsc::unbounded_channel();
    (Services::new(fixtures, tx), rx)
}

/// Draw into a `width` x `height` test terminal and return the buffer rows
/// joined by newlines.
pub fn render_view(width: u16, height: u16, draw: impl FnOnce(&mut Frame, Rect)) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    let mut draw = Some(draw);
    terminal
        .draw(|frame| {
            let area = frame.area();
            if let Some(draw) = draw.take() {
                draw(frame, area);
            }
        })
        .expect("draw");

    let buffer = terminal.backend().buffer().clone();
    buffer
        .content()
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain text of styled lines, one per row.
pub fn lines_text(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
