use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::fixtures::FixtureStore;
use crate::core::selection::SelectionStore;

use super::events::{AppEvent, NotificationLevel};

/// Centralized handle to the fixture data and shared selection state.
///
/// Created once at startup, then passed by reference to views. The fixture
/// store is immutable; all writes go through `selection`.
#[derive(Clone)]
pub struct Services {
    pub fixtures: Arc<FixtureStore>,
    pub selection: SelectionStore,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    /// Seed the selection store from the loaded fixtures.
    pub fn new(fixtures: FixtureStore, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        let selection = SelectionStore::from_fixtures(&fixtures);
        log::info!(
            "Services ready: {} brands, {} modules",
            fixtures.brands().len(),
            fixtures.modules().len()
        );
        Self {
            fixtures: Arc::new(fixtures),
            selection,
            event_tx,
        }
    }

    /// Queue a notification for the overlay.
    pub fn notify(&self, message: impl Into<String>, level: NotificationLevel) {
        let _ = self.event_tx.send(AppEvent::Notify {
            message: message.into(),
            level,
        });
    }
}
