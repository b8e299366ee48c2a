//! Selection Store
//!
//! Shared UI state: the selected brand, the selected audit module and sidebar
//! visibility. Views hold a clone of [`SelectionStore`] and mutate only through
//! its operations; every clone and every subscriber sees every write.

use std::sync::Arc;

use tokio::sync::watch;

use super::error::LookupMiss;
use super::fixtures::FixtureStore;
use super::models::{AuditModule, Brand, ModuleId};

/// Current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub selected_brand: Option<Brand>,
    pub selected_module: Option<ModuleId>,
    pub is_sidebar_open: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected_brand: None,
            selected_module: None,
            is_sidebar_open: true,
        }
    }
}

/// Handle to the process-wide selection state.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    tx: Arc<watch::Sender<SelectionState>>,
}

impl SelectionStore {
    pub fn new(initial_brand: Option<Brand>) -> Self {
        let (tx, _rx) = watch::channel(SelectionState {
            selected_brand: initial_brand,
            ..SelectionState::default()
        });
        Self { tx: Arc::new(tx) }
    }

    /// Store seeded with the first brand of the fixture set.
    pub fn from_fixtures(fixtures: &FixtureStore) -> Self {
        Self::new(fixtures.brands().first().cloned())
    }

    /// Replace the selected brand. Membership is not checked.
    pub fn select_brand(&self, brand: Option<Brand>) {
        tracing::debug!(brand = ?brand.as_ref().map(|b| b.id.as_str()), "select_brand");
        self.tx.send_modify(|state| state.selected_brand = brand);
    }

    pub fn select_module(&self, module: Option<ModuleId>) {
        tracing::debug!(module = ?module, "select_module");
        self.tx.send_modify(|state| state.selected_module = module);
    }

    pub fn toggle_sidebar(&self) {
        self.tx
            .send_modify(|state| state.is_sidebar_open = !state.is_sidebar_open);
    }

    /// Force the sidebar closed. Subscribers are only woken on a change.
    pub fn close_sidebar(&self) {
        self.tx.send_if_modified(|state| {
            let was_open = state.is_sidebar_open;
            state.is_sidebar_open = false;
            was_open
        });
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SelectionState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.tx.subscribe()
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.tx.borrow().is_sidebar_open
    }

    pub fn selected_module(&self) -> Option<ModuleId> {
        self.tx.borrow().selected_module
    }

    pub fn selected_brand(&self) -> Option<Brand> {
        self.tx.borrow().selected_brand.clone()
    }
}

/// Module to show for a selection, falling back to the first module.
///
/// Called on every frame, so a selected id missing from the fixtures is
/// quietly treated as no selection. See [`stale_entries`] for reporting.
pub fn resolve_module(
    fixtures: &FixtureStore,
    selected: Option<ModuleId>,
) -> Option<&AuditModule> {
    selected
        .and_then(|id| fixtures.module(id).ok())
        .or_else(|| fixtures.modules().first())
}

/// Fixture entry for the selected brand, falling back to the first brand.
pub fn resolve_brand<'a>(fixtures: &'a FixtureStore, selected: Option<&Brand>) -> Option<&'a Brand> {
    selected
        .and_then(|brand| fixtures.brand(&brand.id).ok())
        .or_else(|| fixtures.brands().first())
}

/// Parts of `state` that do not resolve in `fixtures`.
///
/// Meant to run once per selection change; each miss is logged here.
pub fn stale_entries(fixtures: &FixtureStore, state: &SelectionState) -> Vec<LookupMiss> {
    let brand = state
        .selected_brand
        .as_ref()
        .and_then(|brand| fixtures.brand(&brand.id).err());
    let module = state
        .selected_module
        .and_then(|id| fixtures.module(id).err());

    let misses: Vec<LookupMiss> = brand.into_iter().chain(module).collect();
    for miss in &misses {
        tracing::warn!(collection = %miss.collection, id = %miss.id, "Stale selection, falling back");
    }
    misses
}
