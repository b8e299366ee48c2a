//! Integration tests for the bundled fixture set.
//!
//! These load the four JSON documents through the public API exactly as the
//! binary does at startup, then check the cross-document invariants and the
//! directory source.
//!
//! ```bash
//! cargo test --test fixture_integrity
//! ```

use std::fs;

use kasparro::core::error::{FixtureError, Violation};
use kasparro::core::fixtures::{Collection, FixtureDocuments, FixtureSource, FixtureStore};
use kasparro::core::models::{ModuleId, Status};
use kasparro::core::presentation::{next_audit_date, status_band};
use kasparro::core::selection::{resolve_module, SelectionStore};
use tempfile::TempDir;

fn bundled() -> FixtureStore {
    FixtureStore::load(&FixtureSource::Bundled).expect("bundled fixtures must validate")
}

fn write_documents(dir: &TempDir, documents: &FixtureDocuments) {
    let contents = [
        (Collection::Brands, &documents.brands),
        (Collection::AuditModules, &documents.audit_modules),
        (Collection::DashboardSnapshot, &documents.dashboard_snapshot),
        (Collection::SystemArchitecture, &documents.system_architecture),
    ];
    for (collection, text) in contents {
        fs::write(dir.path().join(collection.file_name()), text).unwrap();
    }
}

// ============================================================================
// Bundled set
// ============================================================================

#[test]
fn bundled_fixtures_have_no_warnings() {
    let store = bundled();
    assert!(store.warnings().is_empty(), "{:?}", store.warnings());
}

#[test]
fn every_module_status_matches_its_band() {
    for module in bundled().modules() {
        assert_eq!(
            status_band(module.score, module.max_score),
            module.status,
            "{}",
            module.id
        );
    }
}

#[test]
fn every_module_id_is_present_once() {
    let store = bundled();
    for id in ModuleId::ALL {
        assert!(store.module(id).is_ok(), "missing {id}");
    }
    assert_eq!(store.modules().len(), ModuleId::ALL.len());
}

#[test]
fn connections_and_stage_members_resolve() {
    let store = bundled();
    let architecture = store.architecture();
    for component in &architecture.components {
        for target in &component.connections {
            assert!(store.component(target).is_ok(), "{} -> {target}", component.id);
        }
    }
    for stage in &architecture.pipeline.stages {
        for member in &stage.components {
            assert!(store.component(member).is_ok(), "{} has {member}", stage.id);
        }
    }
}

#[test]
fn stage_orders_are_contiguous_from_one() {
    let store = bundled();
    let orders: Vec<u32> = store
        .architecture()
        .pipeline
        .ordered_stages()
        .iter()
        .map(|s| s.order)
        .collect();
    let expected: Vec<u32> = (1..=orders.len() as u32).collect();
    assert_eq!(orders, expected);
}

#[test]
fn snapshot_belongs_to_a_known_brand() {
    let store = bundled();
    let snapshot = store.snapshot();
    assert!(store.brand(&snapshot.brand_id).is_ok());
    assert_eq!(snapshot.overall_health, Status::Good);
    assert_eq!(
        next_audit_date(snapshot.last_audit_date).format("%b %d, %Y").to_string(),
        "Nov 22, 2024"
    );
}

#[test]
fn store_seeds_selection_with_first_brand() {
    let store = bundled();
    let selection = SelectionStore::from_fixtures(&store);
    let snapshot = selection.snapshot();
    assert_eq!(
        snapshot.selected_brand.as_ref().map(|b| b.id.as_str()),
        Some(store.brands()[0].id.as_str())
    );
    assert!(snapshot.selected_module.is_none());
    assert!(snapshot.is_sidebar_open);

    let resolved = resolve_module(&store, snapshot.selected_module).unwrap();
    assert_eq!(resolved.id, store.modules()[0].id);
}

// ============================================================================
// Directory source
// ============================================================================

#[test]
fn directory_source_matches_bundled() {
    let dir = TempDir::new().unwrap();
    write_documents(&dir, &FixtureDocuments::bundled());

    let from_dir = FixtureStore::load(&FixtureSource::Directory(dir.path().to_path_buf())).unwrap();
    let bundled = bundled();
    assert_eq!(from_dir.brands(), bundled.brands());
    assert_eq!(from_dir.modules(), bundled.modules());
    assert_eq!(from_dir.architecture(), bundled.architecture());
}

#[test]
fn missing_document_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = FixtureStore::load(&FixtureSource::Directory(dir.path().to_path_buf())).unwrap_err();
    assert!(matches!(
        err,
        FixtureError::Io {
            collection: Collection::Brands,
            ..
        }
    ));
}

#[test]
fn malformed_document_is_a_parse_error() {
    let mut documents = FixtureDocuments::bundled();
    documents.dashboard_snapshot = "{ not json".to_string();
    let err = FixtureStore::from_documents(&documents).unwrap_err();
    assert!(matches!(
        err,
        FixtureError::Parse {
            collection: Collection::DashboardSnapshot,
            ..
        }
    ));
}

#[test]
fn band_mismatch_blocks_loading() {
    let mut documents = FixtureDocuments::bundled();
    documents.audit_modules = documents
        .audit_modules
        .replacen("\"status\": \"critical\"", "\"status\": \"excellent\"", 1);
    let err = FixtureStore::from_documents(&documents).unwrap_err();
    let FixtureError::Validation(validation) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert!(validation.contains(|v| matches!(v, Violation::StatusBandMismatch { .. })));
}
