//! Fixture Data Store
//!
//! Loads the four static JSON documents (brands, audit modules, dashboard
//! snapshot, system architecture), validates them, and exposes them as
//! read-only collections for the lifetime of the process.
//!
//! Loading is the only point where malformed data is detected. Once a
//! [`FixtureStore`] exists, downstream code trusts its contents.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use super::error::{FixtureError, LookupMiss, Result};
use super::models::{Architecture, AuditModule, Brand, DashboardSnapshot, ModuleId, SystemComponent};
use super::validation::{self, ValidationWarning};

// ============================================================================
// Collections
// ============================================================================

/// Names of the fixture collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Brands,
    AuditModules,
    DashboardSnapshot,
    SystemArchitecture,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Brands,
        Collection::AuditModules,
        Collection::DashboardSnapshot,
        Collection::SystemArchitecture,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Brands => "brands",
            Self::AuditModules => "audit-modules",
            Self::DashboardSnapshot => "dashboard-snapshot",
            Self::SystemArchitecture => "system-architecture",
        }
    }

    /// File name inside a fixtures directory.
    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.strip_suffix(".json").unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| format!("Unknown fixture collection: {}", s))
    }
}

/// Borrowed, immutable view of one collection.
#[derive(Debug, Clone, Copy)]
pub enum CollectionRef<'a> {
    Brands(&'a [Brand]),
    AuditModules(&'a [AuditModule]),
    DashboardSnapshot(&'a DashboardSnapshot),
    SystemArchitecture(&'a Architecture),
}

impl CollectionRef<'_> {
    pub fn collection(&self) -> Collection {
        match self {
            Self::Brands(_) => Collection::Brands,
            Self::AuditModules(_) => Collection::AuditModules,
            Self::DashboardSnapshot(_) => Collection::DashboardSnapshot,
            Self::SystemArchitecture(_) => Collection::SystemArchitecture,
        }
    }

    /// Number of top-level entries (1 for the single-object documents).
    pub fn len(&self) -> usize {
        match self {
            Self::Brands(brands) => brands.len(),
            Self::AuditModules(modules) => modules.len(),
            Self::DashboardSnapshot(_) | Self::SystemArchitecture(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Sources
// ============================================================================

/// Raw JSON text for the four documents.
#[derive(Debug, Clone)]
pub struct FixtureDocuments {
    pub brands: String,
    pub audit_modules: String,
    pub dashboard_snapshot: String,
    pub system_architecture: String,
}

impl FixtureDocuments {
    /// The fixtures compiled into the binary.
    pub fn bundled() -> Self {
        Self {
            brands: include_str!("../../fixtures/brands.json").to_string(),
            audit_modules: include_str!("../../fixtures/audit-modules.json").to_string(),
            dashboard_snapshot: include_str!("../../fixtures/dashboard-snapshot.json").to_string(),
            system_architecture: include_str!("../../fixtures/system-architecture.json")
                .to_string(),
        }
    }

    /// Read all four documents from a directory.
    pub fn read_dir(dir: &Path) -> Result<Self> {
        let read = |collection: Collection| -> Result<String> {
            let path = dir.join(collection.file_name());
            fs::read_to_string(&path).map_err(|source| FixtureError::Io {
                collection,
                path,
                source,
            })
        };

        Ok(Self {
            brands: read(Collection::Brands)?,
            audit_modules: read(Collection::AuditModules)?,
            dashboard_snapshot: read(Collection::DashboardSnapshot)?,
            system_architecture: read(Collection::SystemArchitecture)?,
        })
    }
}

/// Where the fixture set comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FixtureSource {
    #[default]
    Bundled,
    Directory(PathBuf),
}

impl FixtureSource {
    pub fn from_dir_override(dir: Option<PathBuf>) -> Self {
        dir.map(Self::Directory).unwrap_or_default()
    }
}

impl fmt::Display for FixtureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled => f.write_str("bundled fixtures"),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

// ============================================================================
// Store
// ============================================================================

/// The validated, immutable fixture set.
#[derive(Debug)]
pub struct FixtureStore {
    brands: Vec<Brand>,
    modules: Vec<AuditModule>,
    snapshot: DashboardSnapshot,
    architecture: Architecture,
    /// Component index by id, in document order.
    component_index: IndexMap<String, usize>,
    warnings: Vec<ValidationWarning>,
}

impl FixtureStore {
    /// Load and validate the fixture set.
    pub fn load(source: &FixtureSource) -> Result<Self> {
        let documents = match source {
            FixtureSource::Bundled => FixtureDocuments::bundled(),
            FixtureSource::Directory(dir) => FixtureDocuments::read_dir(dir)?,
        };
        let store = Self::from_documents(&documents)?;
        tracing::info!(
            source = %source,
            brands = store.brands.len(),
            modules = store.modules.len(),
            components = store.architecture.components.len(),
            "Fixture set loaded"
        );
        Ok(store)
    }

    /// Parse and validate already-read documents.
    pub fn from_documents(documents: &FixtureDocuments) -> Result<Self> {
        let brands: Vec<Brand> = parse(Collection::Brands, &documents.brands)?;
        let modules: Vec<AuditModule> = parse(Collection::AuditModules, &documents.audit_modules)?;
        let snapshot: DashboardSnapshot =
            parse(Collection::DashboardSnapshot, &documents.dashboard_snapshot)?;
        let architecture: Architecture =
            parse(Collection::SystemArchitecture, &documents.system_architecture)?;

        let report = validation::validate(&brands, &modules, &snapshot, &architecture)?;
        for warning in &report.warnings {
            tracing::warn!("Fixture warning: {warning}");
        }

        let component_index = architecture
            .components
            .iter()
            .enumerate()
            .map(|(idx, c)| (c.id.clone(), idx))
            .collect();

        Ok(Self {
            brands,
            modules,
            snapshot,
            architecture,
            component_index,
            warnings: report.warnings,
        })
    }

    /// Immutable view of one collection.
    pub fn get(&self, collection: Collection) -> CollectionRef<'_> {
        match collection {
            Collection::Brands => CollectionRef::Brands(&self.brands),
            Collection::AuditModules => CollectionRef::AuditModules(&self.modules),
            Collection::DashboardSnapshot => CollectionRef::DashboardSnapshot(&self.snapshot),
            Collection::SystemArchitecture => {
                CollectionRef::SystemArchitecture(&self.architecture)
            }
        }
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    pub fn modules(&self) -> &[AuditModule] {
        &self.modules
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }

    /// Non-fatal findings from validation.
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    pub fn brand(&self, id: &str) -> std::result::Result<&Brand, LookupMiss> {
        self.brands
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| LookupMiss::new(Collection::Brands, id))
    }

    pub fn module(&self, id: ModuleId) -> std::result::Result<&AuditModule, LookupMiss> {
        self.modules
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| LookupMiss::new(Collection::AuditModules, id))
    }

    pub fn component(&self, id: &str) -> std::result::Result<&SystemComponent, LookupMiss> {
        self.component_index
            .get(id)
            .map(|&idx| &self.architecture.components[idx])
            .ok_or_else(|| LookupMiss::new(Collection::SystemArchitecture, id))
    }

    /// Position of a brand in the collection.
    pub fn brand_position(&self, id: &str) -> Option<usize> {
        self.brands.iter().position(|b| b.id == id)
    }

    pub fn module_position(&self, id: ModuleId) -> Option<usize> {
        self.modules.iter().position(|m| m.id == id)
    }
}

fn parse<T: DeserializeOwned>(collection: Collection, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| FixtureError::Parse { collection, source })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Violation;
    use crate::core::models::{ComponentType, Status};
    use crate::core::presentation::status_band;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn bundled() -> FixtureStore {
        FixtureStore::load(&FixtureSource::Bundled).expect("bundled fixtures must load")
    }

    /// Bundled documents with one document rewritten.
    fn documents_with(collection: Collection, edit: impl FnOnce(&mut Value)) -> FixtureDocuments {
        let mut docs = FixtureDocuments::bundled();
        let text = match collection {
            Collection::Brands => &mut docs.brands,
            Collection::AuditModules => &mut docs.audit_modules,
            Collection::DashboardSnapshot => &mut docs.dashboard_snapshot,
            Collection::SystemArchitecture => &mut docs.system_architecture,
        };
        let mut value: Value = serde_json::from_str(text).unwrap();
        edit(&mut value);
        *text = value.to_string();
        docs
    }

    fn validation_violations(docs: &FixtureDocuments) -> Vec<Violation> {
        match FixtureStore::from_documents(docs) {
            Err(FixtureError::Validation(err)) => err.violations,
            Err(other) => panic!("expected validation error, got {other}"),
            Ok(_) => panic!("expected validation error, got a store"),
        }
    }

    #[test]
    fn test_bundled_fixtures_load() {
        let store = bundled();
        assert!(!store.brands().is_empty());
        assert_eq!(store.modules().len(), ModuleId::ALL.len());
        assert!(store.warnings().is_empty());
    }

    #[test]
    fn test_every_module_status_matches_band() {
        let store = bundled();
        for module in store.modules() {
            assert_eq!(
                status_band(module.score, module.max_score),
                module.status,
                "module {} is out of band",
                module.id
            );
        }
    }

    #[test]
    fn test_get_returns_each_collection() {
        let store = bundled();
        for collection in Collection::ALL {
            let view = store.get(collection);
            assert_eq!(view.collection(), collection);
            assert!(!view.is_empty());
        }
        match store.get(Collection::Brands) {
            CollectionRef::Brands(brands) => assert_eq!(brands.len(), store.brands().len()),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_collection_names_parse() {
        assert_eq!("audit-modules".parse::<Collection>().unwrap(), Collection::AuditModules);
        assert_eq!(
            "system-architecture.json".parse::<Collection>().unwrap(),
            Collection::SystemArchitecture
        );
        assert!("users".parse::<Collection>().is_err());
    }

    #[test]
    fn test_lookups() {
        let store = bundled();
        let first = &store.brands()[0];
        assert_eq!(store.brand(&first.id).unwrap().name, first.name);
        assert!(store.brand("brand-404").is_err());
        assert_eq!(store.module(ModuleId::Citations).unwrap().id, ModuleId::Citations);
        assert_eq!(
            store.component("context-pack").unwrap().kind,
            ComponentType::Processor
        );
        let miss = store.component("nope").unwrap_err();
        assert_eq!(miss.collection, Collection::SystemArchitecture);
    }

    #[test]
    fn test_status_band_mismatch_rejected() {
        let docs = documents_with(Collection::AuditModules, |modules| {
            modules[0]["score"] = json!(35);
        });
        let violations = validation_violations(&docs);
        assert!(violations.iter().any(|v| matches!(
            v,
            Violation::StatusBandMismatch {
                expected: Status::Critical,
                ..
            }
        )));
    }

    #[test]
    fn test_dangling_connection_rejected() {
        let docs = documents_with(Collection::SystemArchitecture, |arch| {
            arch["components"][0]["connections"] = json!(["ghost"]);
        });
        let violations = validation_violations(&docs);
        assert!(violations.iter().any(|v| matches!(
            v,
            Violation::DanglingConnection { target, .. } if target == "ghost"
        )));
    }

    #[test]
    fn test_stage_order_gap_rejected() {
        let docs = documents_with(Collection::SystemArchitecture, |arch| {
            arch["pipeline"]["stages"][1]["order"] = json!(7);
        });
        let violations = validation_violations(&docs);
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::StageOrderGap { .. })));
    }

    #[test]
    fn test_u32_scale_metrics_are_rejected() {
        let docs = documents_with(Collection::DashboardSnapshot, |snapshot| {
            snapshot["aiVisibilityScore"] = json!(4_000_000_000u32);
            snapshot["trustScore"] = json!(4_000_000_000u32);
        });
        let violations = validation_violations(&docs);
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::MetricOutOfRange { .. })));
    }

    #[test]
    fn test_unknown_module_id_is_parse_error() {
        let docs = documents_with(Collection::AuditModules, |modules| {
            modules[0]["id"] = json!("sentiment");
        });
        let err = FixtureStore::from_documents(&docs).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::Parse {
                collection: Collection::AuditModules,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_severity_degrades_instead_of_failing() {
        let docs = documents_with(Collection::AuditModules, |modules| {
            modules[0]["issues"][0]["severity"] = json!("catastrophic");
        });
        let store = FixtureStore::from_documents(&docs).unwrap();
        assert_eq!(
            store.modules()[0].issues[0].severity,
            crate::core::models::Severity::Unknown
        );
    }

    #[test]
    fn test_load_from_directory() {
        let dir = TempDir::new().unwrap();
        let docs = FixtureDocuments::bundled();
        fs::write(dir.path().join("brands.json"), &docs.brands).unwrap();
        fs::write(dir.path().join("audit-modules.json"), &docs.audit_modules).unwrap();
        fs::write(dir.path().join("dashboard-snapshot.json"), &docs.dashboard_snapshot).unwrap();
        fs::write(dir.path().join("system-architecture.json"), &docs.system_architecture).unwrap();

        let store = FixtureStore::load(&FixtureSource::Directory(dir.path().to_path_buf())).unwrap();
        assert_eq!(store.brands().len(), bundled().brands().len());
    }

    #[test]
    fn test_missing_directory_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = FixtureStore::load(&FixtureSource::Directory(dir.path().to_path_buf()))
            .unwrap_err();
        assert!(matches!(
            err,
            FixtureError::Io {
                collection: Collection::Brands,
                ..
            }
        ));
    }

    #[test]
    fn test_source_from_override() {
        assert_eq!(FixtureSource::from_dir_override(None), FixtureSource::Bundled);
        assert_eq!(
            FixtureSource::from_dir_override(Some(PathBuf::from("/tmp/fx"))),
            FixtureSource::Directory(PathBuf::from("/tmp/fx"))
        );
    }
}
