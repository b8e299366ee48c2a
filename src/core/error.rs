//! Error types for fixture loading and lookups.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use super::fixtures::Collection;
use super::models::{ModuleId, Status};

/// Result type alias for fixture operations.
pub type Result<T> = std::result::Result<T, FixtureError>;

/// Fatal errors raised while loading the fixture set.
#[derive(Error, Debug, Diagnostic)]
pub enum FixtureError {
    #[error("Failed to read {collection} fixture at {path}")]
    #[diagnostic(
        code("KASPARRO::FIXTURE_IO"),
        help("Check `data.fixtures_dir` in config.toml or remove it to use the bundled fixtures")
    )]
    Io {
        collection: Collection,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {collection} fixture: {source}")]
    #[diagnostic(code("KASPARRO::FIXTURE_PARSE"))]
    Parse {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),
}

/// The fixture set parsed but broke one or more invariants.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Fixture validation failed with {} violation(s)", violations.len())]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl Diagnostic for ValidationError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("KASPARRO::FIXTURE_INVALID"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.summary()))
    }
}

impl ValidationError {
    /// One violation per line, for the diagnostic help text.
    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .map(|v| format!("- {v}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn contains(&self, predicate: impl Fn(&Violation) -> bool) -> bool {
        self.violations.iter().any(predicate)
    }
}

/// A single broken invariant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("Module '{module}' declares status '{declared}' but {score}/{max_score} falls in band '{expected}'")]
    StatusBandMismatch {
        module: ModuleId,
        score: u32,
        max_score: u32,
        declared: Status,
        expected: Status,
    },

    #[error("Module '{module}' has maxScore 0")]
    ZeroMaxScore { module: ModuleId },

    #[error("Module '{module}' score {score} exceeds maxScore {max_score}")]
    ScoreAboveMax {
        module: ModuleId,
        score: u32,
        max_score: u32,
    },

    #[error("Recommendation '{recommendation}' in module '{module}' has no action items")]
    EmptyActionItems {
        module: ModuleId,
        recommendation: String,
    },

    #[error("Duplicate id '{id}' in {collection}")]
    DuplicateId { collection: Collection, id: String },

    #[error("Dashboard snapshot references unknown brand '{brand_id}'")]
    UnknownSnapshotBrand { brand_id: String },

    #[error("Dashboard metric {metric} = {value} is outside 0-100")]
    MetricOutOfRange { metric: String, value: u32 },

    #[error("Component '{component}' connects to unknown component '{target}'")]
    DanglingConnection { component: String, target: String },

    #[error("Pipeline stage '{stage}' references unknown component '{component}'")]
    DanglingStageComponent { stage: String, component: String },

    #[error("Pipeline stage order {order} is used more than once")]
    DuplicateStageOrder { order: u32 },

    #[error("Pipeline stage orders are not contiguous from 1: expected {expected}, found {found}")]
    StageOrderGap { expected: u32, found: u32 },
}

/// A selection or id that does not resolve in its collection.
///
/// Never fatal: callers fall back to "no selection" or the first entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No {collection} entry with id '{id}'")]
pub struct LookupMiss {
    pub collection: Collection,
    pub id: String,
}

impl LookupMiss {
    pub fn new(collection: Collection, id: impl fmt::Display) -> Self {
        Self {
            collection,
            id: id.to_string(),
        }
    }
}
