//! Fixture invariant checks.
//!
//! Runs once per load. Broken invariants are collected rather than failing
//! fast so a bad fixture set reports every problem in a single diagnostic.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;

use super::error::{ValidationError, Violation};
use super::fixtures::Collection;
use super::models::{Architecture, AuditModule, Brand, DashboardSnapshot};
use super::presentation::status_band;

/// Non-fatal findings. Logged at load and kept on the store.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    /// Trend entries should be chronologically non-decreasing.
    TrendOutOfOrder {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },
    /// Snapshot health disagrees with the band of the mean headline metric.
    HealthDrift {
        declared: super::models::Status,
        mean_band: super::models::Status,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrendOutOfOrder {
                index,
                previous,
                current,
            } => write!(
                f,
                "trend entry {index} ({current}) is earlier than the entry before it ({previous})"
            ),
            Self::HealthDrift {
                declared,
                mean_band,
            } => write!(
                f,
                "overall health '{declared}' differs from mean metric band '{mean_band}'"
            ),
        }
    }
}

/// Outcome of a successful validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub warnings: Vec<ValidationWarning>,
}

/// Check every invariant across the four documents.
pub fn validate(
    brands: &[Brand],
    modules: &[AuditModule],
    snapshot: &DashboardSnapshot,
    architecture: &Architecture,
) -> Result<ValidationReport, ValidationError> {
    let mut violations = Vec::new();
    let mut warnings = Vec::new();

    check_unique(
        Collection::Brands,
        brands.iter().map(|b| b.id.as_str()),
        &mut violations,
    );
    check_modules(modules, &mut violations);
    check_snapshot(brands, snapshot, &mut violations, &mut warnings);
    check_architecture(architecture, &mut violations);

    if violations.is_empty() {
        Ok(ValidationReport { warnings })
    } else {
        Err(ValidationError { violations })
    }
}

fn check_unique<'a>(
    collection: Collection,
    ids: impl Iterator<Item = &'a str>,
    violations: &mut Vec<Violation>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            violations.push(Violation::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
    }
}

/// Band consistency, score range and non-empty action items.
pub fn check_modules(modules: &[AuditModule], violations: &mut Vec<Violation>) {
    check_unique(
        Collection::AuditModules,
        modules.iter().map(|m| m.id.as_str()),
        violations,
    );

    for module in modules {
        if module.max_score == 0 {
            violations.push(Violation::ZeroMaxScore { module: module.id });
            continue;
        }
        if module.score > module.max_score {
            violations.push(Violation::ScoreAboveMax {
                module: module.id,
                score: module.score,
                max_score: module.max_score,
            });
        }

        let expected = status_band(module.score, module.max_score);
        if expected != module.status {
            violations.push(Violation::StatusBandMismatch {
                module: module.id,
                score: module.score,
                max_score: module.max_score,
                declared: module.status,
                expected,
            });
        }

        for rec in module
            .recommendations
            .iter()
            .filter(|r| r.action_items.is_empty())
        {
            violations.push(Violation::EmptyActionItems {
                module: module.id,
                recommendation: rec.id.clone(),
            });
        }
    }
}

fn check_snapshot(
    brands: &[Brand],
    snapshot: &DashboardSnapshot,
    violations: &mut Vec<Violation>,
    warnings: &mut Vec<ValidationWarning>,
) {
    if !brands.iter().any(|b| b.id == snapshot.brand_id) {
        violations.push(Violation::UnknownSnapshotBrand {
            brand_id: snapshot.brand_id.clone(),
        });
    }

    let headline = [
        ("aiVisibilityScore", snapshot.ai_visibility_score),
        ("trustScore", snapshot.trust_score),
        ("keywordCoverage", snapshot.keyword_coverage),
    ];
    let trend_metrics = snapshot.trends_data.iter().flat_map(|t| {
        [
            ("trendsData.aiVisibilityScore", t.ai_visibility_score),
            ("trendsData.trustScore", t.trust_score),
            ("trendsData.keywordCoverage", t.keyword_coverage),
        ]
    });
    for (metric, value) in headline.into_iter().chain(trend_metrics) {
        if value > 100 {
            violations.push(Violation::MetricOutOfRange {
                metric: metric.to_string(),
                value,
            });
        }
    }

    for (index, pair) in snapshot.trends_data.windows(2).enumerate() {
        if pair[1].date < pair[0].date {
            warnings.push(ValidationWarning::TrendOutOfOrder {
                index: index + 1,
                previous: pair[0].date,
                current: pair[1].date,
            });
        }
    }

    let sum: u64 = headline.iter().map(|(_, v)| u64::from(*v)).sum();
    let mean = u32::try_from(sum / headline.len() as u64).unwrap_or(u32::MAX);
    let mean_band = status_band(mean, 100);
    if mean_band != snapshot.overall_health {
        warnings.push(ValidationWarning::HealthDrift {
            declared: snapshot.overall_health,
            mean_band,
        });
    }
}

/// Referential integrity of the component graph and stage ordering.
pub fn check_architecture(architecture: &Architecture, violations: &mut Vec<Violation>) {
    check_unique(
        Collection::SystemArchitecture,
        architecture.components.iter().map(|c| c.id.as_str()),
        violations,
    );

    let ids: HashSet<&str> = architecture
        .components
        .iter()
        .map(|c| c.id.as_str())
        .collect();

    for component in &architecture.components {
        for target in &component.connections {
            if !ids.contains(target.as_str()) {
                violations.push(Violation::DanglingConnection {
                    component: component.id.clone(),
                    target: target.clone(),
                });
            }
        }
    }

    for stage in &architecture.pipeline.stages {
        for component in &stage.components {
            if !ids.contains(component.as_str()) {
                violations.push(Violation::DanglingStageComponent {
                    stage: stage.id.clone(),
                    component: component.clone(),
                });
            }
        }
    }

    check_stage_orders(
        architecture.pipeline.stages.iter().map(|s| s.order),
        violations,
    );
}

/// Orders must be unique and form `1..=n`.
pub fn check_stage_orders(orders: impl Iterator<Item = u32>, violations: &mut Vec<Violation>) {
    let mut orders: Vec<u32> = orders.collect();
    orders.sort_unstable();

    let mut duplicates = HashSet::new();
    for pair in orders.windows(2) {
        if pair[0] == pair[1] && duplicates.insert(pair[0]) {
            violations.push(Violation::DuplicateStageOrder { order: pair[0] });
        }
    }

    orders.dedup();
    if let Some((expected, found)) = (1u32..)
        .zip(orders.iter().copied())
        .find(|(expected, found)| expected != found)
    {
        violations.push(Violation::StageOrderGap { expected, found });
    }
}
