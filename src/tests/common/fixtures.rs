//! Test Fixtures
//!
//! Small, valid model values for unit tests that should not depend on the
//! bundled JSON documents.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::core::models::{
    Architecture, AuditModule, AuditPipeline, Brand, ComponentStatus, ComponentType,
    DashboardSnapshot, Impact, Insight, InsightType, Issue, ModuleId, PipelineStage, Priority,
    Recommendation, Severity, Status, SystemComponent, TrendPoint,
};

// =============================================================================
// Brands
// =============================================================================

/// Three brands; the first is always `brand-001` "Acme Analytics".
pub fn sample_brands() -> Vec<Brand> {
    [
        ("brand-001", "Acme Analytics", "acmeanalytics.com"),
        ("brand-002", "Northwind Outfitters", "northwindoutfitters.com"),
        ("brand-003", "Lumen Health", "lumenhealth.io"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (id, name, domain))| Brand {
        id: id.to_string(),
        name: name.to_string(),
        domain: domain.to_string(),
        logo: None,
        created_at: Utc
            .with_ymd_and_hms(2024, 1 + i as u32, 10, 12, 0, 0)
            .unwrap(),
    })
    .collect()
}

// =============================================================================
// Audit Modules
// =============================================================================

/// A module with one insight, one issue (with an affected URL) and one
/// recommendation carrying action items.
pub fn sample_module(id: ModuleId, score: u32, max_score: u32, status: Status) -> AuditModule {
    AuditModule {
        id,
        name: format!("{id} module"),
        description: "Sample module for tests".to_string(),
        score,
        max_score,
        status,
        insights: vec![Insight {
            id: format!("{id}-insight-1"),
            title: "Mentioned in answer engines".to_string(),
            description: "The brand appears in generated answers.".to_string(),
            kind: InsightType::Positive,
            impact: Impact::High,
        }],
        issues: vec![Issue {
            id: format!("{id}-issue-1"),
            title: "Pricing page lacks citations".to_string(),
            description: "No third-party sources back the pricing claims.".to_string(),
            severity: Severity::High,
            category: "Sourcing".to_string(),
            affected_urls: Some(vec!["https://example.com/pricing".to_string()]),
        }],
        recommendations: vec![Recommendation {
            id: format!("{id}-rec-1"),
            title: "Add authoritative references".to_string(),
            description: "Link industry reports from key pages.".to_string(),
            priority: Priority::High,
            estimated_impact: "+10 points".to_string(),
            action_items: vec![
                "Collect three industry reports".to_string(),
                "Cite them on the pricing page".to_string(),
            ],
        }],
        last_updated: Utc.with_ymd_and_hms(2024, 11, 15, 9, 30, 0).unwrap(),
    }
}

// =============================================================================
// Dashboard Snapshot
// =============================================================================

/// Snapshot for `brand_id` with three ascending weekly trend points.
pub fn sample_snapshot(brand_id: &str) -> DashboardSnapshot {
    let start = NaiveDate::from_ymd_opt(2024, 10, 25).unwrap();
    let trends_data = (0..3u32)
        .map(|week| TrendPoint {
            date: start + chrono::Duration::weeks(week as i64),
            ai_visibility_score: 60 + week * 4,
            trust_score: 50 + week * 3,
            keyword_coverage: 55 + week * 3,
        })
        .collect();

    DashboardSnapshot {
        brand_id: brand_id.to_string(),
        ai_visibility_score: 72,
        trust_score: 58,
        keyword_coverage: 64,
        last_audit_date: Utc.with_ymd_and_hms(2024, 11, 15, 9, 30, 0).unwrap(),
        overall_health: Status::Good,
        trends_data,
    }
}

// =============================================================================
// Architecture
// =============================================================================

fn component(id: &str, kind: ComponentType, connections: &[&str]) -> SystemComponent {
    SystemComponent {
        id: id.to_string(),
        name: id.replace('-', " "),
        kind,
        description: format!("{id} component"),
        connections: connections.iter().map(|c| c.to_string()).collect(),
        status: ComponentStatus::Active,
    }
}

/// A valid four-component chain with two ordered stages.
pub fn sample_architecture() -> Architecture {
    Architecture {
        components: vec![
            component("crawler", ComponentType::Input, &["context"]),
            component("context", ComponentType::Processor, &["scoring"]),
            component("scoring", ComponentType::Module, &["report"]),
            component("report", ComponentType::Output, &[]),
        ],
        pipeline: AuditPipeline {
            stages: vec![
                PipelineStage {
                    id: "collect".to_string(),
                    name: "Collect".to_string(),
                    description: "Gather brand signals".to_string(),
                    components: vec!["crawler".to_string(), "context".to_string()],
                    order: 1,
                },
                PipelineStage {
                    id: "analyze".to_string(),
                    name: "Analyze".to_string(),
                    description: "Score and report".to_string(),
                    components: vec!["scoring".to_string(), "report".to_string()],
                    order: 2,
                },
            ],
        },
    }
}
