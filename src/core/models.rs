//! Audit Data Model
//!
//! Typed entities for the four fixture documents: brands, audit modules,
//! the dashboard snapshot and the system architecture graph.
//!
//! Field names are camelCase and enum values are the exact strings used in
//! the fixture JSON (`"needs-improvement"`, `"ai-visibility"`, ...), so every
//! known value round-trips unchanged.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Enumerations
// ============================================================================

/// Health status of a module or of the whole dashboard.
///
/// `Unknown` absorbs unrecognised strings so presentation code can fall back
/// to the neutral bucket. Fixture validation rejects it for audit modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Excellent,
    Good,
    NeedsImprovement,
    Critical,
    #[serde(other)]
    Unknown,
}

impl Status {
    pub const KNOWN: [Status; 4] = [
        Status::Excellent,
        Status::Good,
        Status::NeedsImprovement,
        Status::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::NeedsImprovement => "needs-improvement",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
        }
    }
}

/// The seven audit modules. Unlike the value enums there is no fallback
/// variant: a module id the dashboard does not know is a fixture error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleId {
    AiVisibility,
    BrandVoice,
    EeatTrust,
    KeywordCoverage,
    ContentDepth,
    Citations,
    CompetitivePosition,
}

impl ModuleId {
    pub const ALL: [ModuleId; 7] = [
        ModuleId::AiVisibility,
        ModuleId::BrandVoice,
        ModuleId::EeatTrust,
        ModuleId::KeywordCoverage,
        ModuleId::ContentDepth,
        ModuleId::Citations,
        ModuleId::CompetitivePosition,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AiVisibility => "ai-visibility",
            Self::BrandVoice => "brand-voice",
            Self::EeatTrust => "eeat-trust",
            Self::KeywordCoverage => "keyword-coverage",
            Self::ContentDepth => "content-depth",
            Self::Citations => "citations",
            Self::CompetitivePosition => "competitive-position",
        }
    }
}

impl FromStr for ModuleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("Unknown audit module: {}", s))
    }
}

/// Tone of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Positive,
    Neutral,
    Negative,
    #[serde(other)]
    Unknown,
}

/// Expected impact of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

/// Issue severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

/// Recommendation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

/// Role of a component in the audit pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Input,
    Processor,
    Module,
    Output,
    #[serde(other)]
    Unknown,
}

impl ComponentType {
    /// Layer order used when grouping components.
    pub const LAYERS: [ComponentType; 4] = [
        ComponentType::Input,
        ComponentType::Processor,
        ComponentType::Module,
        ComponentType::Output,
    ];
}

/// Runtime status shown on a component card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Active,
    Processing,
    Idle,
    #[serde(other)]
    Unknown,
}

macro_rules! lowercase_names {
    ($($ty:ident { $($variant:ident => $name:literal),+ $(,)? })+) => {
        $(
            impl $ty {
                pub fn as_str(self) -> &'static str {
                    match self {
                        $(Self::$variant => $name,)+
                        Self::Unknown => "unknown",
                    }
                }
            }

            impl From<&str> for $ty {
                /// Lenient parse: anything unrecognised becomes `Unknown`.
                fn from(s: &str) -> Self {
                    match s {
                        $($name => Self::$variant,)+
                        _ => Self::Unknown,
                    }
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

lowercase_names! {
    InsightType { Positive => "positive", Neutral => "neutral", Negative => "negative" }
    Impact { High => "high", Medium => "medium", Low => "low" }
    Severity { Critical => "critical", High => "high", Medium => "medium", Low => "low" }
    Priority { High => "high", Medium => "medium", Low => "low" }
    ComponentType { Input => "input", Processor => "processor", Module => "module", Output => "output" }
    ComponentStatus { Active => "active", Processing => "processing", Idle => "idle" }
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        Status::KNOWN
            .into_iter()
            .find(|status| status.as_str() == s)
            .unwrap_or(Status::Unknown)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Brands
// ============================================================================

/// A brand under audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Audit Modules
// ============================================================================

/// One audit module with its findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditModule {
    pub id: ModuleId,
    pub name: String,
    pub description: String,
    pub score: u32,
    pub max_score: u32,
    pub status: Status,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: InsightType,
    pub impact: Impact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_urls: Option<Vec<String>>,
}

impl Issue {
    /// Affected URLs, empty when the fixture omits the list.
    pub fn urls(&self) -> &[String] {
        self.affected_urls.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub estimated_impact: String,
    pub action_items: Vec<String>,
}

// ============================================================================
// Dashboard Snapshot
// ============================================================================

/// Headline metrics for one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub brand_id: String,
    pub ai_visibility_score: u32,
    pub trust_score: u32,
    pub keyword_coverage: u32,
    pub last_audit_date: DateTime<Utc>,
    pub overall_health: Status,
    #[serde(default)]
    pub trends_data: Vec<TrendPoint>,
}

/// One point of the metrics time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub ai_visibility_score: u32,
    pub trust_score: u32,
    pub keyword_coverage: u32,
}

// ============================================================================
// System Architecture
// ============================================================================

/// A node of the audit pipeline graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemComponent {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub description: String,
    #[serde(default)]
    pub connections: Vec<String>,
    pub status: ComponentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStage {
    pub id: String,
    pub name: String,
    pub description: String,
    pub components: Vec<String>,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuditPipeline {
    pub stages: Vec<PipelineStage>,
}

impl AuditPipeline {
    /// Stages sorted by `order`.
    pub fn ordered_stages(&self) -> Vec<&PipelineStage> {
        let mut stages: Vec<&PipelineStage> = self.stages.iter().collect();
        stages.sort_by_key(|s| s.order);
        stages
    }
}

/// The `{components, pipeline}` architecture document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Architecture {
    pub components: Vec<SystemComponent>,
    pub pipeline: AuditPipeline,
}

impl Architecture {
    pub fn components_of(&self, kind: ComponentType) -> impl Iterator<Item = &SystemComponent> {
        self.components.iter().filter(move |c| c.kind == kind)
    }
}

// ============================================================================
// Tests
// ============================================================================
