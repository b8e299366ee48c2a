//! Presentation Mapping Rules
//!
//! Pure lookup tables from domain values to display tokens. Every function is
//! total: the `Unknown` variants land in an explicit neutral bucket, so a view
//! always has something to render. Token values are part of the visual
//! contract and must not drift.

use chrono::{DateTime, Duration, Utc};

use super::models::{ComponentType, Impact, InsightType, Priority, Severity, Status};

// ============================================================================
// Tokens
// ============================================================================

/// Abstract color slot. The terminal theme decides the actual RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Green,
    /// Stronger green used for high-impact badges.
    GreenEmphasis,
    Blue,
    Yellow,
    Red,
    Purple,
    Orange,
    Gray,
}

/// Abstract icon slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconToken {
    Alert,
    Info,
    /// Info glyph rendered in the neutral tint.
    InfoNeutral,
    Database,
    Brain,
    Chart,
    File,
    Activity,
}

/// Badge weight for recommendation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeEmphasis {
    Primary,
    Secondary,
}

// ============================================================================
// Score bands
// ============================================================================

/// Band thresholds in percent, highest first.
const BANDS: [(u64, Status); 3] = [
    (80, Status::Excellent),
    (60, Status::Good),
    (40, Status::NeedsImprovement),
];

/// Map a score to its status band.
///
/// `score / max_score * 100` is compared against 80/60/40 using integer
/// cross-multiplication so boundary values are exact. A zero `max_score`
/// has no defined percentage and yields `Unknown`.
pub fn status_band(score: u32, max_score: u32) -> Status {
    if max_score == 0 {
        return Status::Unknown;
    }
    let scaled = u64::from(score) * 100;
    let max = u64::from(max_score);
    BANDS
        .iter()
        .find(|(threshold, _)| scaled >= threshold * max)
        .map(|&(_, status)| status)
        .unwrap_or(Status::Critical)
}

/// Percentage of `max_score`, rounded down. Zero when `max_score` is zero.
pub fn score_percent(score: u32, max_score: u32) -> u32 {
    if max_score == 0 {
        return 0;
    }
    (u64::from(score) * 100 / u64::from(max_score)) as u32
}

// ============================================================================
// Lookup tables
// ============================================================================

pub fn status_to_color(status: Status) -> ColorToken {
    match status {
        Status::Excellent => ColorToken::Green,
        Status::Good => ColorToken::Blue,
        Status::NeedsImprovement => ColorToken::Yellow,
        Status::Critical => ColorToken::Red,
        Status::Unknown => ColorToken::Gray,
    }
}

/// Color for a raw score numeral.
pub fn score_color(score: u32, max_score: u32) -> ColorToken {
    status_to_color(status_band(score, max_score))
}

pub fn severity_to_icon(severity: Severity) -> IconToken {
    match severity {
        Severity::Critical | Severity::High => IconToken::Alert,
        Severity::Medium | Severity::Low => IconToken::Info,
        Severity::Unknown => IconToken::InfoNeutral,
    }
}

/// Tint applied to the severity icon.
pub fn severity_tone(severity: Severity) -> ColorToken {
    match severity {
        Severity::Critical | Severity::High => ColorToken::Red,
        Severity::Medium => ColorToken::Yellow,
        Severity::Low => ColorToken::Blue,
        Severity::Unknown => ColorToken::Gray,
    }
}

pub fn impact_to_color(impact: Impact) -> ColorToken {
    match impact {
        Impact::High => ColorToken::GreenEmphasis,
        Impact::Medium => ColorToken::Blue,
        Impact::Low | Impact::Unknown => ColorToken::Gray,
    }
}

pub fn insight_tone(kind: InsightType) -> ColorToken {
    match kind {
        InsightType::Positive => ColorToken::Green,
        InsightType::Negative => ColorToken::Red,
        InsightType::Neutral | InsightType::Unknown => ColorToken::Blue,
    }
}

pub fn priority_emphasis(priority: Priority) -> BadgeEmphasis {
    match priority {
        Priority::High => BadgeEmphasis::Primary,
        Priority::Medium | Priority::Low | Priority::Unknown => BadgeEmphasis::Secondary,
    }
}

pub fn component_color(kind: ComponentType) -> ColorToken {
    match kind {
        ComponentType::Input => ColorToken::Blue,
        ComponentType::Processor => ColorToken::Purple,
        ComponentType::Module => ColorToken::Green,
        ComponentType::Output => ColorToken::Orange,
        ComponentType::Unknown => ColorToken::Gray,
    }
}

pub fn component_icon(kind: ComponentType) -> IconToken {
    match kind {
        ComponentType::Input => IconToken::Database,
        ComponentType::Processor => IconToken::Brain,
        ComponentType::Module => IconToken::Chart,
        ComponentType::Output => IconToken::File,
        ComponentType::Unknown => IconToken::Activity,
    }
}

pub fn component_layer(kind: ComponentType) -> &'static str {
    match kind {
        ComponentType::Input => "Input Layer",
        ComponentType::Processor => "Processing Layer",
        ComponentType::Module => "Analysis Modules",
        ComponentType::Output => "Output Layer",
        ComponentType::Unknown => "Other",
    }
}

// ============================================================================
// Labels
// ============================================================================

/// Human label, e.g. "needs improvement".
pub fn status_label(status: Status) -> String {
    status.as_str().replacen('-', " ", 1)
}

/// Upper-case headline used on badges, e.g. "NEEDS IMPROVEMENT".
pub fn status_headline(status: Status) -> String {
    status_label(status).to_uppercase()
}

/// Audits run weekly; the next one is due seven days after the last.
pub fn next_audit_date(last: DateTime<Utc>) -> DateTime<Utc> {
    last + Duration::days(7)
}

/// Up to `limit` items plus the number left over.
pub fn connection_preview<T>(connections: &[T], limit: usize) -> (&[T], usize) {
    let shown = connections.len().min(limit);
    (&connections[..shown], connections.len() - shown)
}

// ============================================================================
// Tests
// ============================================================================
