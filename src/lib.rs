/// Kasparro - AI-SEO Audit Console (TUI Edition)
///
/// Fixture-backed dashboard for AI-search visibility audits: brand metrics,
/// per-module findings and the audit pipeline architecture.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
