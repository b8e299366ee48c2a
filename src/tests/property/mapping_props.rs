//! Property-based tests for the presentation lookups
//!
//! Tests invariants:
//! - Lenient parsing never panics and round-trips known names
//! - Unrecognised strings fall into the neutral bucket of every lookup

use proptest::prelude::*;

use crate::core::models::{ComponentType, Impact, InsightType, Priority, Severity, Status};
use crate::core::presentation::{
    component_color, component_icon, component_layer, impact_to_color, insight_tone,
    priority_emphasis, severity_to_icon, status_to_color, BadgeEmphasis, ColorToken, IconToken,
};

/// Strings that are not one of the lowercase names used by the documents.
fn unrecognised() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z ]{0,12}|[0-9]{1,4}|"
}

proptest! {
    #[test]
    fn unknown_strings_degrade(s in unrecognised()) {
        prop_assert_eq!(Status::from(s.as_str()), Status::Unknown);
        prop_assert_eq!(status_to_color(Status::from(s.as_str())), ColorToken::Gray);

        prop_assert_eq!(severity_to_icon(Severity::from(s.as_str())), IconToken::InfoNeutral);
        prop_assert_eq!(impact_to_color(Impact::from(s.as_str())), ColorToken::Gray);
        prop_assert_eq!(insight_tone(InsightType::from(s.as_str())), ColorToken::Blue);
        prop_assert_eq!(priority_emphasis(Priority::from(s.as_str())), BadgeEmphasis::Secondary);

        let kind = ComponentType::from(s.as_str());
        prop_assert_eq!(component_color(kind), ColorToken::Gray);
        prop_assert_eq!(component_icon(kind), IconToken::Activity);
        prop_assert_eq!(component_layer(kind), "Other");
    }

    #[test]
    fn known_names_round_trip(idx in 0usize..4) {
        let status = Status::KNOWN[idx];
        prop_assert_eq!(Status::from(status.as_str()), status);

        let kind = ComponentType::LAYERS[idx];
        prop_assert_eq!(ComponentType::from(kind.as_str()), kind);
        prop_assert_ne!(component_layer(kind), "Other");
    }

    #[test]
    fn status_color_is_stable(idx in 0usize..4) {
        let status = Status::KNOWN[idx];
        prop_assert_eq!(status_to_color(status), status_to_color(status));
        prop_assert_ne!(status_to_color(status), ColorToken::Gray);
    }
}
