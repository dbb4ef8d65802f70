//! Property tests for the declaration vocabulary
//!
//! - Identifier parsing agrees with the documented patterns
//! - Route parsing is total over well-formed inputs and preserves the
//!   declared string
//! - Scope templates survive serde round-trips

use proptest::prelude::*;

use portico_core::identity::{ApiName, ApiVersion};
use portico_core::route::RoutePattern;
use portico_core::scope::ScopeTemplate;
use portico_core::stability::Stability;

proptest! {
    #[test]
    fn generated_service_names_parse(name in "[a-z][a-z0-9_-]{0,30}") {
        let parsed = ApiName::parse(&name);
        prop_assert!(parsed.is_ok());
        let parsed = parsed.unwrap();
        prop_assert_eq!(parsed.as_str(), name.as_str());
    }

    #[test]
    fn names_with_a_bad_leading_character_fail(name in "[A-Z0-9_-][a-z0-9_-]{0,30}") {
        prop_assert!(ApiName::parse(&name).is_err());
    }

    #[test]
    fn generated_versions_parse(digits in "[0-9]{1,6}") {
        let version = format!("v{digits}");
        prop_assert!(ApiVersion::parse(&version).is_ok());
    }

    #[test]
    fn generated_routes_parse_and_keep_their_text(
        segments in prop::collection::vec("[a-z]{1,8}", 1..5),
        params in prop::collection::vec("[a-zA-Z_][a-zA-Z0-9_]{0,8}", 0..3),
    ) {
        // Interleave literal segments and placeholders.
        let mut route = String::new();
        for (index, segment) in segments.iter().enumerate() {
            route.push('/');
            route.push_str(segment);
            if let Some(param) = params.get(index) {
                route.push_str("/:");
                route.push_str(param);
            }
        }
        let parsed = RoutePattern::parse(&route);
        prop_assert!(parsed.is_ok(), "route {} should parse", route);
        let parsed = parsed.unwrap();
        prop_assert_eq!(parsed.as_str(), route.as_str());
        prop_assert_eq!(
            parsed.placeholders().count(),
            params.len().min(segments.len())
        );
    }

    #[test]
    fn dnf_templates_round_trip_through_json(
        groups in prop::collection::vec(
            prop::collection::vec("[a-z]{1,6}(:[a-z]{1,6}){0,2}", 1..4),
            1..4,
        )
    ) {
        let template = ScopeTemplate::dnf(groups);
        prop_assert!(template.check_shape().is_ok());
        let json = serde_json::to_value(&template).unwrap();
        let back: ScopeTemplate = serde_json::from_value(json).unwrap();
        prop_assert_eq!(back, template);
    }
}

#[test]
fn stability_levels_cover_exactly_three_values() {
    assert_eq!(Stability::ALL.len(), 3);
    for level in Stability::ALL {
        assert_eq!(level.as_str().parse::<Stability>(), Ok(level));
    }
}
