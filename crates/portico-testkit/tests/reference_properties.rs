//! Property tests over reference generation
//!
//! Drives the declaration-to-reference pipeline with generated surfaces and
//! checks the ordering and filtering contracts documentation tooling relies
//! on.

use proptest::prelude::*;

use portico_core::method::HttpMethod;
use portico_registry::DeclareOptions;
use portico_service::ApiReference;
use portico_testkit::{ok_handler, widget_builder};

proptest! {
    #[test]
    fn references_keep_published_entries_in_declaration_order(
        hidden_flags in prop::collection::vec(any::<bool>(), 1..8)
    ) {
        let mut builder = widget_builder();
        let mut expected = Vec::new();
        for (index, &hidden) in hidden_flags.iter().enumerate() {
            let name = format!("endpoint{index}");
            let mut options =
                DeclareOptions::new(HttpMethod::Get, format!("/things/thing{index}"), name.as_str())
                    .with_title("Generated Endpoint")
                    .with_description("Declared from a generated fixture.");
            if hidden {
                options = options.no_publish();
            } else {
                expected.push(name);
            }
            builder.declare(options, ok_handler(200)).unwrap();
        }

        let reference = ApiReference::from_surface(&builder.surface(), "https://api.example.com");
        let names: Vec<String> = reference.entries.iter().map(|e| e.name.clone()).collect();
        prop_assert_eq!(names, expected);
    }

    #[test]
    fn reference_args_mirror_route_placeholders(
        params in prop::collection::vec("[a-z][a-zA-Z0-9_]{0,8}", 1..4)
    ) {
        let mut route = String::from("/collection");
        for param in &params {
            route.push_str("/:");
            route.push_str(param);
        }

        let mut builder = widget_builder();
        let options = DeclareOptions::new(HttpMethod::Get, route.as_str(), "probe")
            .with_title("Probe")
            .with_description("Exposes placeholder extraction.");
        builder.declare(options, ok_handler(200)).unwrap();

        let reference = ApiReference::from_surface(&builder.surface(), "https://api.example.com");
        prop_assert_eq!(&reference.entries[0].args, &params);
    }
}
