//! Property-based tests for the session parameter text form

use cmis_config::SessionParameters;
use proptest::prelude::*;
use tempfile::TempDir;

fn arb_parameters() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(
        (
            prop_oneof![
                "[a-z]{1,8}(\\.[a-z]{1,8}){0,4}",
                any::<String>(),
            ],
            any::<String>(),
        ),
        0..24,
    )
}

proptest! {
    #[test]
    fn prop_format_then_parse_is_lossless(entries in arb_parameters()) {
        let parameters: SessionParameters = entries.into_iter().collect();
        let reparsed = SessionParameters::parse(&parameters.format()).unwrap();

        prop_assert_eq!(reparsed.len(), parameters.len());
        for (key, value) in parameters.iter() {
            prop_assert_eq!(reparsed.get(key), Some(value));
        }
    }

    #[test]
    fn prop_store_then_load_is_lossless(entries in arb_parameters()) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("parameters.properties");
        let parameters: SessionParameters = entries.into_iter().collect();

        parameters.store(&path, Some("property test")).unwrap();
        let loaded = SessionParameters::load(&path).unwrap();

        prop_assert_eq!(loaded, parameters);
    }
}
