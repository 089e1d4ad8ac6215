//! Property-based tests for configuration loading

use std::collections::HashMap;

use journal_api::shared::{AppConfig, ConfigError};
use proptest::prelude::*;

fn lookup(pairs: Vec<(&'static str, String)>) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<&'static str, String> = pairs.into_iter().collect();
    move |key| map.get(key).cloned()
}

proptest! {
    #[test]
    fn any_port_round_trips(port in any::<u16>()) {
        let config = AppConfig::from_lookup(lookup(vec![
            ("DATABASE_URL", "sqlite://journal.db".to_string()),
            ("JWT_SECRET", "secret".to_string()),
            ("PORT", port.to_string()),
        ]))
        .unwrap();

        prop_assert_eq!(config.port, port);
    }

    #[test]
    fn non_numeric_pool_size_is_rejected(raw in "[a-z]{1,8}") {
        let result = AppConfig::from_lookup(lookup(vec![
            ("DATABASE_URL", "sqlite://journal.db".to_string()),
            ("JWT_SECRET", "secret".to_string()),
            ("PORT", "8080".to_string()),
            ("DB_MAX_CONNECTIONS", raw),
        ]));

        let is_invalid = matches!(
            result,
            Err(ConfigError::InvalidValue { key: "DB_MAX_CONNECTIONS", .. })
        );
        prop_assert!(is_invalid);
    }
}
