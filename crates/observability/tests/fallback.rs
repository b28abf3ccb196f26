//! Runs in its own process so no other test has installed a subscriber first.

use switchyard_core::RouterConfig;

#[test]
fn init_with_invalid_filter_still_installs_a_subscriber() {
    let config = RouterConfig {
        log_filter: "switchyard=loud".to_string(),
        ..RouterConfig::default()
    };
    assert!(!tracing::dispatcher::has_been_set());

    switchyard_observability::init(&config);

    assert!(tracing::dispatcher::has_been_set());
    assert!(switchyard_observability::tracing::try_init(&config).is_err());
}
