//! Integration tests for logger behavior

use dars_audit::logger::{set_level, set_level_from_str, Level};
use dars_audit::{debug, error, info, warn};

#[test]
fn level_parse_accepts_valid() {
    for name in ["error", "WARN", "warning", "info", "debug"] {
        assert!(set_level_from_str(name), "{name} should parse");
    }
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("parsed {} requirements", 3);
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}
