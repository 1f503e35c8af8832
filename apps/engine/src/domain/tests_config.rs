use time::Duration;

use crate::domain::config::{parse_pattern, RelayConfig};
use crate::domain::test_fixtures::config;
use crate::entities::turns::ContributionKind;
use crate::errors::domain::{DomainError, ValidationKind};

fn assert_validation(result: Result<(), DomainError>, kind: ValidationKind) {
    match result {
        Err(DomainError::Validation { kind: got, .. }) if got == kind => {}
        other => panic!("expected Validation({kind:?}), got {other:?}"),
    }
}

#[test]
fn parses_a_mixed_pattern_case_insensitively() {
    assert_eq!(
        parse_pattern("Writing, drawing,WRITING").unwrap(),
        vec![
            ContributionKind::Writing,
            ContributionKind::Drawing,
            ContributionKind::Writing,
        ]
    );
}

#[test]
fn rejects_empty_and_unknown_patterns() {
    assert!(matches!(
        parse_pattern("").unwrap_err(),
        DomainError::Validation {
            kind: ValidationKind::EmptyPattern,
            ..
        }
    ));
    assert!(matches!(
        parse_pattern(", ,").unwrap_err(),
        DomainError::Validation {
            kind: ValidationKind::EmptyPattern,
            ..
        }
    ));
    assert!(parse_pattern("writing,sculpting").is_err());
}

#[test]
fn validates_roster_bounds() {
    let mut bad = config();
    bad.min_players = 1;
    assert_validation(bad.validate(), ValidationKind::RosterBounds);

    let mut bad = config();
    bad.max_players = bad.min_players - 1;
    assert_validation(bad.validate(), ValidationKind::RosterBounds);
}

#[test]
fn validates_durations() {
    let mut bad = config();
    bad.claim_timeout = Duration::ZERO;
    assert_validation(bad.validate(), ValidationKind::BadDuration);

    // Warning lead-time must be strictly inside the submission window.
    let mut bad = config();
    bad.write_warning = bad.write_timeout;
    assert_validation(bad.validate(), ValidationKind::BadDuration);
}

#[test]
fn accepts_a_well_formed_config() {
    config().validate().unwrap();
}

#[test]
fn kind_at_wraps_over_the_pattern() {
    let cfg = RelayConfig {
        pattern: vec![
            ContributionKind::Writing,
            ContributionKind::Drawing,
            ContributionKind::Drawing,
        ],
        ..config()
    };
    assert_eq!(cfg.kind_at(1), ContributionKind::Writing);
    assert_eq!(cfg.kind_at(2), ContributionKind::Drawing);
    assert_eq!(cfg.kind_at(3), ContributionKind::Drawing);
    assert_eq!(cfg.kind_at(4), ContributionKind::Writing);
    assert_eq!(cfg.kind_at(7), ContributionKind::Writing);
}

#[test]
fn per_kind_timeouts_resolve_from_the_kind() {
    let cfg = config();
    assert_eq!(cfg.submit_timeout(ContributionKind::Writing), cfg.write_timeout);
    assert_eq!(cfg.submit_timeout(ContributionKind::Drawing), cfg.draw_timeout);
    assert_eq!(cfg.submit_warning(ContributionKind::Writing), cfg.write_warning);
    assert_eq!(cfg.submit_warning(ContributionKind::Drawing), cfg.draw_warning);
}
