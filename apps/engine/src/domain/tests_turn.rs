use crate::domain::test_fixtures::{fresh_turn, now};
use crate::domain::turn::{validate_content, TurnContent};
use crate::entities::turns::{ContributionKind, TurnStatus};
use crate::errors::domain::{DomainError, TransitionKind, ValidationKind};

#[test]
fn offer_moves_available_to_offered_and_stamps_holder() {
    let mut turn = fresh_turn(1, ContributionKind::Writing, TurnStatus::Available);
    turn.offer(7, now()).unwrap();
    assert_eq!(turn.status, TurnStatus::Offered);
    assert_eq!(turn.holder_id, Some(7));
    assert_eq!(turn.offered_at, Some(now()));
}

#[test]
fn offering_a_non_available_turn_fails_without_mutation() {
    let mut turn = fresh_turn(1, ContributionKind::Writing, TurnStatus::Pending);
    turn.holder_id = Some(3);
    let before = turn.clone();
    let err = turn.offer(7, now()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Transition {
            kind: TransitionKind::WrongState,
            ..
        }
    ));
    assert_eq!(turn, before);
}

#[test]
fn claim_succeeds_for_the_offered_holder_only() {
    let mut turn = fresh_turn(1, ContributionKind::Writing, TurnStatus::Available);
    turn.offer(7, now()).unwrap();

    let mut rival = turn.clone();
    let err = rival.claim(8, now()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Transition {
            kind: TransitionKind::WrongHolder,
            ..
        }
    ));

    turn.claim(7, now()).unwrap();
    assert_eq!(turn.status, TurnStatus::Pending);
    assert_eq!(turn.claimed_at, Some(now()));
}

#[test]
fn at_most_one_of_two_racing_claims_wins() {
    // Pure form of the single-winner guard: once the first claim lands, the
    // second sees PENDING and fails.
    let mut turn = fresh_turn(1, ContributionKind::Writing, TurnStatus::Available);
    turn.offer(7, now()).unwrap();

    turn.claim(7, now()).unwrap();
    let err = turn.claim(7, now()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Transition {
            kind: TransitionKind::WrongState,
            ..
        }
    ));
    assert_eq!(turn.status, TurnStatus::Pending);
}

#[test]
fn dismiss_returns_the_turn_to_available_and_clears_the_holder() {
    let mut turn = fresh_turn(1, ContributionKind::Writing, TurnStatus::Available);
    turn.offer(7, now()).unwrap();
    turn.dismiss(7).unwrap();
    assert_eq!(turn.status, TurnStatus::Available);
    assert_eq!(turn.holder_id, None);
    assert_eq!(turn.offered_at, None);
}

#[test]
fn dismiss_by_a_non_holder_fails() {
    let mut turn = fresh_turn(1, ContributionKind::Writing, TurnStatus::Available);
    turn.offer(7, now()).unwrap();
    let err = turn.dismiss(8).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Transition {
            kind: TransitionKind::WrongHolder,
            ..
        }
    ));
    assert_eq!(turn.holder_id, Some(7));
}

#[test]
fn submit_completes_a_pending_turn_with_matching_content() {
    let mut turn = fresh_turn(1, ContributionKind::Writing, TurnStatus::Available);
    turn.offer(7, now()).unwrap();
    turn.claim(7, now()).unwrap();
    turn.submit(7, TurnContent::Text("once upon a time".into()), now())
        .unwrap();
    assert_eq!(turn.status, TurnStatus::Completed);
    assert_eq!(turn.text_content.as_deref(), Some("once upon a time"));
    assert_eq!(turn.image_url, None);
    assert_eq!(turn.completed_at, Some(now()));
}

#[test]
fn submit_with_empty_content_fails_and_turn_stays_pending() {
    let mut turn = fresh_turn(1, ContributionKind::Writing, TurnStatus::Available);
    turn.offer(7, now()).unwrap();
    turn.claim(7, now()).unwrap();

    let err = turn
        .submit(7, TurnContent::Text("   ".into()), now())
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation {
            kind: ValidationKind::EmptyContent,
            ..
        }
    ));
    assert_eq!(turn.status, TurnStatus::Pending);
    assert_eq!(turn.text_content, None);
}

#[test]
fn submit_with_mismatched_content_kind_fails() {
    let mut turn = fresh_turn(1, ContributionKind::Drawing, TurnStatus::Available);
    turn.offer(7, now()).unwrap();
    turn.claim(7, now()).unwrap();

    let err = turn
        .submit(7, TurnContent::Text("not a drawing".into()), now())
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation {
            kind: ValidationKind::ContentKindMismatch,
            ..
        }
    ));
    assert_eq!(turn.status, TurnStatus::Pending);
}

#[test]
fn submit_by_a_non_holder_fails() {
    let mut turn = fresh_turn(1, ContributionKind::Writing, TurnStatus::Available);
    turn.offer(7, now()).unwrap();
    turn.claim(7, now()).unwrap();

    let err = turn
        .submit(8, TurnContent::Text("hijack".into()), now())
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Transition {
            kind: TransitionKind::WrongHolder,
            ..
        }
    ));
}

#[test]
fn skip_moves_pending_to_skipped_and_keeps_the_holder() {
    let mut turn = fresh_turn(1, ContributionKind::Writing, TurnStatus::Available);
    turn.offer(7, now()).unwrap();
    turn.claim(7, now()).unwrap();
    turn.skip(now()).unwrap();
    assert_eq!(turn.status, TurnStatus::Skipped);
    assert_eq!(turn.holder_id, Some(7));
    assert_eq!(turn.skipped_at, Some(now()));
}

#[test]
fn skipping_a_completed_turn_fails_without_mutation() {
    let mut turn = fresh_turn(1, ContributionKind::Writing, TurnStatus::Available);
    turn.offer(7, now()).unwrap();
    turn.claim(7, now()).unwrap();
    turn.submit(7, TurnContent::Text("done".into()), now()).unwrap();

    let before = turn.clone();
    let err = turn.skip(now()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Transition {
            kind: TransitionKind::WrongState,
            ..
        }
    ));
    assert_eq!(turn, before);
}

#[test]
fn content_validation_checks_emptiness_and_kind() {
    assert!(validate_content(
        ContributionKind::Drawing,
        &TurnContent::Image("https://img.example/1.png".into())
    )
    .is_ok());
    assert!(validate_content(ContributionKind::Drawing, &TurnContent::Image("".into())).is_err());
    assert!(validate_content(
        ContributionKind::Writing,
        &TurnContent::Image("https://img.example/1.png".into())
    )
    .is_err());
}
