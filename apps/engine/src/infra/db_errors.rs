//! SeaORM -> DomainError translation helpers.
//!
//! Repos convert every `sea_orm::DbErr` here so the rest of the engine only
//! ever sees `DomainError`. Connection-class failures map to transient infra
//! kinds so the retry policy can act on them; constraint violations map to
//! the semantic conflicts they represent.

use tracing::warn;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

fn unique_violation_to_conflict(message: &str) -> Option<DomainError> {
    if message.contains("season_players") {
        return Some(DomainError::conflict(
            ConflictKind::AlreadyJoined,
            "player is already on the season roster",
        ));
    }
    if message.contains("players") && message.contains("external_id") {
        return Some(DomainError::conflict(
            ConflictKind::Other("DuplicatePlayer".into()),
            "player already registered",
        ));
    }
    if message.contains("turns") && message.contains("turn_no") {
        return Some(DomainError::conflict(
            ConflictKind::OptimisticLock,
            "turn number already taken for this game",
        ));
    }
    None
}

pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let message = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "record not found")
        }
        sea_orm::DbErr::Conn(_) | sea_orm::DbErr::ConnectionAcquire(_) => {
            warn!(error = %message, "database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, message);
        }
        _ => {}
    }

    if message.contains("UNIQUE constraint failed") || message.contains("duplicate key") {
        if let Some(conflict) = unique_violation_to_conflict(&message) {
            return conflict;
        }
        return DomainError::conflict(ConflictKind::Other("Unique".into()), message);
    }

    warn!(error = %message, "unclassified database error");
    DomainError::infra(InfraErrorKind::Other("Db".into()), message)
}
