//! Domain-level error type used across services, repos, and gateways.
//!
//! This error type is storage- and transport-agnostic. Every core operation
//! returns `Result<T, DomainError>`; callers at the platform boundary decide
//! how each variant is presented.

use thiserror::Error;

/// Infra error kinds to distinguish operational failures.
///
/// `is_transient` drives the retry policy in `crate::infra::retry`:
/// transient kinds are retried with backoff, permanent kinds surface
/// immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    SchedulingUnavailable,
    NotificationUnavailable,
    PermissionDenied,
    DataCorruption,
    Other(String),
}

impl InfraErrorKind {
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            InfraErrorKind::Timeout
                | InfraErrorKind::DbUnavailable
                | InfraErrorKind::SchedulingUnavailable
                | InfraErrorKind::NotificationUnavailable
        )
    }
}

/// Entities that can be missing in domain terms.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Player,
    Config,
    Season,
    Game,
    Turn,
    Other(String),
}

/// State-machine guard failures.
///
/// These are expected under concurrency (two callers racing on the same
/// turn) and must be treated as ordinary outcomes, never as faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Entity is not in a state that permits the requested transition.
    WrongState,
    /// Caller is not the holder the transition requires.
    WrongHolder,
}

/// Input validation failures with a user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    BadDuration,
    RosterBounds,
    EmptyPattern,
    EmptyContent,
    ContentKindMismatch,
    PlayerBanned,
    SessionExpired,
    Other(String),
}

/// Semantic conflicts on shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    AlreadyJoined,
    RosterFull,
    OptimisticLock,
    Other(String),
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Input/config validation or business rule violation.
    #[error("validation error ({kind:?}): {detail}")]
    Validation { kind: ValidationKind, detail: String },
    /// State-machine guard failure.
    #[error("invalid transition ({kind:?}): {detail}")]
    Transition { kind: TransitionKind, detail: String },
    /// Semantic conflict.
    #[error("conflict ({kind:?}): {detail}")]
    Conflict { kind: ConflictKind, detail: String },
    /// Missing resource in domain terms.
    #[error("not found ({kind:?}): {detail}")]
    NotFound { kind: NotFoundKind, detail: String },
    /// Player selection found no eligible candidate. Indicates a genuine
    /// roster/game-design problem, surfaced distinctly from validation.
    #[error("no eligible players: {detail}")]
    Selection { detail: String },
    /// Infrastructure/operational failures.
    #[error("infra error ({kind:?}): {detail}")]
    Infra { kind: InfraErrorKind, detail: String },
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            detail: detail.into(),
        }
    }

    pub fn transition(kind: TransitionKind, detail: impl Into<String>) -> Self {
        Self::Transition {
            kind,
            detail: detail.into(),
        }
    }

    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict {
            kind,
            detail: detail.into(),
        }
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            detail: detail.into(),
        }
    }

    pub fn selection(detail: impl Into<String>) -> Self {
        Self::Selection {
            detail: detail.into(),
        }
    }

    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra {
            kind,
            detail: detail.into(),
        }
    }

    /// Whether a bounded retry with backoff is worthwhile.
    pub fn is_transient(&self) -> bool {
        match self {
            DomainError::Infra { kind, .. } => kind.is_transient(),
            _ => false,
        }
    }
}
