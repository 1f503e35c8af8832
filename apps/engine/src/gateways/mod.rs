//! Consumed external interfaces: scheduling and notification delivery.
//!
//! The engine only constructs instructions and fires them through these
//! traits; transport, formatting and persistence of jobs live outside.

pub mod notification;
pub mod scheduling;

pub use notification::{NotificationGateway, NotificationInstruction, NotificationKind, Recipient};
pub use scheduling::SchedulingGateway;
