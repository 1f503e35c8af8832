//! Service layer: lifecycle orchestration over repos and gateways.

pub mod flow;
pub mod setup_session;
