//! Infrastructure helpers: database access, error translation, retry.

pub mod db;
pub mod db_errors;
pub mod retry;
