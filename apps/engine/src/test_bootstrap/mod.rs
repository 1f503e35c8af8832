#![cfg(test)]

//! Test-only bootstrap helpers.

pub mod logging;
