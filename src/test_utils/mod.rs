//! Test utilities
//!
//! In-memory implementations of the GitHub, README and WakaTime seams, plus
//! fixture builders, so the report pipeline can be driven without a network.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
