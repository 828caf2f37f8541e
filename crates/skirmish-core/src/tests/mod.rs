//! Crate-level scenario tests.
//!
//! - `helpers.rs`: prototype definitions and an autopilot for driving input
//! - `integration.rs`: end-to-end encounters through the controller
//! - `determinism.rs`: same seed, same encounter
//! - `properties.rs`: proptest checks of the actor and turn order algebra

mod helpers;

pub use helpers::*;
