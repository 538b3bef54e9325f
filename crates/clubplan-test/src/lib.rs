//! Shared test fixtures for clubplan crates.
//!
//! This crate provides fact builders and ready-made datasets. It depends on
//! `clubplan-core` only, so every other crate can take it as a
//! dev-dependency.
//!
//! - [`facts`] - terse constructors for trainers, teams and slots
//! - [`builder`] - `ScheduleBuilder` for hand-assigned schedules
//! - [`club`] - the small club dataset used by integration tests
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! clubplan-test = { workspace = true }
//! ```

pub mod builder;
pub mod club;
pub mod facts;

pub use builder::ScheduleBuilder;
pub use club::{small_club_request, small_club_schedule};
pub use facts::{slot, slot_id, team, trainer};
