//! emtprep-core — Scenario engine, quiz engine, and scoring.
//!
//! This crate defines the data model, the branching-scenario session
//! engine, the multiple-choice quiz engine, and the store traits that the
//! rest of the emtprep system builds on.

pub mod error;
pub mod guidelines;
pub mod model;
pub mod parser;
pub mod profile;
pub mod quiz;
pub mod scenario;
pub mod statistics;
pub mod traits;
