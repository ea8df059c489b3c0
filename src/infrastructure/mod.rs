//! # Infrastructure Layer
//!
//! Configuration, logging and the adapters that talk to pricing sources.

pub mod config;
pub mod sources;
pub mod telemetry;
