//! # API Layer
//!
//! HTTP surface of the gateway.

pub mod rest;
