//! Application core — pure domain logic, zero I/O.
//!
//! This module holds the node's business rules: the per-sensor publish
//! observers, the shared application context and the threshold task. All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod context;
pub mod events;
pub mod ports;
pub mod service;
