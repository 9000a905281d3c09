//! Climate node firmware library.
//!
//! Battery-powered room sensor: samples temperature, CO2 and VOC, publishes
//! readings over the radio only when they changed enough or went stale, and
//! lights a status LED while any reading is above its comfort limit.
//!
//! Exposes the pure-logic modules for integration testing. All
//! ESP-IDF-specific code is guarded by `#[cfg(feature = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod filter;
pub mod monitor;
pub mod node;
pub mod scheduler;
pub mod sensors;
