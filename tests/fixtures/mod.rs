//! Test fixtures for ramble-planner.
//!
//! Provides:
//! - A pinned mileage table standing in for a distance backend
//! - A validator wired to the built-in Route 66 directory

pub mod mileage;

pub use mileage::*;
