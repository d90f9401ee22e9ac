//! Test module for chip-core
//!
//! This module contains tests for:
//! - Chip state, events and palette selection
//! - Theme registry broadcast to live chips
//! - Configuration loading and defaults

// Test modules use exact float comparisons
#![allow(clippy::float_cmp)]

mod config_tests;
mod fixtures;
