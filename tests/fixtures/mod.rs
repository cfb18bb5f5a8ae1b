//! Test fixtures for poi-route-matcher.
//!
//! Provides realistic test data including:
//! - Nantes-area pharmacy locations along the A11 towards Angers
//! - A scripted routing provider for deterministic matching tests
//!
//! Each test binary imports from the submodule it needs, so a binary that
//! only uses the locations does not compile unused re-exports.

// Each test binary uses a subset of the fixtures.
#![allow(dead_code)]

pub mod nantes_pharmacies;
pub mod scripted_provider;
