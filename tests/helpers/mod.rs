//! Shared fixtures and build-file helpers for the integration tests.

pub mod build_helpers;
pub mod source_fixtures;
