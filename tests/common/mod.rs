//! Common test utilities for resplot.
//!
//! This module provides shared fixtures and assertions for the integration tests.

pub mod assertions;
pub mod fixtures;
