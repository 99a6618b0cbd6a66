//! Test module for sift-core
//!
//! This module contains tests for:
//! - Query controller commit, staleness and dispatch
//! - Session loop debounce timing on virtual time
//! - Result merging order and caps
//! - History ordering, cap and persistence

mod session_tests;
