//! Test Module
//!
//! Test suite for the FAQ bot backend.
//!
//! ## Test Categories
//! - `scorer_tests`: Similarity properties (symmetry, identity, bounds)
//! - `resolver_tests`: Exact match, ranking, tie-breaking, fallback, concurrency
//! - `knowledge_tests`: FAQ document parsing and validation
//! - `responder_tests`: Full chat turns with mock classifiers
//! - `config_tests`: Environment configuration and file loading

pub mod config_tests;
