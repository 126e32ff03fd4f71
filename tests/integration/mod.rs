//! Integration tests for end-to-end functionality
//!
//! Tests for:
//! - Fixture files through validation, geometry and statistics
//! - SVG, PNG and PDF export

pub mod cli_tests;
