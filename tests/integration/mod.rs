//! Integration tests for bitcalc.
//!
//! This module organises integration tests by component.

pub mod engine;
pub mod history;
pub mod reduction;
