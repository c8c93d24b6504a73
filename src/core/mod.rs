//! Core types for the calculator engine.
//!
//! This module defines the fundamental data types the engine is built on:
//!
//! - **WidthPolicy**: configured bit width and signedness domain
//! - **OverflowMode**: wraparound policy for out-of-range results
//! - **NumericValue**: exact integer bound to a policy, with rendering
//! - **FormatConfig**: display rendering preferences
//! - **Error**: unified error hierarchy
//!
//! # Layer 0 - No Internal Dependencies
//!
//! This module has no dependencies on other engine modules, allowing it
//! to be imported by all other layers.

pub mod error;
pub mod format;
pub mod value;
pub mod width;

// Re-export primary types at module level
pub use error::{CalcError, CalcResult, ErrorCategory};
pub use format::FormatConfig;
pub use value::{reduce, Base, NumericValue, OperatorKind, OverflowMode};
pub use width::{WidthPolicy, MAX_BITS, MIN_BITS};
