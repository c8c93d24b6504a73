//! Error types for the calculator engine.
//!
//! This module provides the unified error hierarchy for the engine,
//! enabling precise error handling and recovery at the event boundary.
//!
//! # Error Categories
//!
//! - **Entry Errors**: Rejected input (digits outside the active base)
//! - **Arithmetic Errors**: Failures during operation resolution
//! - **Configuration Errors**: Invalid width or base/mode combinations
//!
//! # Design Principles
//!
//! 1. **Recoverability**: Every error is recovered at the event boundary —
//!    the accumulator is left in its pre-event state
//! 2. **Context-Rich**: Errors carry the offending input and active
//!    configuration for diagnostic rendering
//! 3. **Lightweight**: No allocation on the success path

use std::fmt;

/// Comprehensive error type for the calculator engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// A digit character is not valid in the active entry base.
    InvalidDigit {
        digit: char,
        base_name: &'static str,
    },

    /// Division (or remainder) by zero.
    DivisionByZero {
        dividend: String,
    },

    /// An operand is outside the domain an operation accepts
    /// (e.g. a negative shift amount).
    InvalidOperand {
        operation: &'static str,
        operand: String,
        reason: &'static str,
    },

    /// A requested bit width is outside [8, 128] or not byte-aligned.
    InvalidWidth {
        bits: u32,
    },

    /// The requested display base is incompatible with the active
    /// overflow mode (hexadecimal requires a width-bound mode).
    ModeConflict {
        base_name: &'static str,
        mode_name: &'static str,
    },
}

/// Result type alias for engine operations.
pub type CalcResult<T> = Result<T, CalcError>;

/// Category of an error, for grouping in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Rejected input during number entry.
    Entry,
    /// Failure while resolving an operation.
    Arithmetic,
    /// Invalid engine configuration request.
    Configuration,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Entry => "entry",
            ErrorCategory::Arithmetic => "arithmetic",
            ErrorCategory::Configuration => "configuration",
        };
        write!(f, "{}", name)
    }
}

impl CalcError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::InvalidDigit { .. } => ErrorCategory::Entry,
            CalcError::DivisionByZero { .. } => ErrorCategory::Arithmetic,
            CalcError::InvalidOperand { .. } => ErrorCategory::Arithmetic,
            CalcError::InvalidWidth { .. } => ErrorCategory::Configuration,
            CalcError::ModeConflict { .. } => ErrorCategory::Configuration,
        }
    }

    /// Whether the engine can continue after this error.
    ///
    /// All engine errors are recovered at the event boundary: the failed
    /// event leaves no observable mutation, so this is always true. The
    /// method exists so callers can treat the engine uniformly with
    /// collaborators whose errors may be fatal.
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// Short machine-readable kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            CalcError::InvalidDigit { .. } => "InvalidDigit",
            CalcError::DivisionByZero { .. } => "DivisionByZero",
            CalcError::InvalidOperand { .. } => "InvalidOperand",
            CalcError::InvalidWidth { .. } => "InvalidWidth",
            CalcError::ModeConflict { .. } => "ModeConflict",
        }
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::InvalidDigit { digit, base_name } => {
                write!(f, "Invalid digit '{}' for {} entry", digit, base_name)
            }
            CalcError::DivisionByZero { dividend } => {
                write!(f, "Division by zero: {} / 0", dividend)
            }
            CalcError::InvalidOperand { operation, operand, reason } => {
                write!(f, "Invalid operand {} for {}: {}", operand, operation, reason)
            }
            CalcError::InvalidWidth { bits } => {
                write!(
                    f,
                    "Invalid width: {} bits (must be a multiple of 8 in 8..=128)",
                    bits
                )
            }
            CalcError::ModeConflict { base_name, mode_name } => {
                write!(
                    f,
                    "Mode conflict: {} display is not available in {} mode",
                    base_name, mode_name
                )
            }
        }
    }
}

impl std::error::Error for CalcError {}
