//! bitcalc: a programmer's calculator engine.
//!
//! Evaluates arithmetic and bitwise expressions over configurably-sized
//! integers (8-128 bits), with precisely-defined wraparound semantics
//! and conversion between decimal, hexadecimal, and binary display
//! without losing width or sign information across chained operations.
//!
//! The engine is event-driven and synchronous: a front end feeds
//! keystroke-level events into an [`Accumulator`] and renders the
//! strings and history snapshots it exposes. The engine holds no I/O
//! resources and no internal synchronization; a multi-threaded host
//! must serialize access to a single instance.

// ═══════════════════════════════════════════════════════════════════════════
// Layer 0: Core (No internal dependencies)
// ═══════════════════════════════════════════════════════════════════════════
pub mod core;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 1: State holders (depend on core)
// ═══════════════════════════════════════════════════════════════════════════
pub mod history;
pub mod memory;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 2: Engine (depends on core, history, memory)
// ═══════════════════════════════════════════════════════════════════════════
pub mod engine;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 3: Tooling (depends on all)
// ═══════════════════════════════════════════════════════════════════════════
pub mod repl;


// Re-export the primary types at crate root
pub use crate::core::{
    reduce, Base, CalcError, CalcResult, ErrorCategory, FormatConfig, NumericValue,
    OperatorKind, OverflowMode, WidthPolicy, MAX_BITS, MIN_BITS,
};
pub use crate::engine::{Accumulator, EngineConfig, InputEvent};
pub use crate::history::{HistoryLog, HistoryRecord};
pub use crate::memory::MemoryRegister;
