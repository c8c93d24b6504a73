//! Integration tests for the history log and memory register.
//!
//! Component: HistoryLog + MemoryRegister
//!
//! These tests verify:
//! - Append-only insertion ordering
//! - Record contents (pre-resolution operands, operator, result)
//! - Memory lifecycle independence from accumulator clears
//! - Memory renormalization on reconfiguration

#![cfg(test)]

use num_bigint::BigInt;

use bitcalc::engine::InputEvent;
use bitcalc::{OperatorKind, OverflowMode};

use crate::common::*;

// =============================================================================
// History Ordering and Contents
// =============================================================================

#[test]
fn history_preserves_insertion_order() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "1+2=");
    run_script(&mut acc, "*10=");
    run_script(&mut acc, "-5=");
    assert_history(&acc, &["1 + 2 = 3", "3 * 10 = 30", "30 - 5 = 25"]);
}

#[test]
fn record_captures_pre_resolution_operands() {
    let mut acc = engine_u8();
    run_script(&mut acc, "250+10=");

    let record = acc.history().last().unwrap();
    assert_eq!(record.operand_a.magnitude(), &BigInt::from(250));
    assert_eq!(record.operator, OperatorKind::Add);
    assert_eq!(
        record.operand_b.as_ref().unwrap().magnitude(),
        &BigInt::from(10)
    );
    assert_eq!(record.result.magnitude(), &BigInt::from(4));
}

#[test]
fn failed_operations_are_not_logged() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "8/0");
    assert!(acc.apply(InputEvent::Equals).is_err());
    assert!(acc.history().is_empty());

    run_events(&mut acc, &[InputEvent::ClearEntry]);
    run_script(&mut acc, "2=");
    assert_history(&acc, &["8 / 2 = 4"]);
}

#[test]
fn clears_do_not_touch_history() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "3+4=");
    run_events(&mut acc, &[InputEvent::ClearAll]);
    assert_history(&acc, &["3 + 4 = 7"]);
}

// =============================================================================
// Memory Register Lifecycle
// =============================================================================

#[test]
fn memory_survives_entry_and_full_clears() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "123");
    run_events(&mut acc, &[
        InputEvent::MemoryStore,
        InputEvent::ClearEntry,
        InputEvent::ClearAll,
        InputEvent::MemoryRecall,
    ]);
    assert_display(&acc, "123");
}

#[test]
fn recall_on_empty_register_is_silent_noop() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "42");
    // No error, no change: an empty register is a valid idle state.
    run_events(&mut acc, &[InputEvent::MemoryRecall]);
    assert_display(&acc, "42");
}

#[test]
fn clear_memory_empties_slot_only() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "7");
    run_events(&mut acc, &[InputEvent::MemoryStore, InputEvent::ClearMemory]);
    assert!(acc.memory().is_empty());
    assert_display(&acc, "7");
}

#[test]
fn memory_tracks_width_changes() {
    let mut acc = engine(16, OverflowMode::Unsigned);
    run_script(&mut acc, "300");
    run_events(&mut acc, &[
        InputEvent::MemoryStore,
        InputEvent::SetWidth(8),
        InputEvent::ClearAll,
        InputEvent::MemoryRecall,
    ]);
    assert_display(&acc, "44");
}

#[test]
fn recalled_value_participates_in_operations() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "25");
    run_events(&mut acc, &[InputEvent::MemoryStore, InputEvent::ClearAll]);
    run_script(&mut acc, "100-");
    run_events(&mut acc, &[InputEvent::MemoryRecall]);
    run_script(&mut acc, "=");
    assert_display(&acc, "75");
    assert_history(&acc, &["100 - 25 = 75"]);
}
