//! Integration tests for the accumulator state machine.
//!
//! Component: Accumulator (Engine)
//!
//! These tests verify:
//! - Entry / operator / equals sequencing
//! - Left-to-right chaining with no precedence
//! - Base toggling and the Relative/hex conflict
//! - Error atomicity: failed events leave no observable mutation

#![cfg(test)]

use bitcalc::engine::InputEvent;
use bitcalc::{Base, OperatorKind, OverflowMode};

use crate::common::*;

// =============================================================================
// Wraparound Examples
// =============================================================================

#[test]
fn unsigned_8bit_addition_wraps() {
    let mut acc = engine_u8();
    run_script(&mut acc, "250+10=");
    assert_display(&acc, "4");
    assert_history(&acc, &["250 + 10 = 4"]);
}

#[test]
fn signed_8bit_addition_wraps_negative() {
    let mut acc = engine_s8();
    run_script(&mut acc, "100+50=");
    assert_display(&acc, "-106");
}

#[test]
fn shift_left_16bit_hex() {
    let mut acc = engine(16, OverflowMode::Unsigned);
    run_events(&mut acc, &[InputEvent::ToggleBase]);
    run_script(&mut acc, "FF<<4=");
    assert_display(&acc, "0xFF0");
}

#[test]
fn relative_subtraction_goes_negative() {
    let mut acc = engine_relative();
    run_script(&mut acc, "5-10=");
    assert_display(&acc, "-5");
}

// =============================================================================
// Sequencing
// =============================================================================

#[test]
fn chained_operators_resolve_left_to_right() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "2+3*4=");
    // (2 + 3) * 4, not 2 + (3 * 4).
    assert_display(&acc, "20");
    assert_history(&acc, &["2 + 3 = 5", "5 * 4 = 20"]);
}

#[test]
fn long_chain_stays_reduced_throughout() {
    let mut acc = engine_u8();
    run_script(&mut acc, "200+100+100=");
    // 200+100 wraps to 44 before the next operand applies.
    assert_history(&acc, &["200 + 100 = 44", "44 + 100 = 144"]);
    assert_display(&acc, "144");
}

#[test]
fn operator_swap_before_operand() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "6+*7=");
    // The second operator replaces the first; nothing resolves twice.
    assert_display(&acc, "42");
    assert_history(&acc, &["6 * 7 = 42"]);
}

#[test]
fn equals_without_operator_commits_entry() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "123=");
    assert_display(&acc, "123");
    assert!(acc.history().is_empty());
}

#[test]
fn result_feeds_next_operation() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "10+5=");
    assert_display(&acc, "15");
    run_script(&mut acc, "*2=");
    assert_display(&acc, "30");
}

// =============================================================================
// Bitwise Operations
// =============================================================================

#[test]
fn bitwise_ops_through_events() {
    let mut acc = engine(16, OverflowMode::Unsigned);
    run_script(&mut acc, "255&15=");
    assert_display(&acc, "15");

    run_script(&mut acc, "|240=");
    assert_display(&acc, "255");

    run_script(&mut acc, "^255=");
    assert_display(&acc, "0");
}

#[test]
fn remainder_operator() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "17%5=");
    assert_display(&acc, "2");
}

#[test]
fn shift_right_on_negative_is_logical() {
    let mut acc = engine_s8();
    run_script(&mut acc, "254>>1=");
    // 254 reduces to -2 (residue 0xFE); logical shift gives 0x7F.
    assert_display(&acc, "127");
}

// =============================================================================
// Base Toggling
// =============================================================================

#[test]
fn toggle_base_preserves_magnitude() {
    let mut acc = engine(16, OverflowMode::Unsigned);
    run_script(&mut acc, "4080=");
    run_events(&mut acc, &[InputEvent::ToggleBase]);
    assert_display(&acc, "0xFF0");
    run_events(&mut acc, &[InputEvent::ToggleBase]);
    assert_display(&acc, "4080");
}

#[test]
fn hex_digits_rejected_in_decimal_base() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "12");
    let err = try_script(&mut acc, "A").unwrap_err();
    assert_eq!(err.kind(), "InvalidDigit");
    assert_display(&acc, "12");
}

#[test]
fn toggle_to_hex_in_relative_mode_rejected() {
    let mut acc = engine_relative();
    run_script(&mut acc, "5");
    let err = acc.apply(InputEvent::ToggleBase).unwrap_err();
    assert_eq!(err.kind(), "ModeConflict");
    assert_eq!(acc.base(), Base::Decimal);
    assert_display(&acc, "5");
}

#[test]
fn switching_to_relative_forces_decimal() {
    let mut acc = engine_u8();
    run_events(&mut acc, &[
        InputEvent::ToggleBase,
        InputEvent::SetOverflowMode(OverflowMode::Relative),
    ]);
    assert_eq!(acc.base(), Base::Decimal);
}

// =============================================================================
// Error Atomicity
// =============================================================================

#[test]
fn division_by_zero_leaves_prior_state_readable() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "42/0");

    let err = acc.apply(InputEvent::Equals).unwrap_err();
    assert_eq!(err.kind(), "DivisionByZero");

    // The engine still holds the pending division and the typed zero.
    assert!(acc.has_pending());
    assert_eq!(acc.pending_operator(), Some(OperatorKind::Div));
    assert!(acc.history().is_empty());

    // Recoverable: replace the divisor and resolve.
    run_events(&mut acc, &[InputEvent::ClearEntry]);
    run_script(&mut acc, "7=");
    assert_display(&acc, "6");
}

#[test]
fn negative_shift_amount_rejected_atomically() {
    let mut acc = engine_s8();
    // 200 reduces to -56; using it as a shift amount is invalid.
    run_script(&mut acc, "1<<200");
    let err = acc.apply(InputEvent::Equals).unwrap_err();
    assert_eq!(err.kind(), "InvalidOperand");
    assert!(acc.has_pending());
    assert!(acc.history().is_empty());
}

#[test]
fn invalid_width_event_changes_nothing() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "55");
    assert!(acc.apply(InputEvent::SetWidth(13)).is_err());
    assert_eq!(acc.width().bits(), 64);
    assert_display(&acc, "55");
}

// =============================================================================
// Clears
// =============================================================================

#[test]
fn clear_entry_preserves_pending_operation() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "50+99");
    run_events(&mut acc, &[InputEvent::ClearEntry]);
    run_script(&mut acc, "1=");
    assert_display(&acc, "51");
}

#[test]
fn clear_all_resets_pending_but_not_memory() {
    let mut acc = engine(64, OverflowMode::Unsigned);
    run_script(&mut acc, "9");
    run_events(&mut acc, &[InputEvent::MemoryStore]);
    run_script(&mut acc, "+1");
    run_events(&mut acc, &[InputEvent::ClearAll]);

    assert_display(&acc, "0");
    assert!(!acc.has_pending());
    assert!(!acc.memory().is_empty());
}
