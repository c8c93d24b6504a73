//! Integration tests for width policies and overflow reduction.
//!
//! Component: WidthPolicy + OverflowMode
//!
//! These tests verify:
//! - Domain bounds for every valid width
//! - Wraparound (never saturation) in width-bound modes
//! - Relative mode's unbounded behaviour
//! - Width/mode reconfiguration renormalizing held values

#![cfg(test)]

use num_bigint::BigInt;

use bitcalc::{reduce, CalcError, NumericValue, OperatorKind, OverflowMode, WidthPolicy};

use crate::common::*;
use bitcalc::engine::InputEvent;

// =============================================================================
// Domain Bounds
// =============================================================================

#[test]
fn every_valid_width_has_consistent_bounds() {
    for bits in (8..=128).step_by(8) {
        let unsigned = WidthPolicy::new(bits, false).unwrap();
        assert_eq!(unsigned.min_value(), BigInt::from(0));
        assert_eq!(unsigned.max_value(), unsigned.modulus() - 1);

        let signed = WidthPolicy::new(bits, true).unwrap();
        assert_eq!(&signed.max_value() - &signed.min_value() + 1, signed.modulus());
    }
}

#[test]
fn misaligned_widths_rejected() {
    for bits in [0, 1, 7, 9, 12, 127, 129, 1024] {
        assert_eq!(
            WidthPolicy::new(bits, false).unwrap_err(),
            CalcError::InvalidWidth { bits }
        );
    }
}

// =============================================================================
// Wraparound Semantics
// =============================================================================

#[test]
fn unsigned_wraps_not_saturates() {
    let w = WidthPolicy::new(8, false).unwrap();
    // Saturation would give 255; wraparound gives 4.
    assert_eq!(
        reduce(&BigInt::from(260), w, OverflowMode::Unsigned),
        BigInt::from(4)
    );
}

#[test]
fn signed_wraps_through_sign_boundary() {
    let w = WidthPolicy::new(8, true).unwrap();
    assert_eq!(
        reduce(&BigInt::from(150), w, OverflowMode::Signed),
        BigInt::from(-106)
    );
    assert_eq!(
        reduce(&BigInt::from(-130), w, OverflowMode::Signed),
        BigInt::from(126)
    );
}

#[test]
fn mul_at_full_width_stays_exact() {
    // 128-bit multiply overflows any native register; the result must
    // still be the exact product reduced modulo 2^128.
    let w = WidthPolicy::new(128, false).unwrap();
    let max = NumericValue::from_bigint(w.max_value(), w, OverflowMode::Unsigned);
    let r = max.apply(OperatorKind::Mul, &max).unwrap();
    // (2^128 - 1)^2 mod 2^128 = 1
    assert_eq!(r.magnitude(), &BigInt::from(1));
}

#[test]
fn relative_mode_never_reduces() {
    let mut acc = engine_relative();
    run_script(&mut acc, "999999999999*999999999999=");
    assert_display(&acc, "999999999998000000000001");
}

// =============================================================================
// Renormalization on Reconfiguration
// =============================================================================

#[test]
fn width_change_renormalizes_without_arithmetic() {
    let mut acc = engine(16, OverflowMode::Unsigned);
    run_script(&mut acc, "300");
    run_events(&mut acc, &[InputEvent::SetWidth(8)]);
    assert_display(&acc, "44");
    // No operation completed, so nothing was logged.
    assert!(acc.history().is_empty());
}

#[test]
fn mode_change_reinterprets_residue() {
    let mut acc = engine_u8();
    run_script(&mut acc, "255");
    run_events(&mut acc, &[InputEvent::SetOverflowMode(OverflowMode::Signed)]);
    assert_display(&acc, "-1");
}

#[test]
fn widening_preserves_value() {
    let mut acc = engine_u8();
    run_script(&mut acc, "200");
    run_events(&mut acc, &[InputEvent::SetWidth(32)]);
    assert_display(&acc, "200");
}

#[test]
fn pending_operand_renormalized_too() {
    let mut acc = engine(16, OverflowMode::Unsigned);
    // 300 is committed as the pending operand, then the width narrows.
    run_script(&mut acc, "300+");
    run_events(&mut acc, &[InputEvent::SetWidth(8)]);
    run_script(&mut acc, "1=");
    // 300 mod 256 = 44, then 44 + 1 = 45.
    assert_display(&acc, "45");
}
