//! Width policy: configured bit width and signedness.
//!
//! A `WidthPolicy` defines the valid value range for width-bound
//! arithmetic. Range bounds are always derived from the bit count,
//! never stored, so a policy can never hold inconsistent bounds.

use num_bigint::BigInt;
use num_traits::{One, Zero};

use super::error::{CalcError, CalcResult};

/// Smallest supported width in bits.
pub const MIN_BITS: u32 = 8;

/// Largest supported width in bits.
pub const MAX_BITS: u32 = 128;

/// Configured integer width and signedness domain.
///
/// Invariant: `bits` is a multiple of 8 in `[8, 128]`, enforced by the
/// constructor. Construct only through [`WidthPolicy::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidthPolicy {
    bits: u32,
    signed: bool,
}

impl WidthPolicy {
    /// Create a policy, validating the bit count.
    pub fn new(bits: u32, signed: bool) -> CalcResult<Self> {
        if !(MIN_BITS..=MAX_BITS).contains(&bits) || bits % 8 != 0 {
            return Err(CalcError::InvalidWidth { bits });
        }
        Ok(Self { bits, signed })
    }

    /// The active bit count.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Whether the domain is signed.
    #[inline]
    pub fn signed(&self) -> bool {
        self.signed
    }

    /// Same width with a different signedness.
    pub fn with_signed(self, signed: bool) -> Self {
        Self { signed, ..self }
    }

    /// `2^bits`, the size of the value space.
    pub fn modulus(&self) -> BigInt {
        BigInt::one() << (self.bits as usize)
    }

    /// Largest value in the domain.
    ///
    /// `2^bits - 1` unsigned, `2^(bits-1) - 1` signed.
    pub fn max_value(&self) -> BigInt {
        if self.signed {
            (BigInt::one() << (self.bits as usize - 1)) - 1
        } else {
            self.modulus() - 1
        }
    }

    /// Smallest value in the domain.
    ///
    /// `0` unsigned, `-2^(bits-1)` signed.
    pub fn min_value(&self) -> BigInt {
        if self.signed {
            -(BigInt::one() << (self.bits as usize - 1))
        } else {
            BigInt::zero()
        }
    }

    /// The inclusive `(min, max)` range of the domain.
    pub fn range(&self) -> (BigInt, BigInt) {
        (self.min_value(), self.max_value())
    }

    /// Check whether a value lies within the domain.
    pub fn contains(&self, value: &BigInt) -> bool {
        let (min, max) = self.range();
        min <= *value && *value <= max
    }
}

impl Default for WidthPolicy {
    /// 64-bit unsigned, the widest width a native register covers.
    fn default() -> Self {
        Self { bits: 64, signed: false }
    }
}
