//! Numeric value type: an exact integer bound to a width policy and
//! overflow mode.
//!
//! All width-bound arithmetic wraps modulo `2^bits` (wraparound, never
//! saturation). Relative mode performs no reduction: values grow
//! unbounded in either direction, as ordinary signed decimal arithmetic.
//!
//! Reduction is immediate: a value in a width-bound mode always lies
//! within its domain after every operation, never lazily on display.

use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Num, Signed, ToPrimitive, Zero};

use super::error::{CalcError, CalcResult};
use super::format::FormatConfig;
use super::width::WidthPolicy;

/// Policy governing how out-of-range results are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverflowMode {
    /// Two's-complement wraparound into `[-2^(bits-1), 2^(bits-1) - 1]`.
    Signed,
    /// Wraparound into `[0, 2^bits - 1]`.
    Unsigned,
    /// No reduction: unbounded signed arithmetic. Decimal display only.
    Relative,
}

impl OverflowMode {
    /// Human-readable name, used in error messages and mode indicators.
    pub fn name(&self) -> &'static str {
        match self {
            OverflowMode::Signed => "signed",
            OverflowMode::Unsigned => "unsigned",
            OverflowMode::Relative => "relative",
        }
    }

    /// Whether this mode reduces results into a width-bound domain.
    #[inline]
    pub fn is_width_bound(&self) -> bool {
        !matches!(self, OverflowMode::Relative)
    }

    /// The signedness this mode imposes on a width policy.
    pub fn signedness(&self) -> bool {
        !matches!(self, OverflowMode::Unsigned)
    }
}

impl fmt::Display for OverflowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Entry/display base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    Decimal,
    Hexadecimal,
}

impl Base {
    /// Radix for digit accumulation and parsing.
    #[inline]
    pub fn radix(&self) -> u32 {
        match self {
            Base::Decimal => 10,
            Base::Hexadecimal => 16,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Base::Decimal => "decimal",
            Base::Hexadecimal => "hexadecimal",
        }
    }

    /// The other base.
    pub fn toggled(&self) -> Base {
        match self {
            Base::Decimal => Base::Hexadecimal,
            Base::Hexadecimal => Base::Decimal,
        }
    }

    /// Value of a digit character in this base, if valid.
    pub fn digit_value(&self, digit: char) -> Option<u32> {
        digit.to_digit(self.radix())
    }

    /// Short mode indicator (`DEC` / `HEX`).
    pub fn indicator(&self) -> &'static str {
        match self {
            Base::Decimal => "DEC",
            Base::Hexadecimal => "HEX",
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Map a raw mathematical result into the domain defined by a width
/// policy and overflow mode.
///
/// - `Unsigned`: floor-mod `2^bits`, always non-negative.
/// - `Signed`: floor-mod `2^bits`, then subtract `2^bits` if the result
///   exceeds the signed maximum (two's-complement reinterpretation).
/// - `Relative`: identity.
pub fn reduce(raw: &BigInt, width: WidthPolicy, mode: OverflowMode) -> BigInt {
    match mode {
        OverflowMode::Relative => raw.clone(),
        OverflowMode::Unsigned => raw.mod_floor(&width.modulus()),
        OverflowMode::Signed => {
            let modulus = width.modulus();
            let r = raw.mod_floor(&modulus);
            if r > width.with_signed(true).max_value() {
                r - modulus
            } else {
                r
            }
        }
    }
}

/// An exact integer paired with the width policy and overflow mode that
/// produced it.
///
/// Invariant: in a width-bound mode the magnitude always lies within the
/// width's domain. Operations yield new values; nothing mutates in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericValue {
    magnitude: BigInt,
    mode: OverflowMode,
    width: WidthPolicy,
}

impl NumericValue {
    /// Zero under the given policy.
    pub fn zero(width: WidthPolicy, mode: OverflowMode) -> Self {
        Self {
            magnitude: BigInt::zero(),
            mode,
            width,
        }
    }

    /// Create a value from a raw integer, reducing it immediately.
    pub fn from_bigint(raw: BigInt, width: WidthPolicy, mode: OverflowMode) -> Self {
        let magnitude = reduce(&raw, width, mode);
        Self { magnitude, mode, width }
    }

    /// Convenience constructor from a machine integer.
    pub fn from_i64(raw: i64, width: WidthPolicy, mode: OverflowMode) -> Self {
        Self::from_bigint(BigInt::from(raw), width, mode)
    }

    /// The reduced magnitude.
    #[inline]
    pub fn magnitude(&self) -> &BigInt {
        &self.magnitude
    }

    /// The overflow mode this value was produced under.
    #[inline]
    pub fn mode(&self) -> OverflowMode {
        self.mode
    }

    /// The width policy this value was produced under.
    #[inline]
    pub fn width(&self) -> WidthPolicy {
        self.width
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    /// Re-reduce the stored magnitude under a new policy.
    ///
    /// Used when the engine reconfigures width or overflow mode: the
    /// displayed value may change even though no arithmetic occurred.
    pub fn renormalized(&self, width: WidthPolicy, mode: OverflowMode) -> Self {
        Self::from_bigint(self.magnitude.clone(), width, mode)
    }

    /// The non-negative two's-complement residue of this value.
    ///
    /// For width-bound modes this is the bit pattern in `[0, 2^bits - 1]`.
    /// For Relative values the sign is kept (there is no fixed bit
    /// pattern to reinterpret).
    pub fn residue(&self) -> BigInt {
        if self.mode.is_width_bound() {
            self.magnitude.mod_floor(&self.width.modulus())
        } else {
            self.magnitude.clone()
        }
    }

    /// Parse an entry string in the given base under this policy.
    ///
    /// The string is the raw digit sequence accumulated by the entry
    /// buffer; a leading `-` is accepted so recalled Relative values can
    /// round-trip. An empty buffer parses as zero.
    pub fn parse_entry(
        entry: &str,
        base: Base,
        width: WidthPolicy,
        mode: OverflowMode,
    ) -> CalcResult<Self> {
        if entry.is_empty() || entry == "-" {
            return Ok(Self::zero(width, mode));
        }
        let raw = BigInt::from_str_radix(entry, base.radix()).map_err(|_| {
            let bad = entry
                .chars()
                .find(|c| *c != '-' && base.digit_value(*c).is_none())
                .unwrap_or('?');
            CalcError::InvalidDigit {
                digit: bad,
                base_name: base.name(),
            }
        })?;
        Ok(Self::from_bigint(raw, width, mode))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Rendering
    // ═══════════════════════════════════════════════════════════════════

    /// Decimal string (signed, per the active mode).
    pub fn to_decimal(&self) -> String {
        self.magnitude.to_string()
    }

    /// Hexadecimal string of the two's-complement residue.
    ///
    /// Relative values have no fixed-width bit pattern; negatives render
    /// as a sign-prefixed magnitude (`-0x5`).
    pub fn to_hex(&self, fmt: &FormatConfig) -> String {
        self.render_radix(16, if fmt.hex_prefix { "0x" } else { "" }, fmt.uppercase)
    }

    /// Binary string of the two's-complement residue.
    pub fn to_binary(&self, fmt: &FormatConfig) -> String {
        self.render_radix(2, if fmt.bin_prefix { "0b" } else { "" }, false)
    }

    /// Bare digit string in the given base, suitable for re-entry.
    ///
    /// Round-trips through [`NumericValue::parse_entry`] under the same
    /// policy: the rendered residue reduces back to the same magnitude.
    pub fn entry_digits(&self, base: Base) -> String {
        match base {
            Base::Decimal => {
                if self.mode.is_width_bound() {
                    self.residue().to_str_radix(10)
                } else {
                    // Relative entry carries its sign.
                    self.magnitude.to_str_radix(10)
                }
            }
            Base::Hexadecimal => self.residue().to_str_radix(16).to_uppercase(),
        }
    }

    fn render_radix(&self, radix: u32, prefix: &str, uppercase: bool) -> String {
        let residue = self.residue();
        let (sign, abs) = if residue.is_negative() {
            ("-", residue.abs())
        } else {
            ("", residue)
        };
        let digits = abs.to_str_radix(radix);
        let digits = if uppercase { digits.to_uppercase() } else { digits };
        format!("{}{}{}", sign, prefix, digits)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Operations
    // ═══════════════════════════════════════════════════════════════════

    /// Apply a binary operator, yielding a new reduced value.
    ///
    /// The result inherits this value's width policy and overflow mode.
    /// Fails without producing a value on division by zero or an invalid
    /// shift amount; callers rely on that to keep state transitions atomic.
    pub fn apply(&self, op: OperatorKind, rhs: &Self) -> CalcResult<Self> {
        let raw = match op {
            OperatorKind::Add => &self.magnitude + &rhs.magnitude,
            OperatorKind::Sub => &self.magnitude - &rhs.magnitude,
            OperatorKind::Mul => &self.magnitude * &rhs.magnitude,
            OperatorKind::Div => {
                if rhs.magnitude.is_zero() {
                    return Err(CalcError::DivisionByZero {
                        dividend: self.to_decimal(),
                    });
                }
                // BigInt division truncates toward zero.
                &self.magnitude / &rhs.magnitude
            }
            OperatorKind::Rem => {
                if rhs.magnitude.is_zero() {
                    return Err(CalcError::DivisionByZero {
                        dividend: self.to_decimal(),
                    });
                }
                &self.magnitude % &rhs.magnitude
            }
            // BigInt bitwise operators use two's-complement semantics,
            // which agree with the fixed-width result modulo 2^bits.
            OperatorKind::And => &self.magnitude & &rhs.magnitude,
            OperatorKind::Or => &self.magnitude | &rhs.magnitude,
            OperatorKind::Xor => &self.magnitude ^ &rhs.magnitude,
            OperatorKind::Shl => {
                let amount = self.shift_amount(op, rhs)?;
                self.residue() << amount
            }
            OperatorKind::Shr => {
                let amount = self.shift_amount(op, rhs)?;
                // Logical shift on the residue bit pattern; Relative
                // residues keep their sign, giving a floor shift.
                self.residue() >> amount
            }
        };
        Ok(Self::from_bigint(raw, self.width, self.mode))
    }

    /// Validate and normalize a shift amount.
    ///
    /// Amounts are taken modulo the active bit width so shifting a
    /// 128-bit value by 130 behaves as shifting by 2. Negative amounts
    /// are rejected.
    fn shift_amount(&self, op: OperatorKind, rhs: &Self) -> CalcResult<usize> {
        if rhs.magnitude.is_negative() {
            return Err(CalcError::InvalidOperand {
                operation: op.symbol(),
                operand: rhs.to_decimal(),
                reason: "shift amount must be non-negative",
            });
        }
        let bits = BigInt::from(self.width.bits());
        let amount = rhs.magnitude.mod_floor(&bits);
        // mod_floor against bits <= 128 always fits in usize.
        Ok(amount.to_usize().unwrap_or(0))
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.magnitude)
    }
}

/// Binary operators the engine resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
}

impl OperatorKind {
    /// Conventional symbol, used in history rendering and key mapping.
    pub fn symbol(&self) -> &'static str {
        match self {
            OperatorKind::Add => "+",
            OperatorKind::Sub => "-",
            OperatorKind::Mul => "*",
            OperatorKind::Div => "/",
            OperatorKind::Rem => "%",
            OperatorKind::And => "&",
            OperatorKind::Or => "|",
            OperatorKind::Xor => "^",
            OperatorKind::Shl => "<<",
            OperatorKind::Shr => ">>",
        }
    }

    /// Parse a symbol back into an operator.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(OperatorKind::Add),
            "-" => Some(OperatorKind::Sub),
            "*" => Some(OperatorKind::Mul),
            "/" => Some(OperatorKind::Div),
            "%" => Some(OperatorKind::Rem),
            "&" => Some(OperatorKind::And),
            "|" => Some(OperatorKind::Or),
            "^" => Some(OperatorKind::Xor),
            "<<" => Some(OperatorKind::Shl),
            ">>" => Some(OperatorKind::Shr),
            _ => None,
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
