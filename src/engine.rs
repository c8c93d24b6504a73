//! The accumulator: entry, operator chaining, and result computation.
//!
//! The accumulator is the only component a front end drives directly.
//! It consumes discrete keystroke-level events, normalizes operands and
//! results through the active width policy and overflow mode, appends
//! completed operations to the history log, and reads/writes the memory
//! register on demand.
//!
//! # State machine
//!
//! ```text
//! Idle --digit--> Entering --operator--> OperatorPending --digit--> Entering
//!                                 ^                                    |
//!                                 +---- operator (resolves pending) ---+
//!                                            equals -> Idle
//! ```
//!
//! Evaluation is strict left-to-right with no precedence: when an
//! operator arrives while one is already pending against a typed
//! operand, the pending operation resolves first.
//!
//! # Atomicity
//!
//! A failed event leaves the accumulator bit-for-bit in its pre-event
//! state. Handlers compute everything fallible before touching any
//! field; the error is returned for the front end to render.

use crate::core::{
    Base, CalcError, CalcResult, FormatConfig, NumericValue, OperatorKind, OverflowMode,
    WidthPolicy,
};
use crate::history::{HistoryLog, HistoryRecord};
use crate::memory::MemoryRegister;

/// Keystroke-level input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A digit character in the active base's alphabet.
    Digit(char),
    /// A binary operator key.
    Operator(OperatorKind),
    /// Resolve the pending operation.
    Equals,
    /// Toggle hex ⇄ decimal display.
    ToggleBase,
    /// Zero the current entry, keeping the pending operation.
    ClearEntry,
    /// Full accumulator reset.
    ClearAll,
    /// Copy the current value into the memory register.
    MemoryStore,
    /// Copy the memory register into the current entry.
    MemoryRecall,
    /// Empty the memory register.
    ClearMemory,
    /// Reconfigure the bit width.
    SetWidth(u32),
    /// Reconfigure the overflow mode.
    SetOverflowMode(OverflowMode),
}

/// Which of `current`/`entry` is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// No entry in progress; `current` is authoritative.
    Idle,
    /// Digits are being typed; `entry` is authoritative and `current`
    /// mirrors it as a provisional reduced value.
    Entering,
    /// An operand and operator are committed; awaiting the second operand.
    OperatorPending,
}

/// Configuration for a fresh accumulator.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Initial bit width.
    pub bits: u32,
    /// Initial overflow mode.
    pub mode: OverflowMode,
    /// Initial entry/display base.
    pub base: Base,
    /// Rendering preferences.
    pub format: FormatConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bits: 64,
            mode: OverflowMode::Unsigned,
            base: Base::Decimal,
            format: FormatConfig::default(),
        }
    }
}

/// The calculator engine.
#[derive(Debug)]
pub struct Accumulator {
    width: WidthPolicy,
    mode: OverflowMode,
    base: Base,
    format: FormatConfig,
    current: NumericValue,
    pending_operand: Option<NumericValue>,
    pending_operator: Option<OperatorKind>,
    entry: String,
    phase: Phase,
    memory: MemoryRegister,
    history: HistoryLog,
}

impl Accumulator {
    /// Create an engine with the default configuration (64-bit unsigned,
    /// decimal entry).
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default()).expect("default config is valid")
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(config: EngineConfig) -> CalcResult<Self> {
        if config.base == Base::Hexadecimal && config.mode == OverflowMode::Relative {
            return Err(CalcError::ModeConflict {
                base_name: Base::Hexadecimal.name(),
                mode_name: OverflowMode::Relative.name(),
            });
        }
        let width = WidthPolicy::new(config.bits, config.mode.signedness())?;
        Ok(Self {
            width,
            mode: config.mode,
            base: config.base,
            format: config.format,
            current: NumericValue::zero(width, config.mode),
            pending_operand: None,
            pending_operator: None,
            entry: String::new(),
            phase: Phase::Idle,
            memory: MemoryRegister::new(),
            history: HistoryLog::new(),
        })
    }

    /// Attach a history log (e.g. one with a file sink), replacing the
    /// default in-memory log. Intended for construction time.
    pub fn set_history(&mut self, history: HistoryLog) {
        self.history = history;
    }

    // ═══════════════════════════════════════════════════════════════════
    // Event dispatch
    // ═══════════════════════════════════════════════════════════════════

    /// Process one input event to completion.
    ///
    /// On error the accumulator is unchanged and the error is returned
    /// for the front end to render.
    pub fn apply(&mut self, event: InputEvent) -> CalcResult<()> {
        match event {
            InputEvent::Digit(c) => self.on_digit(c),
            InputEvent::Operator(op) => self.on_operator(op),
            InputEvent::Equals => self.on_equals(),
            InputEvent::ToggleBase => self.on_toggle_base(),
            InputEvent::ClearEntry => {
                self.on_clear_entry();
                Ok(())
            }
            InputEvent::ClearAll => {
                self.on_clear_all();
                Ok(())
            }
            InputEvent::MemoryStore => {
                self.memory.store(self.current.clone());
                Ok(())
            }
            InputEvent::MemoryRecall => {
                self.on_memory_recall();
                Ok(())
            }
            InputEvent::ClearMemory => {
                self.memory.clear();
                Ok(())
            }
            InputEvent::SetWidth(bits) => self.on_set_width(bits),
            InputEvent::SetOverflowMode(mode) => {
                self.on_set_mode(mode);
                Ok(())
            }
        }
    }

    fn on_digit(&mut self, c: char) -> CalcResult<()> {
        if self.base.digit_value(c).is_none() {
            return Err(CalcError::InvalidDigit {
                digit: c,
                base_name: self.base.name(),
            });
        }
        // A digit after a committed operator starts the second operand.
        let mut candidate = match self.phase {
            Phase::Entering => self.entry.clone(),
            Phase::Idle | Phase::OperatorPending => String::new(),
        };
        candidate.push(c);
        let provisional =
            NumericValue::parse_entry(&candidate, self.base, self.width, self.mode)?;

        // The buffer holds the canonical digits of the reduced value, so
        // wraparound applies during entry too and base toggles round-trip.
        self.entry = provisional.entry_digits(self.base);
        self.current = provisional;
        self.phase = Phase::Entering;
        Ok(())
    }

    fn on_operator(&mut self, op: OperatorKind) -> CalcResult<()> {
        // Operator repeated with no new operand just replaces the
        // pending operator.
        if self.phase == Phase::OperatorPending {
            self.pending_operator = Some(op);
            return Ok(());
        }

        // Left-to-right chaining: a pending operation resolves against
        // the freshly committed operand before the new operator is
        // recorded.
        let committed = self.current.clone();
        let resolved = match (self.pending_operand.clone(), self.pending_operator) {
            (Some(a), Some(pending)) => {
                let result = a.apply(pending, &committed)?;
                Some((a, pending, committed.clone(), result))
            }
            _ => None,
        };

        let next = match resolved {
            Some((a, pending, b, result)) => {
                self.history
                    .append(HistoryRecord::new(a, pending, Some(b), result.clone()));
                result
            }
            None => committed,
        };

        self.current = next.clone();
        self.pending_operand = Some(next);
        self.pending_operator = Some(op);
        self.entry.clear();
        self.phase = Phase::OperatorPending;
        Ok(())
    }

    fn on_equals(&mut self) -> CalcResult<()> {
        let (a, op) = match (self.pending_operand.clone(), self.pending_operator) {
            (Some(a), Some(op)) => (a, op),
            // Nothing pending: equals just commits the entry.
            _ => {
                self.entry.clear();
                self.phase = Phase::Idle;
                return Ok(());
            }
        };

        let b = self.current.clone();
        let result = a.apply(op, &b)?;

        self.history
            .append(HistoryRecord::new(a, op, Some(b), result.clone()));
        self.current = result;
        self.pending_operand = None;
        self.pending_operator = None;
        self.entry.clear();
        self.phase = Phase::Idle;
        Ok(())
    }

    fn on_toggle_base(&mut self) -> CalcResult<()> {
        let target = self.base.toggled();
        if target == Base::Hexadecimal && self.mode == OverflowMode::Relative {
            // Hex display has no meaning without a fixed bit pattern;
            // the toggle is rejected rather than force-switching mode.
            return Err(CalcError::ModeConflict {
                base_name: target.name(),
                mode_name: self.mode.name(),
            });
        }
        self.base = target;
        if self.phase == Phase::Entering {
            // Re-render the in-progress entry in the new base; the
            // underlying magnitude is untouched.
            self.entry = self.current.entry_digits(target);
        }
        Ok(())
    }

    fn on_clear_entry(&mut self) {
        self.entry.clear();
        self.current = NumericValue::zero(self.width, self.mode);
        self.phase = if self.pending_operator.is_some() {
            Phase::OperatorPending
        } else {
            Phase::Idle
        };
    }

    fn on_clear_all(&mut self) {
        self.entry.clear();
        self.current = NumericValue::zero(self.width, self.mode);
        self.pending_operand = None;
        self.pending_operator = None;
        self.phase = Phase::Idle;
        // Memory is only emptied by an explicit ClearMemory event.
    }

    fn on_memory_recall(&mut self) {
        // Empty register: valid idle state, recall is a silent no-op.
        let recalled = match self.memory.recall() {
            Some(v) => v.clone(),
            None => return,
        };
        self.entry = recalled.entry_digits(self.base);
        self.current = recalled;
        self.phase = Phase::Entering;
    }

    fn on_set_width(&mut self, bits: u32) -> CalcResult<()> {
        let width = WidthPolicy::new(bits, self.mode.signedness())?;
        self.width = width;
        self.renormalize_all();
        Ok(())
    }

    fn on_set_mode(&mut self, mode: OverflowMode) {
        self.mode = mode;
        self.width = self.width.with_signed(mode.signedness());
        if mode == OverflowMode::Relative && self.base == Base::Hexadecimal {
            // Relative is decimal-only; forcing the mode wins over the
            // display base.
            self.base = Base::Decimal;
        }
        self.renormalize_all();
    }

    /// Re-reduce every held value under the active policy. The displayed
    /// value can change even though no arithmetic occurred; that is the
    /// point of width-bound modes.
    fn renormalize_all(&mut self) {
        self.current = self.current.renormalized(self.width, self.mode);
        if let Some(p) = self.pending_operand.take() {
            self.pending_operand = Some(p.renormalized(self.width, self.mode));
        }
        self.memory.renormalize(self.width, self.mode);
        if self.phase == Phase::Entering {
            // Reconfiguration commits the in-progress entry; the display
            // then shows the re-reduced value, not the typed digits.
            self.entry.clear();
            self.phase = if self.pending_operator.is_some() {
                Phase::OperatorPending
            } else {
                Phase::Idle
            };
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Outputs for the presentation layer
    // ═══════════════════════════════════════════════════════════════════

    /// The authoritative value.
    #[inline]
    pub fn current(&self) -> &NumericValue {
        &self.current
    }

    /// Main display string in the active base.
    ///
    /// While digits are being typed this is the raw entry buffer; once
    /// committed it is the rendered current value.
    pub fn display(&self) -> String {
        if self.phase == Phase::Entering {
            return self.entry.clone();
        }
        match self.base {
            Base::Decimal => self.current.to_decimal(),
            Base::Hexadecimal => self.current.to_hex(&self.format),
        }
    }

    /// Decimal rendering of the current value.
    pub fn decimal_string(&self) -> String {
        self.current.to_decimal()
    }

    /// Hexadecimal rendering of the current value.
    pub fn hex_string(&self) -> String {
        self.current.to_hex(&self.format)
    }

    /// Binary rendering of the current value.
    pub fn binary_string(&self) -> String {
        self.current.to_binary(&self.format)
    }

    /// The active entry/display base.
    #[inline]
    pub fn base(&self) -> Base {
        self.base
    }

    /// The active overflow mode.
    #[inline]
    pub fn mode(&self) -> OverflowMode {
        self.mode
    }

    /// The active width policy.
    #[inline]
    pub fn width(&self) -> WidthPolicy {
        self.width
    }

    /// Rendering preferences.
    #[inline]
    pub fn format(&self) -> &FormatConfig {
        &self.format
    }

    /// Update rendering preferences.
    pub fn set_format(&mut self, format: FormatConfig) {
        self.format = format;
    }

    /// Whether an operator is awaiting its second operand.
    pub fn has_pending(&self) -> bool {
        self.pending_operator.is_some()
    }

    /// The pending operator, if any.
    pub fn pending_operator(&self) -> Option<OperatorKind> {
        self.pending_operator
    }

    /// The memory register.
    #[inline]
    pub fn memory(&self) -> &MemoryRegister {
        &self.memory
    }

    /// The history log snapshot.
    #[inline]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}
