//! Single-slot memory register.
//!
//! The register's lifecycle is independent of the accumulator: it
//! survives entry clears and full resets, and is emptied only by an
//! explicit clear-memory action. The engine re-reduces the stored value
//! whenever width or overflow mode changes, so a recall always yields a
//! value consistent with the active configuration.

use crate::core::{NumericValue, OverflowMode, WidthPolicy};

/// Single-slot store/recall register.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegister {
    slot: Option<NumericValue>,
}

impl MemoryRegister {
    /// Create an empty register.
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Whether the register holds a value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Store a value, replacing any prior one.
    pub fn store(&mut self, value: NumericValue) {
        self.slot = Some(value);
    }

    /// Read the stored value, if any.
    ///
    /// An empty register is a valid idle state, not an error; recall on
    /// empty is a no-op at the engine level.
    pub fn recall(&self) -> Option<&NumericValue> {
        self.slot.as_ref()
    }

    /// Empty the register.
    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Re-reduce the stored value under a new policy, if present.
    pub fn renormalize(&mut self, width: WidthPolicy, mode: OverflowMode) {
        if let Some(v) = self.slot.take() {
            self.slot = Some(v.renormalized(width, mode));
        }
    }
}
