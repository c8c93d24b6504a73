//! Rendering preferences for value display.

/// Configuration for rendering values to display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    /// Show a `0x` prefix on hexadecimal strings.
    pub hex_prefix: bool,
    /// Show a `0b` prefix on binary strings.
    pub bin_prefix: bool,
    /// Render hexadecimal digits in upper case.
    pub uppercase: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            hex_prefix: true,
            bin_prefix: true,
            uppercase: true,
        }
    }
}

impl FormatConfig {
    /// Bare digits only, no prefixes.
    pub fn plain() -> Self {
        Self {
            hex_prefix: false,
            bin_prefix: false,
            uppercase: true,
        }
    }
}
