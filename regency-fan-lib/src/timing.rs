//! Demodulator settings this decoder expects.
//!
//! The decoder never sees pulses. These values describe what the upstream
//! demodulator has to be configured with so that it hands over well-formed
//! 20 bit rows.

use serde::Serialize;
use std::fmt;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Modulation {
    /// On-off keying, data carried in the gap width between equal pulses.
    #[strum(to_string = "OOK_PPM")]
    OokPulsePpm,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DemodulatorProfile {
    pub name: &'static str,
    pub modulation: Modulation,
    pub frequency_mhz: f64,
    /// Gap width (µs) the demodulator treats as the short symbol
    pub short_width_us: u32,
    /// Gap width (µs) the demodulator treats as the long symbol
    pub long_width_us: u32,
    /// Silence (µs) after which the current row ends
    pub reset_limit_us: u32,
    /// Kept out of default decoder sets; a 4-bit nibble sum is a weak check
    pub disabled_by_default: bool,
}

/// Regency fan remote, 303.96 MHz.
///
/// Pulses are ~500 µs (narrow) or ~1500 µs (wide). A narrow gap is really a
/// `1` and a wide gap a `0`, so rows from a stock PPM slicer arrive inverted.
/// The reset limit is short enough that each capture yields a single row.
pub const REGENCY_FAN_PROFILE: DemodulatorProfile = DemodulatorProfile {
    name: "Regency Fan Remote (-f 303.96M)",
    modulation: Modulation::OokPulsePpm,
    frequency_mhz: 303.96,
    short_width_us: 365,
    long_width_us: 880,
    reset_limit_us: 8000,
    disabled_by_default: true,
};

impl fmt::Display for DemodulatorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} @ {:.2} MHz, short {} us, long {} us, reset {} us{}",
            self.name,
            self.modulation,
            self.frequency_mhz,
            self.short_width_us,
            self.long_width_us,
            self.reset_limit_us,
            if self.disabled_by_default { " (disabled by default)" } else { "" }
        )
    }
}
