//! Compile-time configuration

use crate::{
    duration::PumpUnit,
    moisture::{Calibration, Percent},
    relay::Polarity,
    timer::Millis,
};

/// Raw probe reading in a glass of water
pub const WET_READING: u16 = 440;
/// Raw probe reading in open air
pub const DRY_READING: u16 = 828;

/// Water when moisture is at or below this percentage
pub const MOISTURE_THRESHOLD: Percent = 20;

/// Interval between irrigation decisions; probes react slowly, so keep this long
pub const MEASUREMENT_INTERVAL: Millis = 60_000;
/// Interval between display refreshes, which also paces the watering animation
pub const DISPLAY_INTERVAL: Millis = 1_000;

/// Minimum knob movement, in raw ADC steps, that counts as a new selection
pub const POT_CHANGE_THRESHOLD: u16 = 100;
/// Pump run time with the knob turned fully clockwise
pub const MAX_PUMP_DURATION: Millis = 90_000;
/// Pump run time until the knob is first read
pub const DEFAULT_PUMP_DURATION: Millis = 3_000;
/// How long the settings preview stays up after the knob moves
pub const SETTINGS_TIMEOUT: Millis = 3_000;

/// How the selected run time is previewed
pub const PUMP_UNIT: PumpUnit = PumpUnit::Seconds;
/// Relay board input polarity
pub const RELAY_POLARITY: Polarity = Polarity::ActiveHigh;

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Probe calibration endpoints
    pub calibration: Calibration,
    /// Watering threshold in percent
    pub moisture_threshold: Percent,
    /// Interval between irrigation decisions
    pub measurement_interval: Millis,
    /// Interval between display refreshes
    pub display_interval: Millis,
    /// Knob noise threshold in raw ADC steps
    pub pot_change_threshold: u16,
    /// Longest selectable pump run time
    pub max_pump_duration: Millis,
    /// Pump run time before the knob is read
    pub default_pump_duration: Millis,
    /// Lifetime of the settings preview
    pub settings_timeout: Millis,
    /// Preview unit
    pub pump_unit: PumpUnit,
}

impl Settings {
    /// Settings built from the compile-time constants in this module
    pub const fn new() -> Self {
        Self {
            calibration: Calibration::new(WET_READING, DRY_READING),
            moisture_threshold: MOISTURE_THRESHOLD,
            measurement_interval: MEASUREMENT_INTERVAL,
            display_interval: DISPLAY_INTERVAL,
            pot_change_threshold: POT_CHANGE_THRESHOLD,
            max_pump_duration: MAX_PUMP_DURATION,
            default_pump_duration: DEFAULT_PUMP_DURATION,
            settings_timeout: SETTINGS_TIMEOUT,
            pump_unit: PUMP_UNIT,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
