//! Analog inputs consumed by the controller

/// ADC input sampled on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Capacitive soil probe; higher readings mean drier soil
    Moisture,

    /// Pump duration knob
    Potentiometer,
}

/// Full-scale reading of the 10-bit ADC
pub const ADC_MAX: u16 = 1023;

/// Source of raw ADC readings
pub trait SensorSource {
    /// Take one raw reading from `channel`
    fn read(&mut self, channel: Channel) -> u16;
}
