//! Analog inputs of the irrigation board

use arduino_hal::{
    adc::AdcSettings,
    hal::port::{PC0, PC1},
    pac::ADC,
    port::{
        mode::{Analog, Floating, Input},
        Pin,
    },
    Adc,
};
use irrigator::sensor::{Channel, SensorSource};

/// The controller's complete sensory apparatus; readings are passed on unfiltered
#[must_use]
pub struct Sensorium {
    adc: Adc,

    moisture: Pin<Analog, PC0>,
    pot: Pin<Analog, PC1>,
}

impl Sensorium {
    /// Construct sensorium
    pub fn new(adc: ADC, a0: Pin<Input<Floating>, PC0>, a1: Pin<Input<Floating>, PC1>) -> Self {
        let mut adc = Adc::new(adc, AdcSettings::default());

        Self {
            moisture: a0.into_analog_input(&mut adc),
            pot: a1.into_analog_input(&mut adc),

            adc,
        }
    }
}

impl SensorSource for Sensorium {
    fn read(&mut self, channel: Channel) -> u16 {
        match channel {
            Channel::Moisture => self.moisture.analog_read(&mut self.adc),
            Channel::Potentiometer => self.pot.analog_read(&mut self.adc),
        }
    }
}
