//! Abstractions for relay-controlled devices

use embedded_hal::digital::OutputPin;

/// A relay's powered state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    /// Off/unpowered
    Inactive,

    /// On/powered
    Active,
}

/// Input level that switches a relay module on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Driving the pin high energizes the coil
    ActiveHigh,

    /// Driving the pin low energizes the coil; common on optocoupled relay boards
    ActiveLow,
}

/// A relay controlled by a digital output pin
#[derive(Debug)]
pub struct Relay<PIN> {
    pin: PIN,
    polarity: Polarity,
    state: RelayState,
}

impl<PIN> Relay<PIN>
where
    PIN: OutputPin,
{
    /// Take ownership of the pin and drive the relay to its inactive level
    ///
    /// # Errors
    /// Returns the pin's error if it cannot be driven
    pub fn new(pin: PIN, polarity: Polarity) -> Result<Self, PIN::Error> {
        let mut relay = Self {
            pin,
            polarity,
            state: RelayState::Active,
        };
        relay.deactivate()?;
        Ok(relay)
    }

    /// Whether the relay is currently active
    pub const fn is_active(&self) -> bool {
        matches!(self.state, RelayState::Active)
    }

    /// Activate the relay
    ///
    /// # Errors
    /// Returns the pin's error if it cannot be driven
    pub fn activate(&mut self) -> Result<(), PIN::Error> {
        match self.polarity {
            Polarity::ActiveHigh => self.pin.set_high()?,
            Polarity::ActiveLow => self.pin.set_low()?,
        }
        self.state = RelayState::Active;
        Ok(())
    }

    /// Deactivate the relay
    ///
    /// # Errors
    /// Returns the pin's error if it cannot be driven
    pub fn deactivate(&mut self) -> Result<(), PIN::Error> {
        match self.polarity {
            Polarity::ActiveHigh => self.pin.set_low()?,
            Polarity::ActiveLow => self.pin.set_high()?,
        }
        self.state = RelayState::Inactive;
        Ok(())
    }

    /// Switch the relay on or off
    ///
    /// # Errors
    /// Returns the pin's error if it cannot be driven
    pub fn set_on(&mut self, on: bool) -> Result<(), PIN::Error> {
        if on {
            self.activate()
        } else {
            self.deactivate()
        }
    }

    /// Give the pin back
    #[cfg(test)]
    pub fn release(self) -> PIN {
        self.pin
    }
}
