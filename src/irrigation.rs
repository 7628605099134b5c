//! Pump scheduling state machine
//!
//! Measurement and pump run time are paced by separate gates. A measurement can only start the
//! pump; only the pump timer can stop it. This keeps a freshly watered probe from being judged
//! before the water has soaked in, and keeps the pump from being re-triggered mid-cycle.

use embedded_hal::digital::OutputPin;

use crate::{
    controller::{Event, Events},
    moisture::Percent,
    relay::Relay,
    timer::{Millis, Timer},
};

/// What the plant and pump are currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IrrigationState {
    /// Soil was moist enough at the last measurement
    IdleHappy,

    /// Soil was dry, or nothing has been measured yet
    #[default]
    IdleSad,

    /// Pump is running
    Watering,
}

/// Owns the pump relay and decides when it runs
#[derive(Debug)]
pub struct Irrigation<PIN> {
    relay: Relay<PIN>,
    state: IrrigationState,

    threshold: Percent,
    measurement_interval: Millis,

    last_measurement: Timer,
    last_pump_start: Timer,
    run_for: Millis,
}

impl<PIN> Irrigation<PIN>
where
    PIN: OutputPin,
{
    /// Take control of an inactive relay
    pub const fn new(relay: Relay<PIN>, threshold: Percent, measurement_interval: Millis) -> Self {
        Self {
            relay,
            state: IrrigationState::IdleSad,

            threshold,
            measurement_interval,

            last_measurement: Timer::new(),
            last_pump_start: Timer::new(),
            run_for: 0,
        }
    }

    /// Advance the state machine to `now`
    ///
    /// `percent` is the current moisture and `duration` the run time to use should a pump cycle
    /// start on this tick. Transitions are appended to `events`.
    ///
    /// # Errors
    /// Returns the relay pin's error
    pub fn update(
        &mut self,
        now: Millis,
        percent: Percent,
        duration: Millis,
        events: &mut Events,
    ) -> Result<(), PIN::Error> {
        if self.state == IrrigationState::Watering
            && self.last_pump_start.fire(self.run_for, now)
        {
            self.relay.set_on(false)?;
            self.state = self.idle_state(percent);
            events.record(Event::PumpStopped);
        }

        if !self.last_measurement.fire(self.measurement_interval, now) {
            return Ok(());
        }
        events.record(Event::Measured(percent));

        if self.state == IrrigationState::Watering {
            return Ok(());
        }

        if percent <= self.threshold {
            self.relay.set_on(true)?;
            self.last_pump_start.restart(now);
            self.run_for = duration;
            self.state = IrrigationState::Watering;
            events.record(Event::PumpStarted(duration));
        } else {
            self.state = IrrigationState::IdleHappy;
        }

        Ok(())
    }

    const fn idle_state(&self, percent: Percent) -> IrrigationState {
        if percent > self.threshold {
            IrrigationState::IdleHappy
        } else {
            IrrigationState::IdleSad
        }
    }

    /// Current state
    pub const fn state(&self) -> IrrigationState {
        self.state
    }

    /// Whether the pump relay is energized
    pub const fn pump_running(&self) -> bool {
        self.relay.is_active()
    }

    /// Run time latched by the current or most recent pump cycle
    pub const fn run_for(&self) -> Millis {
        self.run_for
    }
}
