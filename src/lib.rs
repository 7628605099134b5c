//! Hardware-independent core of the plant irrigation controller
//!
//! Everything in here is driven by plain millisecond timestamps and raw ADC readings, so the
//! whole decision path runs on the host as readily as on the board. The firmware binary only
//! supplies the clock, the sensors, the relay pin and the LCD.
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod controller;
pub mod display;
pub mod duration;
pub mod irrigation;
pub mod moisture;
pub mod relay;
pub mod sensor;
pub mod timer;

#[cfg(test)]
mod mock;

pub use crate::{
    config::Settings,
    controller::{Controller, Event, Events},
    display::DisplaySink,
    irrigation::IrrigationState,
    moisture::{Calibration, Percent},
    relay::{Polarity, Relay},
    sensor::{Channel, SensorSource},
    timer::Millis,
};
