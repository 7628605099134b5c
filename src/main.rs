//! Automatic plant irrigation for an Arduino Uno
//!
//! Waters a potted plant whenever its soil dries out, for as long as the knob says.
//!
//! # Pin Configuration
//!
//! - `A0` (`PC0`): capacitive soil moisture probe
//! - `A1` (`PC1`): pump duration potentiometer
//! - `D0`/`D1` (`PD0`/`PD1`): USB serial log, 57600 baud
//! - `D2` (`PD2`): pump relay
//! - `D7` (`PD7`): LCD D4
//! - `D8` (`PB0`): LCD D5
//! - `D9` (`PB1`): LCD D6
//! - `D10` (`PB2`): LCD D7
//! - `D11` (`PB3`): LCD enable
//! - `D12` (`PB4`): LCD RS
#![cfg_attr(target_arch = "avr", no_std, no_main, feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
pub mod lcd;
#[cfg(target_arch = "avr")]
pub mod millis;
#[cfg(target_arch = "avr")]
pub mod sens;

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[arduino_hal::entry]
fn main() -> ! {
    use arduino_hal::{prelude::*, Peripherals};
    use irrigator::{
        config::{self, Settings},
        Controller, Relay,
    };

    use crate::{
        lcd::Lcd,
        millis::{init_millis, millis},
        sens::Sensorium,
    };

    let periphs = Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(periphs);

    let mut serial = arduino_hal::default_serial!(periphs, pins, 57600);

    init_millis(&periphs.TC0);

    let mut sensorium = Sensorium::new(periphs.ADC, pins.a0, pins.a1);
    let mut lcd = Lcd::new(pins.d12, pins.d11, pins.d7, pins.d8, pins.d9, pins.d10);

    let relay = match Relay::new(pins.d2.into_output(), config::RELAY_POLARITY) {
        Ok(relay) => relay,
        Err(never) => match never {},
    };

    let mut controller = Controller::new(Settings::new(), relay);

    // Safety: not called inside avr_device::interrupt::free
    unsafe { avr_device::interrupt::enable() };

    lcd.init();
    controller.begin(&mut lcd);

    let settings = controller.settings();
    ufmt::uwriteln!(
        &mut serial,
        "irrigator: wet={} dry={} threshold={}% every {} ms\r",
        settings.calibration.wet(),
        settings.calibration.dry(),
        settings.moisture_threshold,
        settings.measurement_interval,
    )
    .unwrap_infallible();

    loop {
        let now = millis();

        match controller.tick(now, &mut sensorium, &mut lcd) {
            Ok(events) => {
                for event in &events {
                    ufmt::uwriteln!(&mut serial, "[{}] {}\r", now, event).unwrap_infallible();
                }
            }
            Err(never) => match never {},
        }
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("irrigator is AVR firmware; build it with an avr target, e.g. `--target avr-none`");
    std::process::exit(1);
}
