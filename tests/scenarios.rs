//! End-to-end runs of the controller against simulated hardware

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use irrigator::{
    config::Settings,
    display::{DisplaySink, Glyph},
    duration::PumpUnit,
    Calibration, Channel, Controller, Event, IrrigationState, Millis, Polarity, Relay,
    SensorSource,
};

#[derive(Debug, Default)]
struct Pin;

impl ErrorType for Pin {
    type Error = Infallible;
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct Probe {
    moisture: u16,
    pot: u16,
}

impl SensorSource for Probe {
    fn read(&mut self, channel: Channel) -> u16 {
        match channel {
            Channel::Moisture => self.moisture,
            Channel::Potentiometer => self.pot,
        }
    }
}

/// Records every draw call as text so runs can be compared
#[derive(Debug, Default, PartialEq, Eq)]
struct Transcript {
    lines: Vec<String>,
}

impl DisplaySink for Transcript {
    fn set_cursor(&mut self, col: u8, row: u8) {
        self.lines.push(format!("cursor {col},{row}"));
    }

    fn write_text(&mut self, text: &str) {
        self.lines.push(format!("text {text:?}"));
    }

    fn write_glyph(&mut self, glyph: Glyph) {
        self.lines.push(format!("glyph {glyph:?}"));
    }

    fn define_glyph(&mut self, glyph: Glyph, bitmap: [u8; 8]) {
        self.lines.push(format!("define {glyph:?} {bitmap:?}"));
    }

    fn clear_region(&mut self, col: u8, row: u8, width: u8) {
        self.lines.push(format!("clear {col},{row} x{width}"));
    }
}

/// Knob reading `n` selects `n * 100` ms
fn settings() -> Settings {
    Settings {
        calibration: Calibration::new(440, 828),
        max_pump_duration: 102_300,
        pump_unit: PumpUnit::Seconds,
        ..Settings::new()
    }
}

fn controller() -> Controller<Pin> {
    let relay = Relay::new(Pin, Polarity::ActiveHigh).unwrap();
    Controller::new(settings(), relay)
}

/// Drive a controller through `inputs`, returning every event with its timestamp
fn run(
    inputs: &[(Millis, Probe)],
    display: &mut Transcript,
) -> (Controller<Pin>, Vec<(Millis, Event)>) {
    let mut controller = controller();
    controller.begin(display);

    let mut log = Vec::new();
    for &(now, mut probe) in inputs {
        let events = controller.tick(now, &mut probe, display).unwrap();
        log.extend(events.as_slice().iter().map(|&event| (now, event)));
    }
    (controller, log)
}

#[test]
fn dry_plant_is_watered_then_rechecked() {
    let dry = Probe {
        moisture: 828,
        pot: 30,
    };
    let watered = Probe {
        moisture: 520,
        pot: 30,
    };

    let mut inputs = vec![(0, dry)];
    inputs.extend((1..=3_000).map(|now| (now, dry)));
    inputs.extend((3_001..=60_000).step_by(1_000).map(|now| (now, watered)));
    inputs.push((60_000, watered));

    let (controller, log) = run(&inputs, &mut Transcript::default());

    assert_eq!(
        log,
        vec![
            (0, Event::Measured(0)),
            (0, Event::PumpStarted(3_000)),
            (3_000, Event::PumpStopped),
            (60_000, Event::Measured(79)),
        ],
        "one watering cycle, then a happy measurement"
    );
    assert_eq!(controller.state(), IrrigationState::IdleHappy, "plant recovered");
    assert!(!controller.pump_running(), "pump idle");
}

#[test]
fn identical_inputs_give_identical_runs() {
    let inputs: Vec<(Millis, Probe)> = (0..20_000u32)
        .step_by(37)
        .map(|now| {
            let moisture = if now < 9_000 { 828 } else { 500 };
            let pot = if (4_000..4_500).contains(&now) { 700 } else { 30 };
            (now, Probe { moisture, pot })
        })
        .collect();

    let mut first = Transcript::default();
    let mut second = Transcript::default();
    let (_, first_log) = run(&inputs, &mut first);
    let (_, second_log) = run(&inputs, &mut second);

    assert_eq!(first_log, second_log, "same events");
    assert_eq!(first, second, "same draw calls");
    assert!(
        first_log.contains(&(4_033, Event::OverlayOpened(70_000))),
        "knob turn noticed: {first_log:?}"
    );
}

#[test]
fn watering_spans_clock_rollover() {
    let mut dry = Probe {
        moisture: 828,
        pot: 30,
    };
    let start = Millis::MAX - 1_499;

    let mut controller = controller();
    let mut display = Transcript::default();
    controller.begin(&mut display);

    controller.tick(start, &mut dry, &mut display).unwrap();
    assert!(controller.pump_running(), "started before rollover");

    // 1500 ms before the wrap, 1499 after: one short of the duration
    controller.tick(1_499, &mut dry, &mut display).unwrap();
    assert!(controller.pump_running(), "still running after rollover");

    let events = controller.tick(1_500, &mut dry, &mut display).unwrap();
    assert_eq!(events.as_slice(), &[Event::PumpStopped], "stopped on time");
}

#[test]
fn display_starts_with_glyph_definitions() {
    let mut display = Transcript::default();
    let _ = run(&[(0, Probe { moisture: 600, pot: 0 })], &mut display);

    assert!(display.lines[0].starts_with("define Heart"), "{:?}", display.lines);
    assert!(display.lines[1].starts_with("define Smile"), "{:?}", display.lines);
    assert!(
        display.lines.contains(&"text \"Happy plant \"".to_owned()),
        "status drawn: {:?}",
        display.lines
    );
}
