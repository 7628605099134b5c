//! Cooperative scheduler tying sensors, pump and display together
//!
//! [Controller] is the only owner of mutable controller state. The main loop calls
//! [`Controller::tick`] as often as it can; every wait is an elapsed-time check against the tick's
//! timestamp, so no call ever blocks.

use embedded_hal::digital::OutputPin;
use heapless::Vec;
use ufmt::{uDisplay, uWrite, Formatter};

use crate::{
    config::Settings,
    display::{self, compose, DisplaySink, Preview, View},
    duration::{DurationSelector, Selection},
    irrigation::{Irrigation, IrrigationState},
    moisture::Percent,
    relay::Relay,
    sensor::{Channel, SensorSource},
    timer::{Millis, Timer},
};

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// An irrigation decision was taken at this moisture level
    Measured(Percent),

    /// The pump was switched on for this long
    PumpStarted(Millis),

    /// The pump was switched off
    PumpStopped,

    /// The knob selected a new pump duration and the preview opened
    OverlayOpened(Millis),

    /// The preview timed out
    OverlayClosed,
}

impl uDisplay for Event {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match *self {
            Self::Measured(percent) => ufmt::uwrite!(f, "measured {}%", percent),
            Self::PumpStarted(duration) => ufmt::uwrite!(f, "pump on for {} ms", duration),
            Self::PumpStopped => f.write_str("pump off"),
            Self::OverlayOpened(duration) => ufmt::uwrite!(f, "selected {} ms", duration),
            Self::OverlayClosed => f.write_str("preview closed"),
        }
    }
}

/// Events produced by one tick, in the order they happened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    events: Vec<Event, 5>,
}

impl Events {
    /// An empty event list
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub(crate) fn record(&mut self, event: Event) {
        // a tick yields at most two overlay events and three irrigation events
        let recorded = self.events.push(event).is_ok();
        debug_assert!(recorded, "event list overflow");
    }

    /// Recorded events
    #[must_use]
    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    /// Whether nothing happened
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<'a> IntoIterator for &'a Events {
    type Item = &'a Event;
    type IntoIter = core::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Complete controller state
#[must_use]
#[derive(Debug)]
pub struct Controller<PIN> {
    settings: Settings,

    irrigation: Irrigation<PIN>,
    selector: DurationSelector,
    percent: Percent,

    overlay: bool,
    last_menu_open: Timer,

    last_display_update: Timer,
    frame: u8,
    needs_redraw: bool,
}

impl<PIN> Controller<PIN>
where
    PIN: OutputPin,
{
    /// Construct the controller around the pump relay
    pub const fn new(settings: Settings, relay: Relay<PIN>) -> Self {
        Self {
            irrigation: Irrigation::new(
                relay,
                settings.moisture_threshold,
                settings.measurement_interval,
            ),
            selector: DurationSelector::new(
                settings.default_pump_duration,
                settings.max_pump_duration,
                settings.pot_change_threshold,
            ),
            percent: 0,

            overlay: false,
            last_menu_open: Timer::new(),

            last_display_update: Timer::new(),
            frame: 0,
            needs_redraw: true,

            settings,
        }
    }

    /// Prepare the display; call once before the first tick
    pub fn begin<D: DisplaySink>(&mut self, display: &mut D) {
        display::define_glyphs(display);
        self.needs_redraw = true;
    }

    /// Run one scheduler pass at time `now`
    ///
    /// # Errors
    /// Returns the relay pin's error if the pump could not be switched
    pub fn tick<S, D>(
        &mut self,
        now: Millis,
        sensors: &mut S,
        display: &mut D,
    ) -> Result<Events, PIN::Error>
    where
        S: SensorSource,
        D: DisplaySink,
    {
        let mut events = Events::new();

        let raw = sensors.read(Channel::Moisture);
        self.percent = self.settings.calibration.percent(raw);

        let timeout = self.settings.settings_timeout;
        if self.overlay && self.last_menu_open.fire(timeout, now) {
            self.overlay = false;
            self.needs_redraw = true;
            events.record(Event::OverlayClosed);
        }

        let pot = sensors.read(Channel::Potentiometer);
        if let Selection::Changed(duration) = self.selector.sample(pot) {
            self.overlay = true;
            self.last_menu_open.restart(now);
            self.needs_redraw = true;
            events.record(Event::OverlayOpened(duration));
        }

        let before = self.irrigation.state();
        self.irrigation
            .update(now, self.percent, self.selector.duration(), &mut events)?;
        if self.irrigation.state() != before {
            self.needs_redraw = true;
        }

        if self.last_display_update.fire(self.settings.display_interval, now) {
            self.frame = self.frame.wrapping_add(1);
            self.needs_redraw = true;
        }

        if self.needs_redraw {
            compose(&self.view()).draw(display);
            self.needs_redraw = false;
        }

        Ok(events)
    }

    /// Snapshot of everything the display shows
    pub fn view(&self) -> View {
        View {
            state: self.irrigation.state(),
            percent: self.percent,
            preview: self.overlay.then(|| Preview {
                amount: self.settings.pump_unit.amount(self.selector.duration()),
                unit: self.settings.pump_unit,
            }),
            frame: self.frame,
        }
    }

    /// Irrigation state
    pub const fn state(&self) -> IrrigationState {
        self.irrigation.state()
    }

    /// Latest moisture reading
    pub const fn percent(&self) -> Percent {
        self.percent
    }

    /// Pump duration currently selected by the knob
    pub const fn pump_duration(&self) -> Millis {
        self.selector.duration()
    }

    /// Whether the pump relay is energized
    pub const fn pump_running(&self) -> bool {
        self.irrigation.pump_running()
    }

    /// Whether the settings preview is showing
    pub const fn overlay_active(&self) -> bool {
        self.overlay
    }

    /// Active configuration
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }
}
