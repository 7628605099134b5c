//! Potentiometer-selected pump duration

use crate::{sensor::ADC_MAX, timer::Millis};

/// Outcome of sampling the duration knob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Knob movement stayed within the noise threshold
    Unchanged,

    /// Knob moved far enough to select a new duration
    Changed(Millis),
}

/// Unit in which a selected duration is previewed to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpUnit {
    /// Whole seconds of pump run time
    Seconds,

    /// Approximate water volume given the pump's measured flow rate
    Millilitres {
        /// Flow rate in millilitres per second of run time
        per_second: u16,
    },
}

impl PumpUnit {
    /// Express `duration` in this unit, rounding down
    #[must_use]
    pub const fn amount(self, duration: Millis) -> u32 {
        match self {
            Self::Seconds => duration / 1000,
            Self::Millilitres { per_second } => {
                (duration as u64 * per_second as u64 / 1000) as u32
            }
        }
    }

    /// Text shown before the amount
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Seconds => "Pump time: ",
            Self::Millilitres { .. } => "Volume: ",
        }
    }

    /// Text shown after the amount
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Seconds => "s",
            Self::Millilitres { .. } => "ml",
        }
    }
}

/// Maps the knob position onto a pump duration, ignoring jitter below a threshold
#[derive(Debug, Clone)]
pub struct DurationSelector {
    previous: Option<u16>,
    duration: Millis,
    max: Millis,
    threshold: u16,
}

impl DurationSelector {
    /// Create a selector holding `initial` until the knob is first sampled
    #[must_use]
    pub const fn new(initial: Millis, max: Millis, threshold: u16) -> Self {
        Self {
            previous: None,
            duration: initial,
            max,
            threshold,
        }
    }

    /// Linear map of a raw reading onto `[0, max]`; readings above full scale saturate
    #[must_use]
    pub fn scale(&self, raw: u16) -> Millis {
        let raw = raw.min(ADC_MAX);
        (u64::from(raw) * u64::from(self.max) / u64::from(ADC_MAX)) as Millis
    }

    /// Take a knob reading
    ///
    /// The first reading only establishes the baseline. Afterwards a move of at least the
    /// threshold away from the last accepted reading selects a new duration.
    pub fn sample(&mut self, raw: u16) -> Selection {
        let Some(previous) = self.previous else {
            self.previous = Some(raw);
            self.duration = self.scale(raw);
            return Selection::Unchanged;
        };

        if raw.abs_diff(previous) < self.threshold {
            return Selection::Unchanged;
        }

        self.previous = Some(raw);
        self.duration = self.scale(raw);
        Selection::Changed(self.duration)
    }

    /// Currently selected duration
    #[must_use]
    pub const fn duration(&self) -> Millis {
        self.duration
    }
}
