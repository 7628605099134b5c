//! Soil moisture normalization

/// Relative soil moisture in the range `[0,100]`
pub type Percent = u8;

/// Raw sensor readings for fully wet and fully dry soil
///
/// The probe is wired so that a lower reading means wetter soil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    wet: u16,
    dry: u16,
}

impl Calibration {
    /// Construct calibration endpoints; panics unless `wet < dry`
    #[must_use]
    pub const fn new(wet: u16, dry: u16) -> Self {
        assert!(wet < dry, "wet reading must be below dry reading");
        Self { wet, dry }
    }

    /// Raw reading of fully wet soil
    #[must_use]
    pub const fn wet(self) -> u16 {
        self.wet
    }

    /// Raw reading of fully dry soil
    #[must_use]
    pub const fn dry(self) -> u16 {
        self.dry
    }

    /// Convert a raw reading to moisture percent
    ///
    /// Readings past either endpoint saturate; halves round up.
    #[must_use]
    pub fn percent(self, raw: u16) -> Percent {
        if raw >= self.dry {
            return 0;
        }
        if raw <= self.wet {
            return 100;
        }

        // scale before dividing so exact halves stay exact
        let scaled = 100.0 * f32::from(self.dry - raw) / f32::from(self.dry - self.wet);
        (libm::roundf(scaled) as Percent).min(100)
    }
}
