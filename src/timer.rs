//! Elapsed-time gates over a wrapping millisecond clock
//!
//! Nothing here ever compares two timestamps directly; only the wrapping difference between
//! them is inspected, which keeps every gate correct when the clock rolls over to zero.

/// Milliseconds since reset according to the board clock; wraps after `u32::MAX`
pub type Millis = u32;

/// Unsigned tick counters that wrap on overflow
pub trait Ticks: Copy + Ord {
    /// Ticks from `earlier` to `self`, modulo the counter's range
    #[must_use]
    fn since(self, earlier: Self) -> Self;
}

macro_rules! impl_ticks {
    ($($ty:ty),*) => {
        $(
            impl Ticks for $ty {
                fn since(self, earlier: Self) -> Self {
                    self.wrapping_sub(earlier)
                }
            }
        )*
    };
}

impl_ticks!(u8, u16, u32, u64);

/// Report whether `interval` has passed between `last` and `now`
///
/// Returns the firing decision and the timestamp to keep: `now` if the gate fired, otherwise
/// `last` unchanged
#[must_use]
pub fn elapsed<T: Ticks>(last: T, interval: T, now: T) -> (bool, T) {
    if now.since(last) >= interval {
        (true, now)
    } else {
        (false, last)
    }
}

/// A single timestamp, advanced only when its gate fires or it is explicitly restarted
///
/// A timer that has never fired is due immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer<T = Millis> {
    last: Option<T>,
}

impl<T: Ticks> Timer<T> {
    /// Create a timer which fires on its first check
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Begin a fresh period at `now`
    pub fn restart(&mut self, now: T) {
        self.last = Some(now);
    }

    /// Check the gate, moving the timestamp to `now` if `interval` has passed
    pub fn fire(&mut self, interval: T, now: T) -> bool {
        let Some(last) = self.last else {
            self.last = Some(now);
            return true;
        };

        let (fired, last) = elapsed(last, interval, now);
        self.last = Some(last);
        fired
    }

    /// Timestamp of the last firing or restart
    #[cfg(test)]
    pub const fn last(&self) -> Option<T> {
        self.last
    }
}

impl<T: Ticks> Default for Timer<T> {
    fn default() -> Self {
        Self::new()
    }
}
