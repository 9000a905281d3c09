//! Monotonic clock adapter.
//!
//! Feeds scheduler ticks (milliseconds since boot) to the runtime.
//!
//! - **`feature = "espidf"`** — wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(feature = "espidf")`** — uses `std::time::Instant` for
//!   host-side simulation.

use crate::scheduler::Tick;

pub struct MonotonicClock {
    #[cfg(not(feature = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(feature = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Milliseconds since boot (monotonic).
    #[cfg(feature = "espidf")]
    pub fn uptime_ms(&self) -> Tick {
        // SAFETY: esp_timer_get_time reads the RTC counter; no preconditions.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as Tick / 1000
    }

    /// Milliseconds since clock creation (monotonic).
    #[cfg(not(feature = "espidf"))]
    pub fn uptime_ms(&self) -> Tick {
        self.start.elapsed().as_millis() as Tick
    }
}
