// tms-core/src/model/clock.rs
// ============================================================================
// Module: TMS Clock
// Description: Time sources used to stamp newly created packs.
// Purpose: Keep wall-clock access behind a seam so tests can pin time.
// Dependencies: time
// ============================================================================

//! ## Overview
//! The engine never reads the system clock directly. Production wiring uses
//! [`SystemClock`]; tests and demos use [`ManualClock`] to produce exact
//! timestamps, including deliberate ties.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;

use time::Duration;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Clock Interface
// ============================================================================

/// Source of creation timestamps.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> OffsetDateTime;
}

/// Clock backed by the system wall clock (UTC).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

// ============================================================================
// SECTION: Manual Clock
// ============================================================================

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    /// Current instant.
    current: Mutex<OffsetDateTime>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    #[must_use]
    pub const fn new(start: OffsetDateTime) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Moves the clock to an absolute instant.
    pub fn set(&self, instant: OffsetDateTime) {
        if let Ok(mut guard) = self.current.lock() {
            *guard = instant;
        }
    }

    /// Advances the clock by `step`.
    pub fn advance(&self, step: Duration) {
        if let Ok(mut guard) = self.current.lock() {
            *guard += step;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        self.current.lock().map_or(OffsetDateTime::UNIX_EPOCH, |guard| *guard)
    }
}
