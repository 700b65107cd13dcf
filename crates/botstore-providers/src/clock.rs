//! Version token clock
//!
//! New etags are the current UTC time in ticks (100 ns units since
//! 0001-01-01), rendered as a decimal string. The clock never hands out the
//! same or a smaller value twice within a process, even when the wall clock
//! stalls or steps back.

use crate::constants::{NANOS_PER_TICK, UNIX_EPOCH_TICKS};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static PROCESS_CLOCK: LazyLock<Arc<TickClock>> = LazyLock::new(|| Arc::new(TickClock::new()));

/// Convert a UTC instant to ticks
pub fn ticks_at(instant: DateTime<Utc>) -> u64 {
    let since_unix = instant
        .timestamp_nanos_opt()
        .map(|nanos| nanos / NANOS_PER_TICK)
        .unwrap_or_else(|| instant.timestamp_micros().saturating_mul(10));
    UNIX_EPOCH_TICKS.saturating_add_signed(since_unix)
}

/// Current UTC time in ticks
pub fn now_ticks() -> u64 {
    ticks_at(Utc::now())
}

/// Process-monotonic tick source for version tokens
#[derive(Debug, Default)]
pub struct TickClock {
    last: AtomicU64,
}

impl TickClock {
    /// Create a new clock
    ///
    /// A fresh clock only orders the tokens it issues itself. Stores should
    /// use [`TickClock::shared`] unless they own their backend exclusively.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock shared by every store in the process
    pub fn shared() -> Arc<Self> {
        Arc::clone(&PROCESS_CLOCK)
    }

    /// Next tick, strictly greater than every tick issued before
    pub fn next_tick(&self) -> u64 {
        let now = now_ticks();
        let previous = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        now.max(previous.saturating_add(1))
    }

    /// Next tick rendered as an etag
    pub fn next_token(&self) -> String {
        self.next_tick().to_string()
    }
}
