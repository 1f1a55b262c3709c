//! Software wall clock.
//!
//! Calendar time is the boot epoch plus uptime. Each poll breaks the current
//! time down and hands it to a [`TickTracker`], which decides whether the
//! subscribed granularity is due and which units changed.

use watchface_common::{TickTime, TickTracker, TimeUnits};

pub struct SoftClock {
    epoch: u64,
    tracker: TickTracker,
}

impl SoftClock {
    /// Clock reading `epoch` (Unix seconds) at uptime zero. The boot time is
    /// treated as already rendered.
    pub fn new(epoch: u64) -> Self { Self::starting_at(epoch, 0) }

    /// Clock reading `epoch` at uptime zero, whose face was last rendered at
    /// `rendered_secs` of uptime.
    pub fn starting_at(
        epoch: u64,
        rendered_secs: u64,
    ) -> Self {
        Self {
            epoch,
            tracker: TickTracker::starting_at(TickTime::from_unix(epoch.saturating_add(rendered_secs))),
        }
    }

    /// Calendar time at `uptime_secs`.
    #[inline]
    pub fn now(
        &self,
        uptime_secs: u64,
    ) -> TickTime {
        TickTime::from_unix(self.epoch.saturating_add(uptime_secs))
    }

    /// Poll at `uptime_secs`. Returns the tick to dispatch, if one is due for
    /// `granularity`.
    pub fn poll(
        &mut self,
        uptime_secs: u64,
        granularity: TimeUnits,
    ) -> Option<(TickTime, TimeUnits)> {
        let now = self.now(uptime_secs);
        self.tracker.observe(now, granularity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
