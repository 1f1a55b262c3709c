//! Motor timing for each vibration pattern.

use watchface_common::VibePattern;

use crate::config::{PULSE_GAP_MS, PULSE_MS};

/// One motor phase: on or off for a number of milliseconds.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MotorStep {
    pub on: bool,
    pub duration_ms: u64,
}

impl MotorStep {
    const fn on(duration_ms: u64) -> Self {
        Self {
            on: true,
            duration_ms,
        }
    }

    const fn off(duration_ms: u64) -> Self {
        Self {
            on: false,
            duration_ms,
        }
    }
}

const SHORT_PULSE: [MotorStep; 1] = [MotorStep::on(PULSE_MS)];
const DOUBLE_PULSE: [MotorStep; 3] = [MotorStep::on(PULSE_MS), MotorStep::off(PULSE_GAP_MS), MotorStep::on(PULSE_MS)];

/// Steps to play for `pattern`. The motor is off after the last step.
pub const fn steps(pattern: VibePattern) -> &'static [MotorStep] {
    match pattern {
        VibePattern::ShortPulse => &SHORT_PULSE,
        VibePattern::DoublePulse => &DOUBLE_PULSE,
    }
}

/// Short name for log output.
pub const fn pattern_name(pattern: VibePattern) -> &'static str {
    match pattern {
        VibePattern::ShortPulse => "short",
        VibePattern::DoublePulse => "double",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulses(pattern: VibePattern) -> usize { steps(pattern).iter().filter(|s| s.on).count() }

    #[test]
    fn test_pulse_counts() {
        assert_eq!(pulses(VibePattern::ShortPulse), 1);
        assert_eq!(pulses(VibePattern::DoublePulse), 2);
    }

    #[test]
    fn test_patterns_start_and_end_on() {
        for pattern in [VibePattern::ShortPulse, VibePattern::DoublePulse] {
            let s = steps(pattern);
            assert!(s[0].on);
            assert!(s[s.len() - 1].on);
            assert!(s.iter().all(|step| step.duration_ms > 0));
        }
    }
}
