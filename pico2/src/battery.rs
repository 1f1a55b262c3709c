//! Battery level from the VSYS voltage.
//!
//! VSYS reaches ADC3 through a 3:1 divider. A single-cell LiPo is treated as
//! linear between [`EMPTY_MV`] and [`FULL_MV`]; readings outside the range
//! clamp to 0 % and 100 %.

/// ADC reference voltage in millivolts.
pub const ADC_REF_MV: u32 = 3300;

/// Full-scale ADC reading (12-bit).
pub const ADC_MAX: u32 = 4095;

/// VSYS divider ratio.
pub const VSYS_DIVIDER: u32 = 3;

/// Cell voltage reported as 0 %.
pub const EMPTY_MV: u32 = 3000;

/// Cell voltage reported as 100 %.
pub const FULL_MV: u32 = 4200;

const _: () = assert!(EMPTY_MV < FULL_MV);

/// Convert a raw ADC3 sample to VSYS millivolts.
#[inline]
pub const fn vsys_millivolts(raw: u16) -> u32 { raw as u32 * ADC_REF_MV * VSYS_DIVIDER / ADC_MAX }

/// Map VSYS millivolts to a battery percent, clamped to 0..=100.
pub const fn percent_from_millivolts(mv: u32) -> u8 {
    if mv <= EMPTY_MV {
        0
    } else if mv >= FULL_MV {
        100
    } else {
        ((mv - EMPTY_MV) * 100 / (FULL_MV - EMPTY_MV)) as u8
    }
}

/// Reports a battery percent only when it differs from the last report.
#[derive(Default, Debug)]
pub struct BatteryMonitor {
    last: Option<u8>,
}

impl BatteryMonitor {
    pub const fn new() -> Self { Self { last: None } }

    /// Feed a raw ADC sample. Returns the percent if it changed.
    pub fn sample(
        &mut self,
        raw: u16,
    ) -> Option<u8> {
        let percent = percent_from_millivolts(vsys_millivolts(raw));
        if self.last == Some(percent) {
            return None;
        }
        self.last = Some(percent);
        Some(percent)
    }

    /// Last reported percent.
    #[inline]
    pub const fn last(&self) -> Option<u8> { self.last }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_endpoints() {
        assert_eq!(percent_from_millivolts(0), 0);
        assert_eq!(percent_from_millivolts(EMPTY_MV), 0);
        assert_eq!(percent_from_millivolts(3600), 50);
        assert_eq!(percent_from_millivolts(FULL_MV), 100);
        assert_eq!(percent_from_millivolts(5000), 100);
    }

    #[test]
    fn test_percent_is_monotonic() {
        let mut prev = 0;
        for mv in (2500..=4500).step_by(7) {
            let p = percent_from_millivolts(mv);
            assert!(p >= prev, "{mv} mV gave {p} after {prev}");
            assert!(p <= 100);
            prev = p;
        }
    }

    #[test]
    fn test_vsys_conversion() {
        assert_eq!(vsys_millivolts(0), 0);
        assert_eq!(vsys_millivolts(ADC_MAX as u16), ADC_REF_MV * VSYS_DIVIDER);
        // ~1.4 V at the pin is ~4.2 V on VSYS
        let raw = (1400 * ADC_MAX / ADC_REF_MV) as u16;
        let mv = vsys_millivolts(raw);
        assert!((4195..=4200).contains(&mv), "{mv}");
    }

    #[test]
    fn test_monitor_reports_changes_only() {
        let mut monitor = BatteryMonitor::new();
        let full = ADC_MAX as u16;
        assert_eq!(monitor.sample(full), Some(100));
        assert_eq!(monitor.sample(full), None);
        assert_eq!(monitor.sample(0), Some(0));
        assert_eq!(monitor.last(), Some(0));
    }
}
