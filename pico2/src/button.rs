//! Button debounce and the setting each button toggles.
//!
//! Time-based edge detection: a level change is accepted only once the
//! debounce window since the previous accepted change has passed. Timestamps
//! are plain milliseconds so the logic runs on the host too.

use watchface_common::SettingKey;

use crate::config::DEBOUNCE_MS;

/// PIM715 buttons.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Button {
    A,
    B,
    X,
    Y,
}

impl Button {
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::X, Self::Y];

    /// Setting toggled by a press.
    pub const fn setting(self) -> SettingKey {
        match self {
            Self::A => SettingKey::InvertColors,
            Self::B => SettingKey::HideSeconds,
            Self::X => SettingKey::HourlyVibe,
            Self::Y => SettingKey::BluetoothVibe,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::X => "X",
            Self::Y => "Y",
        }
    }
}

/// Button debounce state with time-based edge detection.
pub struct ButtonState {
    was_pressed: bool,
    last_change_ms: Option<u64>,
}

impl ButtonState {
    /// Create a new button state (not pressed).
    pub const fn new() -> Self {
        Self {
            was_pressed: false,
            last_change_ms: None,
        }
    }

    /// Returns true only on the falling edge (button just pressed).
    ///
    /// Buttons are active-low, so `is_low` means pressed.
    pub fn just_pressed(
        &mut self,
        is_low: bool,
        now_ms: u64,
    ) -> bool {
        if is_low == self.was_pressed {
            return false;
        }

        // Contact bounce
        if let Some(last) = self.last_change_ms
            && now_ms.saturating_sub(last) < DEBOUNCE_MS
        {
            return false;
        }

        self.was_pressed = is_low;
        self.last_change_ms = Some(now_ms);
        is_low
    }
}

impl Default for ButtonState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
