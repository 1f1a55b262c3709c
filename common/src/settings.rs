//! Persisted user settings.
//!
//! Four independent boolean flags, each keyed by a small integer that is
//! shared by the configuration messages and the settings store. Stores keep
//! the whole set as one [`SettingsRecord`], encoded with `postcard`.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Key of one setting, as used on the wire and in the store.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SettingKey {
    InvertColors = 0,
    HideSeconds = 1,
    HourlyVibe = 2,
    BluetoothVibe = 3,
}

impl SettingKey {
    /// All keys in wire order.
    pub const ALL: [Self; 4] = [Self::InvertColors, Self::HideSeconds, Self::HourlyVibe, Self::BluetoothVibe];

    /// Look up a wire key. Unknown keys yield `None`.
    pub const fn from_key(key: u32) -> Option<Self> {
        match key {
            0 => Some(Self::InvertColors),
            1 => Some(Self::HideSeconds),
            2 => Some(Self::HourlyVibe),
            3 => Some(Self::BluetoothVibe),
            _ => None,
        }
    }

    #[inline]
    pub const fn key(self) -> u32 { self as u32 }

    pub const fn name(self) -> &'static str {
        match self {
            Self::InvertColors => "invert_colors",
            Self::HideSeconds => "hide_seconds",
            Self::HourlyVibe => "hourly_vibe",
            Self::BluetoothVibe => "bluetooth_vibe",
        }
    }
}

/// Current values of the four settings. All default to `false`.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Settings {
    pub invert_colors: bool,
    pub hide_seconds: bool,
    pub hourly_vibe: bool,
    pub bluetooth_vibe: bool,
}

impl Settings {
    pub const fn get(
        &self,
        key: SettingKey,
    ) -> bool {
        match key {
            SettingKey::InvertColors => self.invert_colors,
            SettingKey::HideSeconds => self.hide_seconds,
            SettingKey::HourlyVibe => self.hourly_vibe,
            SettingKey::BluetoothVibe => self.bluetooth_vibe,
        }
    }

    pub const fn set(
        &mut self,
        key: SettingKey,
        value: bool,
    ) {
        match key {
            SettingKey::InvertColors => self.invert_colors = value,
            SettingKey::HideSeconds => self.hide_seconds = value,
            SettingKey::HourlyVibe => self.hourly_vibe = value,
            SettingKey::BluetoothVibe => self.bluetooth_vibe = value,
        }
    }

    /// Read every setting from `store`, absent keys default to `false`.
    pub fn load<S: SettingsStore + ?Sized>(store: &S) -> Self {
        let mut settings = Self::default();
        for key in SettingKey::ALL {
            settings.set(key, store.read_bool(key).unwrap_or(false));
        }
        settings
    }
}

// =============================================================================
// Store
// =============================================================================

/// Persistent key-value storage for the settings.
pub trait SettingsStore {
    /// Stored value of `key`, `None` if it was never written.
    fn read_bool(
        &self,
        key: SettingKey,
    ) -> Option<bool>;

    /// Persist `value` for `key` before returning.
    fn write_bool(
        &mut self,
        key: SettingKey,
        value: bool,
    ) -> Result<(), Error>;
}

/// Encoded size of a [`SettingsRecord`]: one tag byte and one value byte per key.
pub const RECORD_SIZE: usize = 2 * SettingKey::ALL.len();

/// Every stored setting, as written to a backing medium.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
pub struct SettingsRecord([Option<bool>; 4]);

impl SettingsRecord {
    #[inline]
    pub const fn get(
        &self,
        key: SettingKey,
    ) -> Option<bool> {
        self.0[key as usize]
    }

    #[inline]
    pub const fn set(
        &mut self,
        key: SettingKey,
        value: bool,
    ) {
        self.0[key as usize] = Some(value);
    }

    /// Decode a stored record. Unreadable bytes (erased flash, a truncated or
    /// foreign file) decode as an empty record.
    pub fn decode(bytes: &[u8]) -> Self {
        match postcard::from_bytes(bytes) {
            Ok(record) => record,
            Err(e) => {
                if !bytes.is_empty() {
                    warn!("Settings record unreadable ({e:?}), starting empty");
                }
                Self::default()
            }
        }
    }

    /// Encode into `buf`, returning the used length.
    pub fn encode(
        &self,
        buf: &mut [u8; RECORD_SIZE],
    ) -> Result<usize, Error> {
        postcard::to_slice(self, buf)
            .map(|used| used.len())
            .map_err(|_| Error::Storage)
    }
}

/// In-memory store. Used by tests and as a fallback when no medium exists.
#[derive(Default, Debug)]
pub struct MemoryStore {
    record: SettingsRecord,
    writes: usize,
    fail_writes: bool,
}

impl MemoryStore {
    pub const fn new() -> Self {
        Self {
            record: SettingsRecord([None; 4]),
            writes: 0,
            fail_writes: false,
        }
    }

    /// Store pre-filled from a record.
    pub const fn with_record(record: SettingsRecord) -> Self {
        Self {
            record,
            writes: 0,
            fail_writes: false,
        }
    }

    #[inline]
    pub const fn record(&self) -> SettingsRecord { self.record }

    /// Number of successful writes so far.
    #[inline]
    pub const fn writes(&self) -> usize { self.writes }

    /// Make every following write fail with [`Error::Storage`].
    pub const fn set_fail_writes(
        &mut self,
        fail: bool,
    ) {
        self.fail_writes = fail;
    }
}

impl SettingsStore for MemoryStore {
    fn read_bool(
        &self,
        key: SettingKey,
    ) -> Option<bool> {
        self.record.get(key)
    }

    fn write_bool(
        &mut self,
        key: SettingKey,
        value: bool,
    ) -> Result<(), Error> {
        if self.fail_writes {
            return Err(Error::Storage);
        }
        self.record.set(key, value);
        self.writes += 1;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
