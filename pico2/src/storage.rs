//! Settings persisted in two alternating flash sectors.
//!
//! Slot layout: `[MAGIC, seq, len, record[..len]]` where `record` is the
//! `postcard`-encoded [`SettingsRecord`] and `seq` counts writes (wrapping).
//! A slot without the magic byte (erased flash reads `0xFF`) holds no
//! settings. Each write erases the slot not holding the current record and
//! programs the new image there, magic byte last, so a failed or torn write
//! leaves the previous slot as the newest valid one.
//!
//! The medium is abstracted behind [`SettingsFlash`] so the store runs on the
//! host against RAM sectors.

use core::fmt::Debug;

use log::{debug, warn};
use watchface_common::settings::RECORD_SIZE;
use watchface_common::{Error, SettingKey, SettingsRecord, SettingsStore};

/// Marks a completely programmed slot.
pub const MAGIC: u8 = 0x57;

/// Header bytes before the record.
const HEADER_LEN: usize = 3;

/// Bytes read and programmed per access.
pub const IMAGE_LEN: usize = HEADER_LEN + RECORD_SIZE;

/// Raw access to the sectors holding the settings.
pub trait SettingsFlash {
    type Error: Debug;

    fn read(
        &mut self,
        offset: u32,
        buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Erase the sector starting at `offset`.
    fn erase_sector(
        &mut self,
        offset: u32,
    ) -> Result<(), Self::Error>;

    fn write(
        &mut self,
        offset: u32,
        data: &[u8],
    ) -> Result<(), Self::Error>;
}

/// A programmed slot.
#[derive(Clone, Copy)]
struct Slot {
    index: usize,
    seq: u8,
    record: SettingsRecord,
}

/// [`SettingsStore`] over two flash sectors. The newest record is cached in RAM.
pub struct FlashStore<F> {
    flash: F,
    offsets: [u32; 2],
    current: Option<Slot>,
}

impl<F: SettingsFlash> FlashStore<F> {
    /// Open the store over the sectors at `offsets`. Blank or unreadable
    /// sectors start empty.
    pub fn open(
        mut flash: F,
        offsets: [u32; 2],
    ) -> Self {
        let a = read_slot(&mut flash, offsets[0], 0);
        let b = read_slot(&mut flash, offsets[1], 1);
        let current = match (a, b) {
            (Some(a), Some(b)) => Some(if b.seq == a.seq.wrapping_add(1) { b } else { a }),
            (a, b) => a.or(b),
        };
        match current {
            Some(slot) => debug!("Settings from slot {} (seq {})", slot.index, slot.seq),
            None => debug!("Settings sectors blank"),
        }
        Self { flash, offsets, current }
    }

    #[inline]
    pub fn record(&self) -> SettingsRecord { self.current.map(|slot| slot.record).unwrap_or_default() }

    /// Give the medium back.
    pub fn into_inner(self) -> F { self.flash }

    fn program(
        &mut self,
        offset: u32,
        image: &[u8; IMAGE_LEN],
    ) -> Result<(), F::Error> {
        self.flash.erase_sector(offset)?;
        self.flash.write(offset + 1, &image[1..])?;
        self.flash.write(offset, &image[..1])
    }
}

fn read_slot<F: SettingsFlash>(
    flash: &mut F,
    offset: u32,
    index: usize,
) -> Option<Slot> {
    let mut image = [0u8; IMAGE_LEN];
    if let Err(e) = flash.read(offset, &mut image) {
        warn!("Settings slot {index} read failed: {e:?}");
        return None;
    }
    if image[0] != MAGIC {
        return None;
    }
    let len = usize::from(image[2]).min(RECORD_SIZE);
    Some(Slot {
        index,
        seq: image[1],
        record: SettingsRecord::decode(&image[HEADER_LEN..HEADER_LEN + len]),
    })
}

impl<F: SettingsFlash> SettingsStore for FlashStore<F> {
    fn read_bool(
        &self,
        key: SettingKey,
    ) -> Option<bool> {
        self.record().get(key)
    }

    fn write_bool(
        &mut self,
        key: SettingKey,
        value: bool,
    ) -> Result<(), Error> {
        let mut record = self.record();
        record.set(key, value);

        let mut encoded = [0u8; RECORD_SIZE];
        let len = record.encode(&mut encoded)?;

        let (index, seq) = match self.current {
            Some(slot) => (1 - slot.index, slot.seq.wrapping_add(1)),
            None => (0, 0),
        };

        // Unused tail stays erased
        let mut image = [0xFFu8; IMAGE_LEN];
        image[0] = MAGIC;
        image[1] = seq;
        image[2] = len as u8;
        image[HEADER_LEN..HEADER_LEN + len].copy_from_slice(&encoded[..len]);

        self.program(self.offsets[index], &image).map_err(|e| {
            warn!("Settings slot {index} write failed: {e:?}");
            Error::Storage
        })?;

        self.current = Some(Slot { index, seq, record });
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
