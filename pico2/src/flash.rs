//! On-board QSPI flash as the settings medium.

use embassy_rp::flash::{Blocking, Error as FlashError, Flash};
use embassy_rp::peripherals::FLASH;
use watchface_pico2::storage::SettingsFlash;

use crate::config::{FLASH_SIZE, SETTINGS_SECTOR_SIZE};

/// Blocking flash driver. Execution from flash stalls while a sector is
/// erased or programmed.
pub struct BoardFlash(Flash<'static, FLASH, Blocking, FLASH_SIZE>);

impl BoardFlash {
    pub fn new(flash: Flash<'static, FLASH, Blocking, FLASH_SIZE>) -> Self { Self(flash) }
}

impl SettingsFlash for BoardFlash {
    type Error = FlashError;

    fn read(
        &mut self,
        offset: u32,
        buf: &mut [u8],
    ) -> Result<(), FlashError> {
        self.0.blocking_read(offset, buf)
    }

    fn erase_sector(
        &mut self,
        offset: u32,
    ) -> Result<(), FlashError> {
        self.0.blocking_erase(offset, offset + SETTINGS_SECTOR_SIZE)
    }

    fn write(
        &mut self,
        offset: u32,
        data: &[u8],
    ) -> Result<(), FlashError> {
        self.0.blocking_write(offset, data)
    }
}
