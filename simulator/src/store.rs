//! File-backed settings store.
//!
//! The whole settings record is rewritten on every change. It goes to a
//! sibling temp file first and is renamed into place, so the settings file
//! always holds a complete `postcard` record.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use watchface_common::settings::RECORD_SIZE;
use watchface_common::{Error, SettingKey, SettingsRecord, SettingsStore};

pub struct FileStore {
    path: PathBuf,
    record: SettingsRecord,
}

impl FileStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let record = match fs::read(&path) {
            Ok(bytes) => SettingsRecord::decode(&bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings file at {}, starting empty", path.display());
                SettingsRecord::default()
            }
            Err(e) => {
                warn!("Could not read {}: {e}", path.display());
                SettingsRecord::default()
            }
        };
        Self { path, record }
    }

    pub fn path(&self) -> &Path { &self.path }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn replace_file(
        &self,
        bytes: &[u8],
    ) -> io::Result<()> {
        let temp = self.temp_path();
        let result = fs::write(&temp, bytes).and_then(|()| fs::rename(&temp, &self.path));
        if result.is_err() {
            let _ = fs::remove_file(&temp);
        }
        result
    }
}

impl SettingsStore for FileStore {
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
        let mut record = self.record;
        record.set(key, value);

        let mut buf = [0u8; RECORD_SIZE];
        let len = record.encode(&mut buf)?;
        self.replace_file(&buf[..len]).map_err(|e| {
            warn!("Could not write {}: {e}", self.path.display());
            Error::Storage
        })?;

        self.record = record;
        Ok(())
    }
}
