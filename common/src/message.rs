//! Configuration message codec.
//!
//! Inbound configuration messages are small key-value dictionaries:
//!
//! ```text
//! count: u8
//! count x { key: u32 LE, type: u8, length: u16 LE, value: [u8; length] }
//! ```
//!
//! Types are 0 = byte array, 1 = C string, 2 = unsigned integer, 3 = signed
//! integer. Integers are 1, 2 or 4 bytes wide, little-endian. Settings are
//! carried as integers and read as `true` when non-zero; byte-array and
//! string tuples are accepted and skipped. Bytes after the last tuple are
//! ignored.

use heapless::Vec;

use crate::error::MessageError;
use crate::settings::SettingKey;

/// Maximum number of tuples in one message.
pub const MAX_TUPLES: usize = 8;

const TYPE_BYTES: u8 = 0;
const TYPE_CSTRING: u8 = 1;
const TYPE_UINT: u8 = 2;
const TYPE_INT: u8 = 3;

/// Encoded size of one tuple header (key, type, length).
const TUPLE_HEADER_LEN: usize = 4 + 1 + 2;

/// Largest message produced by [`ConfigMessage::encode`].
pub const MAX_ENCODED_LEN: usize = 1 + MAX_TUPLES * (TUPLE_HEADER_LEN + 1);

/// One key-value update from a configuration message.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Update {
    /// Wire key. May name no known setting.
    pub key: u32,
    pub value: bool,
}

impl Update {
    /// The setting this update addresses, if the key is known.
    #[inline]
    pub const fn setting(&self) -> Option<SettingKey> { SettingKey::from_key(self.key) }
}

/// Decoded configuration message: integer updates in message order.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct ConfigMessage {
    updates: Vec<Update, MAX_TUPLES>,
}

impl ConfigMessage {
    pub const fn new() -> Self { Self { updates: Vec::new() } }

    /// Message carrying a single setting.
    pub fn single(
        key: SettingKey,
        value: bool,
    ) -> Self {
        let mut msg = Self::new();
        // One update always fits
        let _ = msg.updates.push(Update {
            key: key.key(),
            value,
        });
        msg
    }

    /// Append an update.
    pub fn push(
        &mut self,
        key: u32,
        value: bool,
    ) -> Result<(), MessageError> {
        self.updates
            .push(Update { key, value })
            .map_err(|_| MessageError::TooManyTuples((MAX_TUPLES + 1) as u8))
    }

    pub fn updates(&self) -> impl Iterator<Item = Update> + '_ { self.updates.iter().copied() }

    #[inline]
    pub fn len(&self) -> usize { self.updates.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.updates.is_empty() }

    /// Decode a wire dictionary.
    pub fn decode(bytes: &[u8]) -> Result<Self, MessageError> {
        let mut reader = Reader { bytes, pos: 0 };
        let count = reader.u8()?;
        if count as usize > MAX_TUPLES {
            return Err(MessageError::TooManyTuples(count));
        }

        let mut msg = Self::new();
        for _ in 0..count {
            let key = u32::from_le_bytes(reader.array()?);
            let kind = reader.u8()?;
            let len = u16::from_le_bytes(reader.array()?);
            let value = reader.take(len as usize)?;
            let value = match kind {
                TYPE_BYTES | TYPE_CSTRING => continue,
                TYPE_UINT => decode_uint(value)? != 0,
                TYPE_INT => decode_int(value)? != 0,
                other => return Err(MessageError::UnsupportedType(other)),
            };
            // Cannot overflow: count was checked above
            let _ = msg.updates.push(Update { key, value });
        }
        Ok(msg)
    }

    /// Encode as a wire dictionary with 1-byte unsigned values.
    pub fn encode(
        &self,
        buf: &mut [u8],
    ) -> Result<usize, MessageError> {
        let needed = 1 + self.updates.len() * (TUPLE_HEADER_LEN + 1);
        if buf.len() < needed {
            return Err(MessageError::BufferTooSmall);
        }

        buf[0] = self.updates.len() as u8;
        let mut pos = 1;
        for update in self.updates.iter() {
            buf[pos..pos + 4].copy_from_slice(&update.key.to_le_bytes());
            buf[pos + 4] = TYPE_UINT;
            buf[pos + 5..pos + 7].copy_from_slice(&1u16.to_le_bytes());
            buf[pos + 7] = u8::from(update.value);
            pos += TUPLE_HEADER_LEN + 1;
        }
        Ok(pos)
    }
}

fn decode_uint(value: &[u8]) -> Result<u32, MessageError> {
    match *value {
        [a] => Ok(u32::from(a)),
        [a, b] => Ok(u32::from(u16::from_le_bytes([a, b]))),
        [a, b, c, d] => Ok(u32::from_le_bytes([a, b, c, d])),
        _ => Err(MessageError::InvalidWidth(value.len() as u16)),
    }
}

fn decode_int(value: &[u8]) -> Result<i32, MessageError> {
    match *value {
        [a] => Ok(i32::from(a as i8)),
        [a, b] => Ok(i32::from(i16::from_le_bytes([a, b]))),
        [a, b, c, d] => Ok(i32::from_le_bytes([a, b, c, d])),
        _ => Err(MessageError::InvalidWidth(value.len() as u16)),
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(
        &mut self,
        n: usize,
    ) -> Result<&'a [u8], MessageError> {
        let end = self.pos.checked_add(n).ok_or(MessageError::Truncated)?;
        let slice = self.bytes.get(self.pos..end).ok_or(MessageError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, MessageError> { Ok(self.take(1)?[0]) }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], MessageError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
