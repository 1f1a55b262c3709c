//! Error types of the watchface core.

use thiserror::Error;

use crate::images::ImageId;

/// Errors surfaced by the watchface and its host services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The compositor could not provide a bitmap for an image
    #[error("image {0:?} unavailable")]
    ResourceUnavailable(ImageId),

    /// The settings store rejected a write
    #[error("settings store write failed")]
    Storage,

    /// A configuration message could not be decoded or encoded
    #[error("config message: {0}")]
    Message(#[from] MessageError),

    /// The watchface was used before startup finished or after teardown
    #[error("watchface not started")]
    NotStarted,
}

/// Errors of the configuration message codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Input ended in the middle of a tuple
    #[error("message truncated")]
    Truncated,

    /// Tuple type byte is not one of the known types
    #[error("unsupported tuple type {0}")]
    UnsupportedType(u8),

    /// Integer tuple with a length other than 1, 2 or 4
    #[error("invalid integer width {0}")]
    InvalidWidth(u16),

    /// More tuples than a message can hold
    #[error("too many tuples ({0})")]
    TooManyTuples(u8),

    /// Output buffer too small while encoding
    #[error("output buffer too small")]
    BufferTooSmall,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_error_converts() {
        let err: Error = MessageError::Truncated.into();
        assert_eq!(err, Error::Message(MessageError::Truncated));
    }

    #[test]
    fn test_display() {
        assert_eq!(Error::Storage.to_string(), "settings store write failed");
        assert_eq!(
            Error::Message(MessageError::UnsupportedType(7)).to_string(),
            "config message: unsupported tuple type 7"
        );
        assert_eq!(
            Error::ResourceUnavailable(ImageId::Separator).to_string(),
            "image Separator unavailable"
        );
    }
}
