use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use thiserror::Error;

pub use pixveil_cipher::CipherError;

#[derive(Error, Debug)]
pub enum StegoError {
    /// Represents a payload that does not fit into the carrier, or a length that exceeds its header field
    #[error("Capacity error: {needed} bytes need to be hidden, but the carrier only holds {available} bytes")]
    FileTooLarge { needed: u64, available: u64 },

    /// Represents an unusable header, for example the unused edge mode combination
    #[error("Header is invalid, the carrier probably contains no hidden data")]
    InvalidHeader,

    /// Represents an unrecognized algorithm or edge mode name
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Represents a password given for a carrier that holds plain data
    #[error("A password was given but the hidden data is not encrypted")]
    DataNotEncrypted,

    /// Represents encrypted data found while no password was given
    #[error("The hidden data is encrypted, a password is required")]
    MissingPassword,

    /// Represents an error when decrypting the data
    #[error("Decryption error")]
    DecryptionFailed(CipherError),

    /// Represents an error when encrypting the data
    #[error("Encryption error")]
    EncryptionFailed(CipherError),

    /// Represents a failure to read or write a file.
    #[error("Cannot open or write file {path:?}")]
    FileOpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Represents a cursor that left the frame while data was still pending
    #[error("Ran out of carrier room while data was still pending")]
    OutOfRoom,

    /// Represents a frame directory that cannot be read or contains no frames
    #[error("Cannot open video frames at {0:?}")]
    VideoOpenFailed(PathBuf),

    /// Represents a failure when writing a frame of a video.
    #[error("Cannot write video frame {path:?}")]
    VideoReencodingFailed {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Represents a carrier that cannot be decoded, or frames that ended too early
    #[error("Media is invalid: {0}")]
    InvalidMedia(String),

    /// Represents a payload file that does not exist.
    #[error("File not found: {0:?}")]
    FileNotFound(PathBuf),

    /// Represents a carrier file that does not exist.
    #[error("Image not found: {0:?}")]
    ImageNotFound(PathBuf),

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError(image::ImageError),

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target set")]
    TargetNotSet,

    /// Represents an output that would overwrite the carrier frames
    #[error("Output {0:?} is the carrier itself")]
    OutputIsCarrier(PathBuf),

    #[error("API Error: Missing file")]
    MissingFile,
}

/// The flat outcome of an operation, as reported to callers outside of rust
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StegoStatus {
    Success = 0,
    FileTooLarge,
    InvalidHeader,
    DataNotEncrypted,
    DecryptionFailed,
    FileOpenFailed,
    OutOfRoom,
    VideoOpenFailed,
    VideoReencodingFailed,
    InvalidMedia,
    FileNotFound,
    ImageNotFound,
}

impl StegoStatus {
    pub fn of<T>(result: &crate::Result<T>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(e) => e.into(),
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl From<&StegoError> for StegoStatus {
    fn from(error: &StegoError) -> Self {
        match error {
            StegoError::FileTooLarge { .. } => Self::FileTooLarge,
            StegoError::InvalidHeader | StegoError::InvalidOption(_) => Self::InvalidHeader,
            StegoError::DataNotEncrypted => Self::DataNotEncrypted,
            StegoError::MissingPassword | StegoError::DecryptionFailed(_) => {
                Self::DecryptionFailed
            }
            StegoError::EncryptionFailed(_)
            | StegoError::FileOpenFailed { .. }
            | StegoError::IoError(_)
            | StegoError::ImageEncodingError(_)
            | StegoError::TargetNotSet
            | StegoError::OutputIsCarrier(_) => Self::FileOpenFailed,
            StegoError::OutOfRoom => Self::OutOfRoom,
            StegoError::VideoOpenFailed(_) => Self::VideoOpenFailed,
            StegoError::VideoReencodingFailed { .. } => Self::VideoReencodingFailed,
            StegoError::InvalidMedia(_) => Self::InvalidMedia,
            StegoError::FileNotFound(_) | StegoError::MissingFile => Self::FileNotFound,
            StegoError::ImageNotFound(_) | StegoError::CarrierNotSet => Self::ImageNotFound,
        }
    }
}

impl From<StegoError> for StegoStatus {
    fn from(error: StegoError) -> Self {
        (&error).into()
    }
}

impl Display for StegoStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "SUCCESS",
            Self::FileTooLarge => "FILE_TOO_LARGE",
            Self::InvalidHeader => "INVALID_HEADER",
            Self::DataNotEncrypted => "DATA_NOT_ENCRYPTED",
            Self::DecryptionFailed => "DECRYPTION_FAILED",
            Self::FileOpenFailed => "FILE_OPEN_FAILED",
            Self::OutOfRoom => "OUT_OF_ROOM",
            Self::VideoOpenFailed => "VIDEO_OPEN_FAILED",
            Self::VideoReencodingFailed => "VIDEO_REENCODING_FAILED",
            Self::InvalidMedia => "INVALID_MEDIA",
            Self::FileNotFound => "FILE_NOT_FOUND",
            Self::ImageNotFound => "IMAGE_NOT_FOUND",
        };
        f.write_str(name)
    }
}
