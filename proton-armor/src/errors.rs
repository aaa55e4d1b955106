use std::{fmt, io};

use base64::DecodeError;

pub type Result<T> = std::result::Result<T, ArmorError>;

pub(crate) const ERROR_PREFIX: &str = "proton-armor";

/// The part of an armored block a base64 failure was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmorSegment {
    Body,
    Checksum,
}

impl fmt::Display for ArmorSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArmorSegment::Body => f.write_str("body"),
            ArmorSegment::Checksum => f.write_str("checksum"),
        }
    }
}

/// Errors thrown by the armor codec.
///
/// All of them are deterministic and caused by the input, retrying the same call
/// yields the same error.
#[derive(Debug, thiserror::Error)]
pub enum ArmorError {
    #[error("{ERROR_PREFIX}: Invalid armor block type: {0:?}")]
    InvalidBlockType(String),

    #[error("{ERROR_PREFIX}: Invalid armor header {key:?}: {reason}")]
    InvalidHeader { key: String, reason: &'static str },

    #[error("{ERROR_PREFIX}: No armored block found in the input")]
    NoArmorFound,

    #[error("{ERROR_PREFIX}: Malformed armor header line: {0:?}")]
    MalformedHeader(String),

    #[error("{ERROR_PREFIX}: Armored block \"{0}\" is not terminated")]
    UnterminatedBlock(String),

    #[error("{ERROR_PREFIX}: Armor end label {end:?} does not match begin label {begin:?}")]
    LabelMismatch { begin: String, end: String },

    #[error("{ERROR_PREFIX}: Invalid base64 in armor {0}: {1}")]
    InvalidBase64(ArmorSegment, DecodeError),

    #[error("{ERROR_PREFIX}: Armor checksum mismatch, expected {expected:06x}, computed {computed:06x}")]
    ChecksumMismatch { expected: u32, computed: u32 },

    #[error("{ERROR_PREFIX}: Invalid armor line length {0}, must be a multiple of 4 between 4 and 76")]
    InvalidLineLength(usize),

    #[error("{ERROR_PREFIX}: Failed to write armored data: {0}")]
    Io(#[from] io::Error),
}
