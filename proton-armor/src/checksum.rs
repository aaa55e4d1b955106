//! CRC-24 armor checksum (RFC 4880 §6.1).
//!
//! The checksum is computed over the raw payload bytes and carried in the
//! armored text as `=` followed by the base64 encoding of its three big-endian bytes.
use std::hash::Hasher;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use crc24::Crc24Hasher;

use crate::{ArmorError, ArmorSegment};

/// Number of base64 characters of an encoded checksum.
pub(crate) const CHECKSUM_ENCODED_LEN: usize = 4;

const CRC24_MASK: u64 = 0x00FF_FFFF;

/// Incremental CRC-24 over payload bytes.
///
/// Feeding the payload in any number of chunks yields the same value as
/// [`crc24`] over the whole payload.
pub struct Crc24 {
    hasher: Crc24Hasher,
}

impl Crc24 {
    pub fn new() -> Self {
        Self {
            hasher: Crc24Hasher::new(),
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.hasher.write(data);
    }

    /// Returns the 24-bit checksum of all bytes fed so far.
    pub fn value(&self) -> u32 {
        u32::try_from(self.hasher.finish() & CRC24_MASK).unwrap_or_default()
    }
}

impl Default for Crc24 {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the CRC-24 of `data`.
pub fn crc24(data: &[u8]) -> u32 {
    let mut crc = Crc24::new();
    crc.update(data);
    crc.value()
}

/// Encodes a checksum to its four base64 characters, without the leading `=`.
pub(crate) fn encode_checksum(crc: u32) -> String {
    let [_, b0, b1, b2] = crc.to_be_bytes();
    STANDARD.encode([b0, b1, b2])
}

/// Decodes the base64 part of a checksum line (without the leading `=`).
pub(crate) fn decode_checksum(encoded: &str) -> Result<u32, ArmorError> {
    if encoded.len() != CHECKSUM_ENCODED_LEN {
        return Err(ArmorError::InvalidBase64(
            ArmorSegment::Checksum,
            base64::DecodeError::InvalidLength(encoded.len()),
        ));
    }
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|err| ArmorError::InvalidBase64(ArmorSegment::Checksum, err))?;
    let [b0, b1, b2] = <[u8; 3]>::try_from(bytes.as_slice()).map_err(|_| {
        ArmorError::InvalidBase64(
            ArmorSegment::Checksum,
            base64::DecodeError::InvalidLength(encoded.len()),
        )
    })?;
    Ok(u32::from_be_bytes([0, b0, b1, b2]))
}
