//! This crate implements the `OpenPGP` ASCII armor (RFC 4880 §6).
//!
//! Armor wraps arbitrary `OpenPGP` packet bytes into a portable text block:
//! ```skip
//! -----BEGIN PGP MESSAGE-----
//! Comment: optional headers
//!
//! SGVsbG8=
//! =EHJM
//! -----END PGP MESSAGE-----
//! ```
//!
//! The free functions below use the default [`Armorer`] (64 characters per line, `\n` line breaks).
//! Use [`Armorer::new`] for custom [`ArmorSettings`].
//!
//! # Examples
//!
//! ```
//! let armored = proton_armor::armor_with_type(b"Hello", "MESSAGE").unwrap();
//! assert!(armored.starts_with("-----BEGIN PGP MESSAGE-----"));
//! assert_eq!(proton_armor::unarmor(&armored).unwrap(), b"Hello");
//! ```

mod armorer;
mod block;
mod block_type;
mod checksum;
mod errors;
mod headers;
mod reader;
mod settings;
mod writer;

use std::io;

pub use armorer::*;
pub use block::*;
pub use block_type::*;
pub use checksum::{crc24, Crc24};
pub use errors::*;
pub use headers::*;
pub use reader::is_armored;
pub use settings::*;
pub use writer::ArmorWriter;

/// Armors input as a public key.
pub fn armor_key(input: impl AsRef<[u8]>) -> Result<String> {
    Armorer::default().armor_public_key(input)
}

/// Armors input with the given armor type.
///
/// The armor type is a label such as `MESSAGE` or `PGP MESSAGE`, see [`BlockType::from_label`].
pub fn armor_with_type(input: impl AsRef<[u8]>, armor_type: &str) -> Result<String> {
    Armorer::default().encode(
        input,
        &BlockType::from_label(armor_type),
        &ArmorHeaders::new(),
    )
}

/// Armors input with the given armor type and `Version`/`Comment` headers.
///
/// Empty or missing headers are omitted.
pub fn armor_with_type_and_custom_headers(
    input: impl AsRef<[u8]>,
    armor_type: &str,
    version: Option<&str>,
    comment: Option<&str>,
) -> Result<String> {
    Armorer::default().encode_with_custom_headers(
        input,
        &BlockType::from_label(armor_type),
        version,
        comment,
    )
}

/// Returns a writer that armors everything written to it into `output`.
///
/// [`ArmorWriter::finish`] must be called to terminate the block.
pub fn armor_with_type_buffered<W: io::Write>(
    output: W,
    armor_type: &str,
) -> Result<ArmorWriter<W>> {
    Armorer::default().writer(output, BlockType::from_label(armor_type), &ArmorHeaders::new())
}

/// Unarmors an armored input into a byte array.
///
/// The first armored block in the input is decoded, surrounding text is ignored.
pub fn unarmor(input: &str) -> Result<Vec<u8>> {
    Armorer::default().decode(input)
}
