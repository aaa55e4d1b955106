use std::io;

use crate::{
    reader, writer, ArmorBlock, ArmorError, ArmorHeaders, ArmorSettings, ArmorWriter, BlockType,
};

/// Immutable armor codec.
///
/// Holds validated [`ArmorSettings`]. Every operation is a pure function of its
/// arguments, a single value can be shared between threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Armorer {
    settings: ArmorSettings,
}

impl Armorer {
    /// Creates a codec with custom settings.
    pub fn new(settings: ArmorSettings) -> Result<Self, ArmorError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &ArmorSettings {
        &self.settings
    }

    /// Armors `payload` with the given block type and headers.
    pub fn encode(
        &self,
        payload: impl AsRef<[u8]>,
        block_type: &BlockType,
        headers: &ArmorHeaders,
    ) -> Result<String, ArmorError> {
        writer::encode_to_string(payload.as_ref(), block_type, headers, &self.settings)
    }

    /// Armors `payload` with a `Version` and a `Comment` header.
    ///
    /// Headers that are `None` or empty are omitted.
    pub fn encode_with_custom_headers(
        &self,
        payload: impl AsRef<[u8]>,
        block_type: &BlockType,
        version: Option<&str>,
        comment: Option<&str>,
    ) -> Result<String, ArmorError> {
        let headers = ArmorHeaders::from_version_and_comment(version, comment);
        self.encode(payload, block_type, &headers)
    }

    /// Armors a public key.
    ///
    /// Produces data of the form:
    /// ```skip
    /// -----BEGIN PGP PUBLIC KEY BLOCK-----
    ///
    /// ...
    /// -----END PGP PUBLIC KEY BLOCK-----
    /// ```
    pub fn armor_public_key(&self, public_key: impl AsRef<[u8]>) -> Result<String, ArmorError> {
        self.encode(public_key, &BlockType::PublicKey, &ArmorHeaders::new())
    }

    /// Armors a private key.
    pub fn armor_private_key(&self, private_key: impl AsRef<[u8]>) -> Result<String, ArmorError> {
        self.encode(private_key, &BlockType::PrivateKey, &ArmorHeaders::new())
    }

    /// Armors a signature.
    pub fn armor_signature(&self, signature: impl AsRef<[u8]>) -> Result<String, ArmorError> {
        self.encode(signature, &BlockType::Signature, &ArmorHeaders::new())
    }

    /// Armors a message.
    pub fn armor_message(&self, message: impl AsRef<[u8]>) -> Result<String, ArmorError> {
        self.encode(message, &BlockType::Message, &ArmorHeaders::new())
    }

    /// Starts a streaming armored block on `output`.
    pub fn writer<W: io::Write>(
        &self,
        output: W,
        block_type: BlockType,
        headers: &ArmorHeaders,
    ) -> Result<ArmorWriter<W>, ArmorError> {
        ArmorWriter::new(output, block_type, headers, self.settings.clone())
    }

    /// Parses the first armored block in `armored`, including its headers.
    pub fn decode_block(&self, armored: &str) -> Result<ArmorBlock, ArmorError> {
        reader::decode_first(armored)
    }

    /// Parses every armored block in `armored`.
    pub fn decode_all(&self, armored: &str) -> Result<Vec<ArmorBlock>, ArmorError> {
        reader::decode_all(armored)
    }

    /// Unarmors the input and returns the payload of its first block.
    pub fn decode(&self, armored: &str) -> Result<Vec<u8>, ArmorError> {
        self.decode_block(armored).map(|block| block.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LineEnding;

    #[test]
    fn test_new_rejects_invalid_settings() {
        let result = Armorer::new(ArmorSettings::default().with_line_length(77));
        assert!(matches!(result, Err(ArmorError::InvalidLineLength(77))));
    }

    #[test]
    fn test_custom_headers_skip_empty() {
        let armorer = Armorer::default();
        let armored = armorer
            .encode_with_custom_headers(b"Hello", &BlockType::Message, Some(""), Some("hi"))
            .unwrap();
        assert!(armored.starts_with("-----BEGIN PGP MESSAGE-----\nComment: hi\n\n"));

        let armored = armorer
            .encode_with_custom_headers(b"Hello", &BlockType::Message, Some("1.0"), None)
            .unwrap();
        assert!(armored.starts_with("-----BEGIN PGP MESSAGE-----\nVersion: 1.0\n\n"));
    }

    #[test]
    fn test_custom_settings_roundtrip() {
        let armorer = Armorer::new(
            ArmorSettings::default()
                .with_line_length(76)
                .with_line_ending(LineEnding::CrLf),
        )
        .unwrap();
        let payload = vec![7_u8; 500];
        let armored = armorer.armor_private_key(&payload).unwrap();
        assert!(armored.contains("\r\n"));
        assert!(armored.lines().all(|line| line.trim_end().len() <= 76));
        assert_eq!(armorer.decode(&armored).unwrap(), payload);
    }
}
