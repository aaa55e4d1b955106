use crate::{checksum::crc24, reader, ArmorError, ArmorHeaders, Armorer, BlockType};

/// A single armored unit: its block type, the ordered armor headers and the raw payload.
///
/// The CRC-24 checksum is not stored, it is always derived from the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmorBlock {
    pub block_type: BlockType,
    pub headers: ArmorHeaders,
    pub payload: Vec<u8>,
}

impl ArmorBlock {
    pub fn new(block_type: BlockType, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            block_type,
            headers: ArmorHeaders::new(),
            payload: payload.into(),
        }
    }

    pub fn with_headers(mut self, headers: ArmorHeaders) -> Self {
        self.headers = headers;
        self
    }

    /// The CRC-24 of the payload.
    pub fn checksum(&self) -> u32 {
        crc24(&self.payload)
    }

    /// Serializes the block into armored text with the settings of `armorer`.
    pub fn encode(&self, armorer: &Armorer) -> Result<String, ArmorError> {
        armorer.encode(&self.payload, &self.block_type, &self.headers)
    }

    /// Parses the first armored block found in `input`.
    pub fn decode(input: &str) -> Result<Self, ArmorError> {
        reader::decode_first(input)
    }
}
