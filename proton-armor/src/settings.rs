use crate::ArmorError;

/// Recommended number of base64 characters per armored body line.
pub const DEFAULT_LINE_LENGTH: usize = 64;

/// RFC 4880 §6.3: lines MUST NOT exceed 76 characters.
pub const MAX_LINE_LENGTH: usize = 76;

/// Line break style used when producing armored text.
///
/// Decoding tolerates both styles independent of this setting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl AsRef<str> for LineEnding {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Represents the configuration options of the armor encoder.
///
/// The default configuration produces the armor commonly emitted by `OpenPGP`
/// implementations: 64 characters per body line and `\n` line breaks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArmorSettings {
    /// Number of base64 characters per body line.
    ///
    /// Must be a multiple of 4 so that every full line encodes a whole number of
    /// payload bytes, and at most [`MAX_LINE_LENGTH`].
    pub line_length: usize,

    /// Line break emitted after every line.
    pub line_ending: LineEnding,
}

impl Default for ArmorSettings {
    fn default() -> Self {
        Self {
            line_length: DEFAULT_LINE_LENGTH,
            line_ending: LineEnding::default(),
        }
    }
}

impl ArmorSettings {
    pub fn with_line_length(mut self, line_length: usize) -> Self {
        self.line_length = line_length;
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn validate(&self) -> Result<(), ArmorError> {
        if self.line_length == 0 || self.line_length % 4 != 0 || self.line_length > MAX_LINE_LENGTH
        {
            return Err(ArmorError::InvalidLineLength(self.line_length));
        }
        Ok(())
    }

    /// Number of payload bytes encoded on one full body line.
    pub(crate) fn bytes_per_line(&self) -> usize {
        self.line_length / 4 * 3
    }
}
