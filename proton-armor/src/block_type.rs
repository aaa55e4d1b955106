use std::fmt;

use crate::ArmorError;

const PGP_PREFIX: &str = "PGP ";

pub(crate) const LABEL_PUBLIC_KEY: &str = "PUBLIC KEY BLOCK";
pub(crate) const LABEL_PRIVATE_KEY: &str = "PRIVATE KEY BLOCK";
pub(crate) const LABEL_MESSAGE: &str = "MESSAGE";
pub(crate) const LABEL_SIGNATURE: &str = "SIGNATURE";
pub(crate) const LABEL_FILE: &str = "ARMORED FILE";

/// Armor block types.
///
/// The label is the text between `-----BEGIN PGP ` and `-----` on the delimiter lines.
/// Labels not known to this crate are carried verbatim in [`BlockType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// `PGP PUBLIC KEY BLOCK`
    PublicKey,
    /// `PGP PRIVATE KEY BLOCK`
    PrivateKey,
    /// `PGP MESSAGE`
    Message,
    /// `PGP SIGNATURE`
    Signature,
    /// `PGP ARMORED FILE`
    File,
    /// Any other caller supplied label, e.g. `SIGNED MESSAGE`.
    Custom(String),
}

impl BlockType {
    /// Resolves a block type from its label.
    ///
    /// Accepts both the bare label (`MESSAGE`) and the form with the `PGP ` prefix
    /// (`PGP MESSAGE`). Unknown labels resolve to [`BlockType::Custom`] and are not
    /// validated here, see [`BlockType::validate`].
    pub fn from_label(label: &str) -> Self {
        Self::from_bare_label(label.strip_prefix(PGP_PREFIX).unwrap_or(label))
    }

    fn from_bare_label(label: &str) -> Self {
        match label {
            LABEL_PUBLIC_KEY => BlockType::PublicKey,
            LABEL_PRIVATE_KEY => BlockType::PrivateKey,
            LABEL_MESSAGE => BlockType::Message,
            LABEL_SIGNATURE => BlockType::Signature,
            LABEL_FILE => BlockType::File,
            custom => BlockType::Custom(custom.to_owned()),
        }
    }

    /// The label without the `PGP ` prefix.
    pub fn label(&self) -> &str {
        match self {
            BlockType::PublicKey => LABEL_PUBLIC_KEY,
            BlockType::PrivateKey => LABEL_PRIVATE_KEY,
            BlockType::Message => LABEL_MESSAGE,
            BlockType::Signature => LABEL_SIGNATURE,
            BlockType::File => LABEL_FILE,
            BlockType::Custom(label) => label,
        }
    }

    /// The full text between the delimiter dashes, e.g. `PGP MESSAGE`.
    pub fn delimiter_text(&self) -> String {
        format!("{PGP_PREFIX}{}", self.label())
    }

    /// Checks that the label can be written on a delimiter line.
    pub fn validate(&self) -> Result<(), ArmorError> {
        let label = self.label();
        if label.trim().is_empty() || label.contains(['\r', '\n']) || label.contains("-----") {
            return Err(ArmorError::InvalidBlockType(label.to_owned()));
        }
        Ok(())
    }

    pub(crate) fn begin_line(&self) -> String {
        format!("-----BEGIN {PGP_PREFIX}{}-----", self.label())
    }

    pub(crate) fn end_line(&self) -> String {
        format!("-----END {PGP_PREFIX}{}-----", self.label())
    }

    /// Parses the inner text of a delimiter line (`PGP <LABEL>`).
    ///
    /// Returns `None` if the text is not a PGP label.
    pub(crate) fn from_delimiter_text(text: &str) -> Option<Self> {
        text.strip_prefix(PGP_PREFIX)
            .filter(|label| !label.trim().is_empty())
            .map(Self::from_bare_label)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for BlockType {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_known() {
        assert_eq!(BlockType::from_label("PUBLIC KEY BLOCK"), BlockType::PublicKey);
        assert_eq!(BlockType::from_label("PGP PRIVATE KEY BLOCK"), BlockType::PrivateKey);
        assert_eq!(BlockType::from_label("MESSAGE"), BlockType::Message);
        assert_eq!(BlockType::from_label("PGP SIGNATURE"), BlockType::Signature);
        assert_eq!(BlockType::from_label("ARMORED FILE"), BlockType::File);
    }

    #[test]
    fn test_from_label_custom() {
        assert_eq!(
            BlockType::from_label("PGP SIGNED MESSAGE"),
            BlockType::Custom("SIGNED MESSAGE".to_owned())
        );
        assert_eq!(
            BlockType::from_label("message"),
            BlockType::Custom("message".to_owned())
        );
    }

    #[test]
    fn test_delimiter_lines() {
        let typ = BlockType::Custom("SECRET NOTE".to_owned());
        assert_eq!(typ.begin_line(), "-----BEGIN PGP SECRET NOTE-----");
        assert_eq!(typ.end_line(), "-----END PGP SECRET NOTE-----");
        assert_eq!(BlockType::PublicKey.delimiter_text(), "PGP PUBLIC KEY BLOCK");
    }

    #[test]
    fn test_validate() {
        assert!(BlockType::Message.validate().is_ok());
        assert!(BlockType::Custom("  ".to_owned()).validate().is_err());
        assert!(BlockType::Custom(String::new()).validate().is_err());
        assert!(BlockType::Custom("A\nB".to_owned()).validate().is_err());
        assert!(BlockType::Custom("A-----B".to_owned()).validate().is_err());
        assert!(matches!(
            BlockType::from_label("PGP ").validate(),
            Err(ArmorError::InvalidBlockType(_))
        ));
    }

    #[test]
    fn test_from_delimiter_text() {
        assert_eq!(
            BlockType::from_delimiter_text("PGP MESSAGE"),
            Some(BlockType::Message)
        );
        assert_eq!(BlockType::from_delimiter_text("CERTIFICATE"), None);
        assert_eq!(BlockType::from_delimiter_text("PGP "), None);
        assert_eq!(
            BlockType::from_delimiter_text("PGP PGP NOTE"),
            Some(BlockType::Custom("PGP NOTE".to_owned()))
        );
    }
}
