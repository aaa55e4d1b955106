use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, trace};
use zeroize::Zeroizing;

use crate::{
    checksum::{crc24, decode_checksum},
    ArmorBlock, ArmorError, ArmorHeaders, ArmorSegment, BlockType,
};

const DELIMITER_DASHES: &str = "-----";
const BEGIN_MARKER: &str = "-----BEGIN ";
const END_MARKER: &str = "-----END ";

/// Quick check if the input contains an armored block.
///
/// True if a `-----BEGIN PGP ` marker is followed by an `-----END PGP ` marker.
/// The block itself is not validated.
pub fn is_armored(input: &str) -> bool {
    let begin_marker = "-----BEGIN PGP ";
    let end_marker = "-----END PGP ";
    let Some(begin_index) = input.find(begin_marker) else {
        return false;
    };
    input[begin_index..].contains(end_marker)
}

/// Line cursor over the armored text.
///
/// Lines are split at `\n`, a trailing `\r` is removed so both line break styles are accepted.
struct Lines<'a> {
    inner: std::str::Split<'a, char>,
}

impl<'a> Lines<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split('\n'),
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
    }
}

/// Returns the text between `marker` and the trailing dashes of a delimiter line.
fn delimiter_text<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.trim()
        .strip_prefix(marker)
        .and_then(|rest| rest.strip_suffix(DELIMITER_DASHES))
}

/// Parse cursor position inside a located block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ReadHeaders,
    ReadBody,
    ReadChecksumOrEnd,
}

/// An armored block under construction.
struct PartialBlock {
    block_type: BlockType,
    delimiter: String,
    headers: ArmorHeaders,
    body: Zeroizing<String>,
    checksum: Option<u32>,
}

impl PartialBlock {
    /// `body_capacity` bounds the body size so the accumulator never reallocates.
    fn new(block_type: BlockType, delimiter: &str, body_capacity: usize) -> Self {
        Self {
            block_type,
            delimiter: delimiter.to_owned(),
            headers: ArmorHeaders::new(),
            body: Zeroizing::new(String::with_capacity(body_capacity)),
            checksum: None,
        }
    }

    /// Checks an END delimiter line against the BEGIN label.
    fn check_end(&self, end: &str) -> Result<(), ArmorError> {
        if end == self.delimiter {
            Ok(())
        } else {
            Err(ArmorError::LabelMismatch {
                begin: self.delimiter.clone(),
                end: end.to_owned(),
            })
        }
    }

    fn finish(self) -> Result<ArmorBlock, ArmorError> {
        let payload = STANDARD
            .decode(self.body.as_bytes())
            .map_err(|err| ArmorError::InvalidBase64(ArmorSegment::Body, err))?;
        let computed = crc24(&payload);
        match self.checksum {
            Some(expected) if expected != computed => {
                return Err(ArmorError::ChecksumMismatch { expected, computed });
            }
            Some(_) => {}
            None => debug!(
                "armored block {} has no checksum, skipping verification",
                self.block_type
            ),
        }
        Ok(ArmorBlock {
            block_type: self.block_type,
            headers: self.headers,
            payload,
        })
    }
}

/// Skips lines until a `-----BEGIN PGP <LABEL>-----` delimiter.
fn seek_begin(lines: &mut Lines<'_>, body_capacity: usize) -> Option<PartialBlock> {
    for line in lines.by_ref() {
        if let Some(text) = delimiter_text(line, BEGIN_MARKER) {
            if let Some(block_type) = BlockType::from_delimiter_text(text) {
                debug!("found armored block {block_type}");
                return Some(PartialBlock::new(block_type, text, body_capacity));
            }
        }
        trace!("skipping non-armor line");
    }
    None
}

/// Decodes the next armored block from `lines`.
///
/// Returns `Ok(None)` if no further BEGIN delimiter is found.
/// A BEGIN delimiter before the END line of the current block leaves it unterminated.
fn decode_next(
    lines: &mut Lines<'_>,
    body_capacity: usize,
) -> Result<Option<ArmorBlock>, ArmorError> {
    let Some(mut partial) = seek_begin(lines, body_capacity) else {
        return Ok(None);
    };
    let mut state = State::ReadHeaders;

    for line in lines.by_ref() {
        if let Some(end) = delimiter_text(line, END_MARKER) {
            partial.check_end(end)?;
            return partial.finish().map(Some);
        }
        if delimiter_text(line, BEGIN_MARKER).is_some() {
            return Err(ArmorError::UnterminatedBlock(partial.delimiter));
        }
        let is_blank = line.trim().is_empty();
        state = match state {
            State::ReadHeaders if is_blank => State::ReadBody,
            State::ReadHeaders => {
                partial.headers.push_line(line)?;
                State::ReadHeaders
            }
            State::ReadBody => {
                let line = line.trim();
                if let Some(checksum) = line.strip_prefix('=') {
                    partial.checksum = Some(decode_checksum(checksum)?);
                    State::ReadChecksumOrEnd
                } else {
                    partial.body.push_str(line);
                    State::ReadBody
                }
            }
            State::ReadChecksumOrEnd if is_blank => State::ReadChecksumOrEnd,
            State::ReadChecksumOrEnd => {
                return Err(ArmorError::UnterminatedBlock(partial.delimiter));
            }
        };
    }

    Err(ArmorError::UnterminatedBlock(partial.delimiter))
}

/// Decodes the first armored block found in `input`.
///
/// Text before the BEGIN delimiter and after the END delimiter is ignored.
pub(crate) fn decode_first(input: &str) -> Result<ArmorBlock, ArmorError> {
    decode_next(&mut Lines::new(input), input.len())?.ok_or(ArmorError::NoArmorFound)
}

/// Decodes every armored block in `input`, in order.
pub(crate) fn decode_all(input: &str) -> Result<Vec<ArmorBlock>, ArmorError> {
    let mut lines = Lines::new(input);
    let mut blocks = Vec::new();
    while let Some(block) = decode_next(&mut lines, input.len())? {
        blocks.push(block);
    }
    if blocks.is_empty() {
        return Err(ArmorError::NoArmorFound);
    }
    Ok(blocks)
}

#[cfg(test)]
#[path = "tests/reader.rs"]
mod tests;
