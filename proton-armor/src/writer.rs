use std::io;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::{
    checksum::{encode_checksum, Crc24},
    ArmorError, ArmorHeaders, ArmorSettings, BlockType,
};

/// Writes the BEGIN line, the header lines and the blank separator line.
fn write_preamble(
    out: &mut String,
    block_type: &BlockType,
    headers: &ArmorHeaders,
    line_ending: &str,
) {
    out.push_str(&block_type.begin_line());
    out.push_str(line_ending);
    headers.write_lines(out, line_ending);
    out.push_str(line_ending);
}

/// Writes the checksum line and the END line.
fn write_trailer(out: &mut String, block_type: &BlockType, crc: u32, line_ending: &str) {
    out.push('=');
    out.push_str(&encode_checksum(crc));
    out.push_str(line_ending);
    out.push_str(&block_type.end_line());
    out.push_str(line_ending);
}

fn validate_inputs(
    block_type: &BlockType,
    headers: &ArmorHeaders,
    settings: &ArmorSettings,
) -> Result<(), ArmorError> {
    settings.validate()?;
    block_type.validate()?;
    headers.validate()
}

/// Armors `payload` as a whole buffer.
///
/// Produces data of the form:
/// ```skip
/// -----BEGIN PGP <TYPE>-----
/// Key: Value
///
/// <base64 body, wrapped at line_length>
/// =<crc24>
/// -----END PGP <TYPE>-----
/// ```
pub(crate) fn encode_to_string(
    payload: &[u8],
    block_type: &BlockType,
    headers: &ArmorHeaders,
    settings: &ArmorSettings,
) -> Result<String, ArmorError> {
    validate_inputs(block_type, headers, settings)?;
    let line_ending = settings.line_ending.as_str();

    // base64 grows the input by 4/3, plus line breaks and framing.
    let mut armored = String::with_capacity(payload.len() / 3 * 4 + payload.len() / 24 + 128);
    write_preamble(&mut armored, block_type, headers, line_ending);
    for line in payload.chunks(settings.bytes_per_line()) {
        STANDARD.encode_string(line, &mut armored);
        armored.push_str(line_ending);
    }
    let mut crc = Crc24::new();
    crc.update(payload);
    write_trailer(&mut armored, block_type, crc.value(), line_ending);
    Ok(armored)
}

/// Streaming armor encoder.
///
/// The BEGIN line and the headers are written on creation. Payload bytes written to
/// it are collected until a full body line is available, that line is then encoded
/// and written to the inner writer. [`ArmorWriter::finish`] must be called to emit the
/// last line, the checksum and the END line.
///
/// An encoded line the inner writer did not fully accept stays buffered and is written
/// first on the next call, so retrying after an error such as
/// [`io::ErrorKind::WouldBlock`] neither loses nor duplicates output.
///
/// The output is byte-identical to the whole-buffer encoding of the concatenated payload.
pub struct ArmorWriter<W: io::Write> {
    inner: W,
    block_type: BlockType,
    settings: ArmorSettings,
    crc: Crc24,
    /// Payload bytes of the body line under construction.
    pending: Zeroizing<Vec<u8>>,
    /// Encoded body line, `line[line_written..]` is not yet accepted by `inner`.
    line: Zeroizing<String>,
    line_written: usize,
    written: usize,
}

impl<W: io::Write> ArmorWriter<W> {
    /// Starts a new armored block on `inner`.
    pub fn new(
        mut inner: W,
        block_type: BlockType,
        headers: &ArmorHeaders,
        settings: ArmorSettings,
    ) -> Result<Self, ArmorError> {
        validate_inputs(&block_type, headers, &settings)?;
        let mut preamble = String::new();
        write_preamble(
            &mut preamble,
            &block_type,
            headers,
            settings.line_ending.as_str(),
        );
        inner.write_all(preamble.as_bytes())?;
        Ok(Self {
            inner,
            block_type,
            crc: Crc24::new(),
            pending: Zeroizing::new(Vec::with_capacity(settings.bytes_per_line())),
            line: Zeroizing::new(String::with_capacity(settings.line_length + 2)),
            line_written: 0,
            settings,
            written: 0,
        })
    }

    /// Writes the remaining body line, the checksum and the END line.
    ///
    /// Returns the inner writer.
    pub fn finish(mut self) -> Result<W, ArmorError> {
        self.write_buffered_line()?;
        if !self.pending.is_empty() {
            self.encode_pending();
            self.write_buffered_line()?;
        }
        let mut trailer = String::new();
        write_trailer(
            &mut trailer,
            &self.block_type,
            self.crc.value(),
            self.settings.line_ending.as_str(),
        );
        self.inner.write_all(trailer.as_bytes())?;
        self.inner.flush()?;
        debug!(
            "finished armored block {} with {} payload bytes",
            self.block_type, self.written
        );
        Ok(self.inner)
    }

    /// Encodes the pending payload bytes into the line buffer and wipes them.
    ///
    /// The line buffer must be empty.
    fn encode_pending(&mut self) {
        STANDARD.encode_string(&self.pending[..], &mut *self.line);
        self.line.push_str(self.settings.line_ending.as_str());
        self.line_written = 0;
        // Clears in place, the allocation is reused for the next line.
        self.pending.zeroize();
    }

    /// Writes the rest of the buffered line to the inner writer.
    fn write_buffered_line(&mut self) -> io::Result<()> {
        while self.line_written < self.line.len() {
            match self.inner.write(&self.line.as_bytes()[self.line_written..]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write armored line",
                    ));
                }
                Ok(n) => self.line_written += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
        self.line.zeroize();
        self.line_written = 0;
        Ok(())
    }
}

impl<W: io::Write> io::Write for ArmorWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let bytes_per_line = self.settings.bytes_per_line();
        let mut consumed = 0;

        while consumed < buf.len() {
            // Bytes taken in earlier iterations are reported, the error resurfaces
            // on the next call since the line stays buffered.
            if let Err(err) = self.write_buffered_line() {
                return if consumed == 0 { Err(err) } else { Ok(consumed) };
            }
            let take = (bytes_per_line - self.pending.len()).min(buf.len() - consumed);
            let chunk = &buf[consumed..consumed + take];
            self.pending.extend_from_slice(chunk);
            self.crc.update(chunk);
            self.written += take;
            consumed += take;
            if self.pending.len() == bytes_per_line {
                self.encode_pending();
            }
        }
        Ok(consumed)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.write_buffered_line()?;
        self.inner.flush()
    }
}
