//! Shared header and sample parsing for the PGM and PPM readers.
//!
//! Both formats start with line-oriented ASCII headers and differ only in
//! how many header lines they skip. Sample bodies are either whitespace
//! separated decimal tokens or raw bytes.

use crate::{IoError, IoResult};
use std::io::BufRead;

/// How samples are stored after the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Encoding {
    /// Whitespace-delimited decimal tokens (`P2`, `P3`).
    Ascii,
    /// One raw byte per sample (`P5`, `P6`).
    Binary,
}

/// Reads one header line, newline included, as raw bytes.
///
/// Fails with a format error at end of stream.
pub(crate) fn next_line<R: BufRead>(reader: &mut R, what: &str) -> IoResult<Vec<u8>> {
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Err(IoError::Format(format!(
            "unexpected end of header reading {what}"
        )));
    }
    Ok(line)
}

/// Returns `true` for `#` comment lines.
#[inline]
pub(crate) fn is_comment(line: &[u8]) -> bool {
    line.first() == Some(&b'#')
}

/// Parses a `"<width> <height>"` line. Trailing text is ignored.
pub(crate) fn parse_dimensions(line: &[u8]) -> IoResult<(u32, u32)> {
    let mut tokens = tokens(line);
    let mut field = || -> Option<u32> { std::str::from_utf8(tokens.next()?).ok()?.parse().ok() };
    match (field(), field()) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(IoError::Format(format!(
            "invalid dimensions line {:?}",
            String::from_utf8_lossy(line).trim_end()
        ))),
    }
}

/// Returns the sample count a header declares, `width * height * channels`.
///
/// Zero dimensions, overflow and pixel counts above `limit` are format
/// errors, so nothing is allocated for them.
pub(crate) fn checked_len(
    width: u32,
    height: u32,
    channels: usize,
    limit: Option<usize>,
) -> IoResult<usize> {
    let pixels = edgemap_core::raster::sample_count(width, height)?;
    if let Some(max) = limit.filter(|&max| pixels > max) {
        return Err(IoError::Format(format!(
            "{width}x{height} exceeds the limit of {max} pixels"
        )));
    }
    pixels
        .checked_mul(channels)
        .ok_or_else(|| IoError::Format(format!("image too large: {width}x{height}")))
}

fn tokens(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    bytes
        .split(u8::is_ascii_whitespace)
        .filter(|t| !t.is_empty())
}

/// Decodes the leading signed decimal of a text token.
///
/// Returns the value truncated to its low 8 bits and whether the whole
/// token was consumed. `12abc` yields `(12, false)`; a token with no
/// leading digits or one that overflows `i32` yields `None`.
fn parse_sample(token: &[u8]) -> Option<(u8, bool)> {
    let sign = usize::from(matches!(token.first(), Some(b'+' | b'-')));
    let digits = token[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let end = sign + digits;
    let value: i32 = std::str::from_utf8(&token[..end]).ok()?.parse().ok()?;
    Some((value as u8, end == token.len()))
}

/// Iterator over the samples of a body.
///
/// Text bodies end at the first token that does not start with a decimal
/// integer. A token with trailing garbage still yields its leading value,
/// then ends the body.
#[derive(Clone)]
pub(crate) enum Samples<'a> {
    Ascii(std::slice::Split<'a, u8, fn(&u8) -> bool>),
    Binary(std::slice::Iter<'a, u8>),
    Done,
}

impl<'a> Samples<'a> {
    pub(crate) fn new(body: &'a [u8], encoding: Encoding) -> Self {
        match encoding {
            Encoding::Ascii => Self::Ascii(body.split(u8::is_ascii_whitespace as fn(&u8) -> bool)),
            Encoding::Binary => Self::Binary(body.iter()),
        }
    }
}

impl Iterator for Samples<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let (sample, more) = match self {
            Self::Binary(bytes) => {
                let sample = bytes.next().copied();
                (sample, sample.is_some())
            }
            Self::Ascii(split) => match split.find(|t| !t.is_empty()).and_then(parse_sample) {
                Some((value, whole)) => (Some(value), whole),
                None => (None, false),
            },
            Self::Done => (None, false),
        };
        if !more {
            *self = Self::Done;
        }
        sample
    }
}
