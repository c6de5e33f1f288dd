//! PPM (portable pixmap) reading.
//!
//! Decodes three-channel rasters into planar [`RgbPlanes`]. Read-only.
//!
//! # Header Handling
//!
//! The color header is parsed more loosely than the PGM one:
//!
//! - `P6` selects the binary body; any other magic is read as text.
//! - At most one `#` line is skipped before the dimensions line.
//! - Exactly one line after the dimensions is skipped, whatever it holds.
//!   A file with a comment between the dimensions and the max value
//!   therefore desynchronizes: the comment is skipped and the max value is
//!   read as sample data.
//!
//! Samples are interleaved R,G,B per pixel. Anything after the last pixel
//! is ignored.

use crate::pnm::{self, Encoding, Samples};
use crate::{FormatReader, IoError, IoResult};
use edgemap_core::{GrayRaster, RgbPlanes};
use std::io::{BufRead, Cursor, Read};
use std::path::Path;
use tracing::{debug, trace, warn};

/// Options for reading PPM files.
#[derive(Debug, Clone, Default)]
pub struct PpmReaderOptions {
    /// Largest `width * height` accepted from a header. `None` accepts any
    /// size the platform can address.
    pub max_samples: Option<usize>,
}

/// Parsed PPM header.
#[derive(Debug, Clone, Copy)]
struct PpmHeader {
    encoding: Encoding,
    width: u32,
    height: u32,
}

impl PpmHeader {
    fn read<R: BufRead>(reader: &mut R) -> IoResult<Self> {
        let magic = pnm::next_line(reader, "magic")?;
        let encoding = if magic.starts_with(b"P6") {
            Encoding::Binary
        } else {
            Encoding::Ascii
        };

        let mut line = pnm::next_line(reader, "dimensions")?;
        if pnm::is_comment(&line) {
            line = pnm::next_line(reader, "dimensions")?;
        }
        let (width, height) = pnm::parse_dimensions(&line)?;

        // Single lookahead: max value or a comment, never both.
        pnm::next_line(reader, "max value")?;

        Ok(Self {
            encoding,
            width,
            height,
        })
    }
}

/// PPM format reader.
#[derive(Debug, Clone, Default)]
pub struct PpmReader {
    options: PpmReaderOptions,
}

impl PpmReader {
    /// Creates a new PPM reader with default options.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_from<R: BufRead>(&self, reader: &mut R) -> IoResult<RgbPlanes> {
        let header = PpmHeader::read(reader)?;
        debug!(
            width = header.width,
            height = header.height,
            encoding = ?header.encoding,
            "PPM header"
        );

        let expected = pnm::checked_len(header.width, header.height, 3, self.options.max_samples)?;
        let mut body = Vec::new();
        reader.read_to_end(&mut body)?;

        let actual = Samples::new(&body, header.encoding).take(expected).count();
        if actual < expected {
            return Err(IoError::Truncated { expected, actual });
        }

        // Interleaved R,G,B: plane `k` takes every third sample from `k`.
        let plane = |k: usize| {
            GrayRaster::try_from_samples(
                header.width,
                header.height,
                Samples::new(&body, header.encoding).skip(k).step_by(3),
            )
        };
        Ok(RgbPlanes::from_planes(plane(0)?, plane(1)?, plane(2)?)?)
    }
}

impl FormatReader<PpmReaderOptions> for PpmReader {
    type Output = RgbPlanes;

    fn format_name(&self) -> &'static str {
        "PPM"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["ppm", "pnm"]
    }

    fn can_read(&self, header: &[u8]) -> bool {
        header.starts_with(b"P3") || header.starts_with(b"P6")
    }

    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<RgbPlanes> {
        let path = path.as_ref();
        trace!(path = %path.display(), "ppm::read");
        let result = crate::open(path).and_then(|mut reader| self.read_from(&mut reader));
        if let Err(e) = &result {
            warn!(path = %path.display(), error = %e, "PPM decode failed");
        }
        result
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<RgbPlanes> {
        self.read_from(&mut Cursor::new(data))
    }

    fn with_options(options: PpmReaderOptions) -> Self {
        Self { options }
    }
}

/// Reads a PPM file (`P3` or `P6`) from the given path.
///
/// Use [`RgbPlanes::into_channels`] to split the result into separate
/// red, green and blue rasters.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<RgbPlanes> {
    PpmReader::default().read(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn decode(bytes: &[u8]) -> IoResult<RgbPlanes> {
        PpmReader::new().read_from_memory(bytes)
    }

    #[test]
    fn test_binary_deinterleave() {
        let planes = decode(b"P6\n2 1\n255\n\x01\x02\x03\x04\x05\x06").unwrap();
        let (r, g, b) = planes.into_channels();
        assert_eq!(r.data(), &[1, 4]);
        assert_eq!(g.data(), &[2, 5]);
        assert_eq!(b.data(), &[3, 6]);
    }

    #[test]
    fn test_text_variant() {
        let planes = decode(b"P3\n# made by hand\n1 2\n255\n10 20 30\n40 50 60\n").unwrap();
        assert_eq!(planes.dimensions(), (1, 2));
        assert_eq!(planes.red.data(), &[10, 40]);
        assert_eq!(planes.green.data(), &[20, 50]);
        assert_eq!(planes.blue.data(), &[30, 60]);
    }

    #[test]
    fn test_unknown_magic_read_as_text() {
        let planes = decode(b"PX\n1 1\n255\n7 8 9").unwrap();
        assert_eq!(planes.blue.data(), &[9]);
    }

    #[test]
    fn test_truncated_mid_pixel() {
        let err = decode(b"P6\n2 1\n255\n\x01\x02\x03\x04\x05").unwrap_err();
        assert!(matches!(
            err,
            IoError::Truncated {
                expected: 6,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_trailing_data_ignored() {
        let planes = decode(b"P3\n1 1\n255\n1 2 3 4 5 6\n").unwrap();
        assert_eq!(planes.red.data(), &[1]);
    }

    #[test]
    fn test_zero_dimensions() {
        assert_eq!(decode(b"P6\n0 0\n255\n").unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn test_short_body_under_huge_header() {
        let err = decode(b"P6\n20000 20000\n255\n\x01\x02").unwrap_err();
        assert!(matches!(
            err,
            IoError::Truncated {
                expected: 1_200_000_000,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_max_samples_limit() {
        let reader = PpmReader::with_options(PpmReaderOptions {
            max_samples: Some(1),
        });
        assert!(reader.read_from_memory(b"P3\n1 1\n255\n1 2 3").is_ok());
        let err = reader
            .read_from_memory(b"P3\n2 1\n255\n1 2 3 4 5 6")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_second_comment_desynchronizes() {
        // The comment after the dimensions takes the single skip, so the
        // max value line becomes the first sample.
        let planes = decode(b"P3\n1 1\n# note\n255\n1 2\n").unwrap();
        assert_eq!(planes.red.data(), &[255]);
        assert_eq!(planes.green.data(), &[1]);
        assert_eq!(planes.blue.data(), &[2]);
    }
}
