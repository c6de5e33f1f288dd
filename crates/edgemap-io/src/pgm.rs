//! PGM (portable graymap) format support.
//!
//! Reads both the text (`P2`) and binary (`P5`) variants and always writes
//! the binary variant.
//!
//! # Format Details
//!
//! ```text
//! P5                  <- magic: P2 text, P5 binary
//! # any comment       <- zero or more '#' lines
//! 640 480             <- "<width> <height>"
//! 255                 <- max value, read and ignored
//! <samples>           <- width*height decimal tokens (P2) or bytes (P5)
//! ```
//!
//! The body must hold exactly `width * height` samples. They are counted
//! before the raster is allocated, so an over-long body is rejected the
//! same way as a short one and neither commits the header's size.
//!
//! # Example
//!
//! ```rust,ignore
//! use edgemap_io::pgm;
//!
//! let raster = pgm::read("input.pgm")?;
//! pgm::write("copy.pgm", &raster)?;
//! ```

use crate::pnm::{self, Encoding, Samples};
use crate::{FormatReader, FormatWriter, IoError, IoResult};
use edgemap_core::GrayRaster;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::Path;
use tracing::{debug, trace, warn};

/// Comment written into every PGM header by default.
pub const DEFAULT_COMMENT: &str = "written by edgemap";

/// Options for reading PGM files.
#[derive(Debug, Clone, Default)]
pub struct PgmReaderOptions {
    /// Largest `width * height` accepted from a header. `None` accepts any
    /// size the platform can address.
    pub max_samples: Option<usize>,
}

/// Options for writing PGM files.
#[derive(Debug, Clone)]
pub struct PgmWriterOptions {
    /// Text of the single `#` comment line in the header.
    pub comment: String,
}

impl Default for PgmWriterOptions {
    fn default() -> Self {
        Self {
            comment: DEFAULT_COMMENT.to_string(),
        }
    }
}

/// Parsed PGM header.
#[derive(Debug, Clone, Copy)]
struct PgmHeader {
    encoding: Encoding,
    width: u32,
    height: u32,
}

impl PgmHeader {
    fn read<R: BufRead>(reader: &mut R) -> IoResult<Self> {
        let magic = pnm::next_line(reader, "magic")?;
        let encoding = if magic.starts_with(b"P2") {
            Encoding::Ascii
        } else if magic.starts_with(b"P5") {
            Encoding::Binary
        } else {
            return Err(IoError::Format(format!(
                "not a PGM file (magic {:?})",
                String::from_utf8_lossy(&magic[..magic.len().min(2)])
            )));
        };

        let mut line = pnm::next_line(reader, "dimensions")?;
        while pnm::is_comment(&line) {
            line = pnm::next_line(reader, "dimensions")?;
        }
        let (width, height) = pnm::parse_dimensions(&line)?;

        pnm::next_line(reader, "max value")?;

        Ok(Self {
            encoding,
            width,
            height,
        })
    }
}

/// PGM format reader.
#[derive(Debug, Clone, Default)]
pub struct PgmReader {
    options: PgmReaderOptions,
}

impl PgmReader {
    /// Creates a new PGM reader with default options.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_from<R: BufRead>(&self, reader: &mut R) -> IoResult<GrayRaster> {
        let header = PgmHeader::read(reader)?;
        debug!(
            width = header.width,
            height = header.height,
            encoding = ?header.encoding,
            "PGM header"
        );

        let len = pnm::checked_len(header.width, header.height, 1, self.options.max_samples)?;
        let mut body = Vec::new();
        reader.read_to_end(&mut body)?;

        // Count before allocating so a short body never commits `len` bytes.
        let count = Samples::new(&body, header.encoding).count();
        if count != len {
            return Err(IoError::Truncated {
                expected: len,
                actual: count,
            });
        }
        Ok(GrayRaster::try_from_samples(
            header.width,
            header.height,
            Samples::new(&body, header.encoding),
        )?)
    }
}

impl FormatReader<PgmReaderOptions> for PgmReader {
    type Output = GrayRaster;

    fn format_name(&self) -> &'static str {
        "PGM"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["pgm", "pnm"]
    }

    fn can_read(&self, header: &[u8]) -> bool {
        header.starts_with(b"P2") || header.starts_with(b"P5")
    }

    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<GrayRaster> {
        let path = path.as_ref();
        trace!(path = %path.display(), "pgm::read");
        let result = crate::open(path).and_then(|mut reader| self.read_from(&mut reader));
        if let Err(e) = &result {
            warn!(path = %path.display(), error = %e, "PGM decode failed");
        }
        result
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<GrayRaster> {
        self.read_from(&mut Cursor::new(data))
    }

    fn with_options(options: PgmReaderOptions) -> Self {
        Self { options }
    }
}

/// PGM format writer. Always emits `P5`.
#[derive(Debug, Clone, Default)]
pub struct PgmWriter {
    options: PgmWriterOptions,
}

impl PgmWriter {
    /// Creates a new PGM writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    fn write_to<W: Write>(&self, writer: &mut W, raster: &GrayRaster) -> IoResult<()> {
        write!(
            writer,
            "P5\n# {}\n{} {}\n255\n",
            self.options.comment,
            raster.width(),
            raster.height()
        )?;
        writer.write_all(raster.data())?;
        Ok(())
    }
}

impl FormatWriter<PgmWriterOptions> for PgmWriter {
    type Input = GrayRaster;

    fn format_name(&self) -> &'static str {
        "PGM"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["pgm"]
    }

    fn write<P: AsRef<Path>>(&self, path: P, raster: &GrayRaster) -> IoResult<()> {
        let path = path.as_ref();
        trace!(path = %path.display(), width = raster.width(), height = raster.height(), "pgm::write");
        let mut writer = crate::create(path)?;
        self.write_to(&mut writer, raster)?;
        writer.flush()?;
        Ok(())
    }

    fn write_to_memory(&self, raster: &GrayRaster) -> IoResult<Vec<u8>> {
        let mut buffer = Vec::with_capacity(raster.len() + 64);
        self.write_to(&mut buffer, raster)?;
        Ok(buffer)
    }

    fn with_options(options: PgmWriterOptions) -> Self {
        Self { options }
    }
}

// === Convenience Functions ===

/// Reads a PGM file (`P2` or `P5`) from the given path.
///
/// # Errors
///
/// - [`IoError::Open`] if the file cannot be opened
/// - [`IoError::Format`] for an unknown magic or malformed header
/// - [`IoError::Truncated`] if the body does not hold `width * height` samples
/// - [`IoError::Allocation`] if the sample buffer cannot be reserved
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<GrayRaster> {
    PgmReader::default().read(path)
}

/// Writes a raster as binary PGM, overwriting `path`.
pub fn write<P: AsRef<Path>>(path: P, raster: &GrayRaster) -> IoResult<()> {
    PgmWriter::default().write(path, raster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn decode(bytes: &[u8]) -> IoResult<GrayRaster> {
        PgmReader::new().read_from_memory(bytes)
    }

    #[test]
    fn test_binary_2x2() {
        let raster = decode(b"P5\n2 2\n255\n\x0a\x14\x1e\x28").unwrap();
        assert_eq!(raster.dimensions(), (2, 2));
        assert_eq!(raster.data(), &[10, 20, 30, 40]);

        let bytes = PgmWriter::new().write_to_memory(&raster).unwrap();
        assert_eq!(&bytes[bytes.len() - 4..], &[10, 20, 30, 40]);
    }

    #[test]
    fn test_text_with_comments() {
        let raster = decode(b"P2\n# first\n# second\n3 2\n255\n1 2 3\n4   5\n6\n").unwrap();
        assert_eq!(raster.dimensions(), (3, 2));
        assert_eq!(raster.data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_bad_magic() {
        let err = decode(b"P6\n1 1\n255\n\x00\x00\x00").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(decode(b"").unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn test_one_byte_short() {
        let err = decode(b"P5\n2 2\n255\n\x01\x02\x03").unwrap_err();
        assert!(matches!(
            err,
            IoError::Truncated {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_extra_samples_rejected() {
        let err = decode(b"P2\n2 1\n255\n1 2 3\n").unwrap_err();
        assert!(matches!(
            err,
            IoError::Truncated {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_text_stops_at_garbage() {
        let err = decode(b"P2\n2 2\n255\n1 2 oops 4\n").unwrap_err();
        assert!(matches!(err, IoError::Truncated { actual: 2, .. }));
    }

    #[test]
    fn test_max_value_not_validated() {
        let raster = decode(b"P5\n1 1\nnot-a-number\n\x07").unwrap();
        assert_eq!(raster.data(), &[7]);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = decode(b"P5\n0 4\n255\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_short_body_under_huge_header() {
        let err = decode(b"P5\n20000 20000\n255\n\x01").unwrap_err();
        assert!(matches!(
            err,
            IoError::Truncated {
                expected: 400_000_000,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_max_samples_limit() {
        let reader = PgmReader::with_options(PgmReaderOptions {
            max_samples: Some(4),
        });
        assert!(reader.read_from_memory(b"P5\n2 2\n255\n\x01\x02\x03\x04").is_ok());
        let err = reader
            .read_from_memory(b"P5\n3 2\n255\n\x01\x02\x03\x04\x05\x06")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_text_token_with_trailing_garbage() {
        let raster = decode(b"P2\n2 1\n255\n5 12abc\n").unwrap();
        assert_eq!(raster.data(), &[5, 12]);
    }

    #[test]
    fn test_writer_header() {
        let raster = GrayRaster::from_data(3, 1, vec![0, 128, 255]).unwrap();
        let bytes = PgmWriter::with_options(PgmWriterOptions {
            comment: "mask".into(),
        })
        .write_to_memory(&raster)
        .unwrap();
        assert_eq!(&bytes[..], b"P5\n# mask\n3 1\n255\n\x00\x80\xff");
    }
}
