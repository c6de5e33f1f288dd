//! Format detection utilities.
//!
//! Detects file formats from magic bytes and extensions.

use crate::IoResult;
use std::io::Read;
use std::path::Path;

/// Formats known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Portable graymap (`P2` / `P5`).
    Pgm,
    /// Portable pixmap (`P3` / `P6`).
    Ppm,
    /// Polygon file format (write-only).
    Ply,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from file path (magic bytes, then extension).
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();

        if let Ok(format) = Self::from_magic_bytes(path) {
            if format != Format::Unknown {
                return Ok(format);
            }
        }

        Ok(Self::from_extension(path))
    }

    /// Detects format from file extension only.
    ///
    /// `.pnm` is ambiguous and maps to [`Format::Unknown`].
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("pgm") => Format::Pgm,
            Some("ppm") => Format::Ppm,
            Some("ply") => Format::Ply,
            _ => Format::Unknown,
        }
    }

    /// Detects format from the first bytes of a file.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut reader = crate::open(path.as_ref())?;
        let mut header = [0u8; 4];
        let bytes_read = reader.read(&mut header)?;
        Ok(Self::from_bytes(&header[..bytes_read]))
    }

    /// Detects format from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match bytes {
            [b'P', b'2' | b'5', ..] => Format::Pgm,
            [b'P', b'3' | b'6', ..] => Format::Ppm,
            [b'p', b'l', b'y', ..] => Format::Ply,
            _ => Format::Unknown,
        }
    }

    /// Returns `true` if files of this format decode to one channel.
    pub fn is_grayscale(&self) -> bool {
        matches!(self, Format::Pgm)
    }

    /// Returns `true` if files of this format decode to three channels.
    pub fn is_color(&self) -> bool {
        matches!(self, Format::Ppm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes() {
        assert_eq!(Format::from_bytes(b"P5\n"), Format::Pgm);
        assert_eq!(Format::from_bytes(b"P2"), Format::Pgm);
        assert_eq!(Format::from_bytes(b"P6\n"), Format::Ppm);
        assert_eq!(Format::from_bytes(b"P3"), Format::Ppm);
        assert_eq!(Format::from_bytes(b"ply\n"), Format::Ply);
        assert_eq!(Format::from_bytes(b"P4"), Format::Unknown);
        assert_eq!(Format::from_bytes(b"P"), Format::Unknown);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = Format::from_magic_bytes("no/such/dir/input.pgm").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::NotFound);
        assert_eq!(Format::detect("no/such/dir/input.pgm").unwrap(), Format::Pgm);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension("edges.PGM"), Format::Pgm);
        assert_eq!(Format::from_extension("photo.ppm"), Format::Ppm);
        assert_eq!(Format::from_extension("mesh.ply"), Format::Ply);
        assert_eq!(Format::from_extension("any.pnm"), Format::Unknown);
        assert!(Format::Pgm.is_grayscale());
        assert!(Format::Ppm.is_color());
    }
}
