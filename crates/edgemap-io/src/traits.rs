//! I/O traits for format readers and writers.
//!
//! Each format implements these with its own option type `O`, so a reader
//! or writer can be configured once and reused across files.

use crate::IoResult;
use std::path::Path;

/// Trait for format readers.
///
/// # Example
///
/// ```rust,ignore
/// use edgemap_io::{FormatReader, pgm::PgmReader};
///
/// let reader = PgmReader::default();
/// let header = std::fs::read("edges.pgm")?;
/// if reader.can_read(&header) {
///     let raster = reader.read_from_memory(&header)?;
/// }
/// ```
pub trait FormatReader<O> {
    /// Decoded value.
    type Output;

    /// Human-readable format name.
    fn format_name(&self) -> &'static str;

    /// File extensions associated with the format.
    fn extensions(&self) -> &'static [&'static str];

    /// Returns `true` if `header` starts with this format's magic.
    fn can_read(&self, header: &[u8]) -> bool;

    /// Reads from a file path.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<Self::Output>;

    /// Reads from an in-memory file image.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<Self::Output>;

    /// Creates a reader with the given options.
    fn with_options(options: O) -> Self
    where
        Self: Sized;
}

/// Trait for format writers.
pub trait FormatWriter<O> {
    /// Value being written.
    type Input: ?Sized;

    /// Human-readable format name.
    fn format_name(&self) -> &'static str;

    /// File extensions associated with the format.
    fn extensions(&self) -> &'static [&'static str];

    /// Writes to a file path, replacing any existing file.
    fn write<P: AsRef<Path>>(&self, path: P, input: &Self::Input) -> IoResult<()>;

    /// Writes to a byte buffer.
    fn write_to_memory(&self, input: &Self::Input) -> IoResult<Vec<u8>>;

    /// Creates a writer with the given options.
    fn with_options(options: O) -> Self
    where
        Self: Sized;
}
