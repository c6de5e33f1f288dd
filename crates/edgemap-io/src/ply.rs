//! ASCII PLY export of segment models.
//!
//! Every segment pixel becomes a vertex on the XZ plane and every segment
//! becomes one face listing its vertices in chain order, which 3D viewers
//! draw as a polyline.
//!
//! # Output
//!
//! ```text
//! ply
//! format ascii 1.0
//! comment created by edgemap
//! element vertex 5
//! property float x
//! property float y
//! property float z
//! element face 2
//! property list uchar int vertex_indices
//! end_header
//! -1.500000 0 -0.500000
//! ...
//! 2 0 1
//! 3 2 3 4
//! ```
//!
//! # Coordinates
//!
//! Pixel (row `r`, col `c`) of a `W x H` model maps to
//! `x = c - W/2 + 0.5`, `y = 0`, `z = r - H/2 + 0.5`, where `W/2` and `H/2`
//! are integer divisions. For odd sizes the mesh is therefore off-center by
//! half a pixel.
//!
//! # Indices
//!
//! Vertex indices run globally across segments in emission order and are
//! never reset: segment `i` starts at the total pixel count of segments
//! `0..i`. The header counts are computed from the model before anything is
//! written, so they always agree with the blocks that follow.
//!
//! The face count property is declared `uchar` for viewer compatibility;
//! segments longer than 255 pixels still write their true length.

use crate::{FormatWriter, IoResult};
use edgemap_core::{Pixel, SegmentModel};
use std::io::Write;
use std::path::Path;
use tracing::{debug, trace};

/// Comment written into every PLY header by default.
pub const DEFAULT_COMMENT: &str = "created by edgemap";

/// Options for writing PLY files.
#[derive(Debug, Clone)]
pub struct PlyWriterOptions {
    /// Text of the `comment` header line.
    pub comment: String,
}

impl Default for PlyWriterOptions {
    fn default() -> Self {
        Self {
            comment: DEFAULT_COMMENT.to_string(),
        }
    }
}

/// Maps a pixel to mesh coordinates `(x, z)` for a `width x height` model.
///
/// # Example
///
/// ```rust
/// use edgemap_core::Pixel;
/// use edgemap_io::ply::vertex_position;
///
/// assert_eq!(vertex_position(Pixel::new(0, 0), 4, 2), (-1.5, -0.5));
/// assert_eq!(vertex_position(Pixel::new(2, 2), 5, 5), (0.5, 0.5));
/// ```
#[inline]
pub fn vertex_position(pixel: Pixel, width: u32, height: u32) -> (f64, f64) {
    let cx = i64::from(width / 2);
    let cz = i64::from(height / 2);
    let x = (i64::from(pixel.col) - cx) as f64 + 0.5;
    let z = (i64::from(pixel.row) - cz) as f64 + 0.5;
    (x, z)
}

/// PLY mesh writer.
#[derive(Debug, Clone, Default)]
pub struct PlyWriter {
    options: PlyWriterOptions,
}

impl PlyWriter {
    /// Creates a new PLY writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the mesh for `model` to any byte sink.
    pub fn write_to<W: Write>(&self, writer: &mut W, model: &SegmentModel) -> IoResult<()> {
        let vertex_count = model.total_pixels();
        let face_count = model.segment_count();
        debug!(vertex_count, face_count, "PLY element counts");

        writeln!(writer, "ply")?;
        writeln!(writer, "format ascii 1.0")?;
        writeln!(writer, "comment {}", self.options.comment)?;
        writeln!(writer, "element vertex {vertex_count}")?;
        writeln!(writer, "property float x")?;
        writeln!(writer, "property float y")?;
        writeln!(writer, "property float z")?;
        writeln!(writer, "element face {face_count}")?;
        writeln!(writer, "property list uchar int vertex_indices")?;
        writeln!(writer, "end_header")?;

        let (width, height) = model.dimensions();
        for segment in model.segments() {
            for &pixel in segment {
                let (x, z) = vertex_position(pixel, width, height);
                writeln!(writer, "{x:.6} 0 {z:.6}")?;
            }
        }

        let mut next_index = 0usize;
        for segment in model.segments() {
            write!(writer, "{}", segment.len())?;
            for _ in segment {
                write!(writer, " {next_index}")?;
                next_index += 1;
            }
            writeln!(writer)?;
        }
        debug_assert_eq!(next_index, vertex_count);

        Ok(())
    }
}

impl FormatWriter<PlyWriterOptions> for PlyWriter {
    type Input = SegmentModel;

    fn format_name(&self) -> &'static str {
        "PLY"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["ply"]
    }

    fn write<P: AsRef<Path>>(&self, path: P, model: &SegmentModel) -> IoResult<()> {
        let path = path.as_ref();
        trace!(path = %path.display(), segments = model.segment_count(), "ply::write");
        let mut writer = crate::create(path)?;
        self.write_to(&mut writer, model)?;
        writer.flush()?;
        Ok(())
    }

    fn write_to_memory(&self, model: &SegmentModel) -> IoResult<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, model)?;
        Ok(buffer)
    }

    fn with_options(options: PlyWriterOptions) -> Self {
        Self { options }
    }
}

/// Exports `model` as an ASCII PLY mesh, overwriting `path`.
pub fn export<P: AsRef<Path>>(path: P, model: &SegmentModel) -> IoResult<()> {
    PlyWriter::default().write(path, model)
}
