//! # edgemap-io
//!
//! File I/O for edge-detection pipelines.
//!
//! This crate reads the rasters detectors consume and writes what they
//! produce:
//!
//! - **PGM** - Grayscale rasters, text (`P2`) and binary (`P5`) read, binary write
//! - **PPM** - Color rasters, text (`P3`) and binary (`P6`), read-only
//! - **PLY** - ASCII point/polyline mesh of a [`SegmentModel`], write-only
//!
//! # Architecture
//!
//! - [`FormatReader`] / [`FormatWriter`] - Per-format traits with option types
//! - [`read`] - Magic-byte detection and dispatch to the right decoder
//! - [`save_edge_map`] - Render a model's mask and write it as PGM
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use edgemap_core::{DetectParams, EdgeDetector};
//! use edgemap_io::{pgm, ply, save_edge_map};
//!
//! let raster = pgm::read("input.pgm")?;
//! let mut model = detector.detect(&raster, &DetectParams::new(20))?;
//! save_edge_map("edges.pgm", &mut model)?;
//! ply::export("edges.ply", &model)?;
//! ```
//!
//! # Error Handling
//!
//! Every entry point returns [`IoResult`]. Decoding is all-or-nothing:
//! a failed read returns no raster. Failed decodes are also reported
//! through `tracing` at `warn` level; no subscriber is installed here.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
mod pnm;
mod traits;

pub mod pgm;
pub mod ply;
pub mod ppm;

pub use detect::Format;
pub use error::{ErrorKind, IoError, IoResult};
pub use traits::{FormatReader, FormatWriter};

use edgemap_core::{render_mask, GrayRaster, RgbPlanes, SegmentModel};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;
use tracing::{debug, trace};

/// A decoded raster of either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// One channel, from PGM.
    Gray(GrayRaster),
    /// Three planes, from PPM.
    Color(RgbPlanes),
}

impl Decoded {
    /// Returns (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Decoded::Gray(r) => r.dimensions(),
            Decoded::Color(p) => p.dimensions(),
        }
    }
}

/// Reads a raster, detecting the format from its magic bytes.
///
/// Falls back to the file extension when the magic is not recognized.
///
/// # Errors
///
/// Returns [`IoError::Format`] if the file is neither PGM nor PPM.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Decoded> {
    let path = path.as_ref();
    let mut header = [0u8; 4];
    let bytes_read = open(path)?.read(&mut header)?;
    let format = match Format::from_bytes(&header[..bytes_read]) {
        Format::Unknown => Format::from_extension(path),
        format => format,
    };
    debug!(path = %path.display(), format = ?format, "Detected format");

    match format {
        Format::Pgm => pgm::read(path).map(Decoded::Gray),
        Format::Ppm => ppm::read(path).map(Decoded::Color),
        other => Err(IoError::Format(format!(
            "{} is not a readable raster ({other:?})",
            path.display()
        ))),
    }
}

/// Renders the model's mask from its segments and writes it as binary PGM.
///
/// The mask is always cleared before drawing, so this is safe to call on
/// a model whose mask still holds a detector's intermediate output. To
/// persist that output unchanged, write [`SegmentModel::mask`] with
/// [`pgm::write`] instead.
pub fn save_edge_map<P: AsRef<Path>>(path: P, model: &mut SegmentModel) -> IoResult<()> {
    let path = path.as_ref();
    trace!(path = %path.display(), segments = model.segment_count(), "save_edge_map");
    render_mask(model);
    pgm::write(path, model.mask())
}

/// Opens `path` for buffered reading.
pub(crate) fn open(path: &Path) -> IoResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| IoError::open(path, e))
}

/// Creates or truncates `path` for buffered writing.
pub(crate) fn create(path: &Path) -> IoResult<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| IoError::open(path, e))
}
