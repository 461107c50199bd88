//! Deterministic PNG preview sheet.
//!
//! Glyph cells are laid out 16 per row with a one pixel gutter. Each pixel
//! slot is decoded back to its N-bit value and scaled to 8-bit gray. Fixed
//! encoder settings keep the output byte-identical for the same buffer.

use std::io::Write;

use fontmatrix_spec::WriterKind;
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

use super::{Artifact, WriterError};
use crate::render::FontDefinition;

/// Cells per sheet row.
pub const CELLS_PER_ROW: usize = 16;

/// Gray level of the gutter between cells.
const GUTTER: u8 = 0x40;

/// Errors from PNG encoding.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// PNG encoder settings.
#[derive(Debug, Clone)]
pub struct PngConfig {
    pub compression: Compression,
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            // no filtering keeps the encoder's choices out of the output
            filter: FilterType::NoFilter,
        }
    }
}

/// A rendered 8-bit grayscale sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSheet {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl PreviewSheet {
    /// Lays out every glyph of `def`.
    pub fn from_definition(def: &FontDefinition<'_>) -> Result<Self, PngError> {
        let cell = def.metrics.cell;
        if def.count == 0 || cell.width == 0 || cell.height == 0 {
            return Err(PngError::InvalidDimensions(format!(
                "{} glyphs of {}",
                def.count, cell
            )));
        }
        let cols = def.count.min(CELLS_PER_ROW);
        let rows = def.count.div_ceil(CELLS_PER_ROW);
        let stride_x = cell.width as usize + 1;
        let stride_y = cell.height as usize + 1;
        let width = cols * stride_x + 1;
        let height = rows * stride_y + 1;

        let mut pixels = vec![GUTTER; width * height];
        let max = def.max_slot().max(1) as u32;

        for glyph in 0..def.count {
            let left = (glyph % CELLS_PER_ROW) * stride_x + 1;
            let top = (glyph / CELLS_PER_ROW) * stride_y + 1;
            for y in 0..cell.height as usize {
                let line = (top + y) * width + left;
                for x in 0..cell.width {
                    let value = def.slot(glyph, y, x) as u32 * 255 / max;
                    pixels[line + x as usize] = value as u8;
                }
            }
        }

        Ok(Self {
            width: width as u32,
            height: height as u32,
            pixels,
        })
    }

    /// Encodes the sheet to any writer.
    pub fn encode_to<W: Write>(&self, writer: W, config: &PngConfig) -> Result<(), PngError> {
        let mut encoder = Encoder::new(writer, self.width, self.height);
        encoder.set_color(ColorType::Grayscale);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_compression(config.compression);
        encoder.set_filter(config.filter);

        let mut png_writer = encoder.write_header()?;
        png_writer.write_image_data(&self.pixels)?;
        Ok(())
    }
}

/// Encodes the preview of `def` to PNG bytes.
pub fn encode_preview(
    def: &FontDefinition<'_>,
    config: &PngConfig,
) -> Result<Vec<u8>, PngError> {
    let sheet = PreviewSheet::from_definition(def)?;
    let mut data = Vec::new();
    sheet.encode_to(&mut data, config)?;
    Ok(data)
}

pub(super) fn write(def: &FontDefinition<'_>, basename: &str) -> Result<Artifact, WriterError> {
    let data = encode_preview(def, &PngConfig::default())?;
    Ok(Artifact::new(WriterKind::Png, format!("{}.png", basename), data))
}
