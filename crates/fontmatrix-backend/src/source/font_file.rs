//! Glyph source backed by TrueType/OpenType outlines via `fontdue`.

use std::path::Path;

use fontdue::{Font, FontSettings, Metrics};
use fontmatrix_spec::{GlyphBitmap, RasterSize};

use super::{GlyphSource, GlyphSourceError};

/// Coverage at or above this value becomes an "on" pixel.
const COVERAGE_THRESHOLD: u8 = 128;

/// Rasterizes outline fonts into monochrome bitmaps.
///
/// Character codes are taken as Unicode scalar values, so 0..=255 covers
/// Latin-1. A horizontal resolution different from the vertical one is
/// applied by stretching each rendered glyph horizontally.
pub struct FontdueSource {
    font: Font,
    size: Option<RasterSize>,
}

impl FontdueSource {
    /// Loads a font from raw file contents.
    pub fn from_bytes(data: &[u8]) -> Result<Self, GlyphSourceError> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| GlyphSourceError::Load(e.to_string()))?;
        Ok(Self { font, size: None })
    }

    /// Loads a font file.
    pub fn from_file(path: &Path) -> Result<Self, GlyphSourceError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    fn current_size(&self) -> Result<RasterSize, GlyphSourceError> {
        self.size.ok_or(GlyphSourceError::NoSize)
    }
}

/// Converts a `width` x `height` coverage map to packed MSB-first 1bpp rows,
/// stretching horizontally by `scale` with nearest-neighbour sampling.
fn pack(width: usize, height: usize, coverage: &[u8], scale: f32) -> (u32, u32, Vec<u8>) {
    if width == 0 || height == 0 {
        return (0, 0, Vec::new());
    }
    let out_width = ((width as f32 * scale).round() as usize).max(1);
    let pitch = out_width.div_ceil(8);
    let mut buffer = vec![0u8; pitch * height];

    for y in 0..height {
        for x in 0..out_width {
            let src_x = (((x as f32 + 0.5) / scale) as usize).min(width - 1);
            if coverage[y * width + src_x] >= COVERAGE_THRESHOLD {
                buffer[y * pitch + x / 8] |= 0x80 >> (x & 7);
            }
        }
    }
    (out_width as u32, height as u32, buffer)
}

/// Builds the glyph bitmap for one rasterized character.
fn to_bitmap(
    metrics: &Metrics,
    coverage: &[u8],
    scale: f32,
    vertical_advance: f32,
) -> GlyphBitmap {
    let (width, height, buffer) = pack(metrics.width, metrics.height, coverage, scale);
    GlyphBitmap {
        width,
        height,
        pitch: width.div_ceil(8),
        buffer,
        left_bearing: (metrics.xmin as f32 * scale).round() as i32,
        top_bearing: metrics.ymin + metrics.height as i32,
        advance: (metrics.advance_width * scale).round() as i32,
        vertical_advance: vertical_advance.round() as i32,
    }
}

impl GlyphSource for FontdueSource {
    fn set_size(&mut self, size: &RasterSize) -> Result<(), GlyphSourceError> {
        if size.points == 0 || size.dpi == 0 || size.hdpi == Some(0) {
            return Err(GlyphSourceError::InvalidSize {
                points: size.points,
                dpi: size.dpi,
            });
        }
        self.size = Some(*size);
        Ok(())
    }

    fn line_height(&self) -> Result<i32, GlyphSourceError> {
        let px = self.current_size()?.pixels_per_em();
        Ok(self
            .font
            .horizontal_line_metrics(px)
            .map(|m| m.new_line_size)
            .unwrap_or(px)
            .round() as i32)
    }

    fn rasterize(&mut self, code: u32) -> Result<GlyphBitmap, GlyphSourceError> {
        let size = self.current_size()?;
        let ch = char::from_u32(code).ok_or(GlyphSourceError::InvalidCode(code))?;
        let px = size.pixels_per_em();
        let scale = size.horizontal_scale();

        let (metrics, coverage) = self.font.rasterize(ch, px);

        // Faces without vertical metrics report no vertical advance; fall
        // back to the ascender-descender span.
        let vertical_advance = if metrics.advance_height > 0.0 {
            metrics.advance_height
        } else {
            self.font
                .horizontal_line_metrics(px)
                .map(|m| m.ascent - m.descent)
                .unwrap_or(px)
        };

        Ok(to_bitmap(&metrics, &coverage, scale, vertical_advance))
    }
}
