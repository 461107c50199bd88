//! Glyph placement resolver.
//!
//! Positions every glyph of the output range inside the shared cell. The
//! vertical offset is clamped into the cell when possible; anything that
//! still sticks out is flagged and left for the renderer to truncate.

use fontmatrix_spec::{
    BackendError, CharRange, Diagnostics, FontMetrics, GlyphBitmap, GlyphPlacement, VerticalShift,
    WarningCode, MAX_CHAR_CODE,
};
use thiserror::Error;

use crate::source::{GlyphSource, GlyphSourceError};

/// Errors that abort the placement pass.
#[derive(Debug, Error)]
pub enum PlacementError {
    /// The range reaches past the last code a matrix font can hold.
    #[error("character range {0} exceeds code {MAX_CHAR_CODE}")]
    RangeOutOfBounds(CharRange),

    /// The source rejected the size taken from the metrics.
    #[error(transparent)]
    Source(#[from] GlyphSourceError),

    /// A character could not be rasterized.
    #[error("rasterizing character #{code} failed: {source}")]
    Glyph {
        code: u32,
        #[source]
        source: GlyphSourceError,
    },
}

impl BackendError for PlacementError {
    fn code(&self) -> &'static str {
        match self {
            PlacementError::RangeOutOfBounds(_) => "PLACE_001",
            PlacementError::Source(_) => "PLACE_002",
            PlacementError::Glyph { .. } => "PLACE_003",
        }
    }

    fn category(&self) -> &'static str {
        "placement"
    }
}

/// Applies the vertical clamping rule to one offset.
///
/// A glyph starting above the cell is moved down to row 0. Otherwise a glyph
/// ending below the cell is moved up until its bottom row meets the cell's
/// bottom row, but never past row 0. The result is a fixed point: clamping
/// it again returns it unchanged with no shift.
pub fn clamp_vertical(
    offset_y: i32,
    height: i32,
    cell_height: i32,
) -> (i32, Option<VerticalShift>) {
    if offset_y < 0 {
        return (0, Some(VerticalShift::MovedDown { from: offset_y }));
    }
    if offset_y + height > cell_height {
        let target = (cell_height - height).max(0);
        if target != offset_y {
            return (target, Some(VerticalShift::MovedUp { from: offset_y }));
        }
    }
    (offset_y, None)
}

/// Places one glyph bitmap into the cell described by `metrics`.
pub fn place_glyph(
    code: u32,
    bitmap: GlyphBitmap,
    metrics: &FontMetrics,
    diagnostics: &mut Diagnostics,
) -> GlyphPlacement {
    let width = bitmap.width as i32;
    let height = bitmap.height as i32;
    let cell_w = metrics.cell_width();
    let cell_h = metrics.cell_height();

    let offset_x = bitmap.left_bearing;
    let raw_y = cell_h + metrics.baseline - bitmap.top_bearing;
    let (offset_y, shift) = clamp_vertical(raw_y, height, cell_h);

    match shift {
        Some(VerticalShift::MovedDown { from }) => diagnostics.report_glyph(
            WarningCode::GlyphMovedDown,
            code,
            format!("out of matrix, move down ({}->{})", from, offset_y),
        ),
        Some(VerticalShift::MovedUp { from }) => diagnostics.report_glyph(
            WarningCode::GlyphMovedUp,
            code,
            format!("out of matrix, move up ({}->{})", from, offset_y),
        ),
        None => {}
    }

    let clipped_y = offset_y < 0 || offset_y + height > cell_h;
    if clipped_y {
        diagnostics.report_glyph(
            WarningCode::GlyphClippedY,
            code,
            format!(
                "out of matrix (Y), {} rows at row {} in a cell of {}, will be clipped",
                height, offset_y, cell_h
            ),
        );
    }

    let clipped_x = offset_x < 0 || offset_x + width > cell_w;
    if clipped_x {
        diagnostics.report_glyph(
            WarningCode::GlyphClippedX,
            code,
            format!(
                "out of matrix (X), {} columns at column {} in a cell of {}, will be clipped",
                width, offset_x, cell_w
            ),
        );
    }

    GlyphPlacement {
        code,
        bitmap,
        offset_x,
        offset_y,
        shift,
        clipped_y,
        clipped_x,
    }
}

/// Resolves placements for every code of `range`, in ascending order.
///
/// The source is re-fixed to the size recorded in `metrics` first. The
/// first glyph that cannot be rasterized aborts the pass; no partial
/// result is returned.
pub fn resolve_placements<S: GlyphSource + ?Sized>(
    source: &mut S,
    metrics: &FontMetrics,
    range: CharRange,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<GlyphPlacement>, PlacementError> {
    if !range.is_within_limit() {
        return Err(PlacementError::RangeOutOfBounds(range));
    }
    source.set_size(&metrics.size)?;

    let mut placements = Vec::with_capacity(range.len());
    for code in range.codes() {
        let bitmap = source
            .rasterize(code)
            .map_err(|source| PlacementError::Glyph { code, source })?;
        placements.push(place_glyph(code, bitmap, metrics, diagnostics));
    }
    Ok(placements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TableGlyphSource;
    use fontmatrix_spec::{PixelSize, RasterSize};

    fn metrics(cell_w: u32, cell_h: u32, baseline: i32) -> FontMetrics {
        let mut m = FontMetrics::new("test", RasterSize::new(32, 72));
        m.cell = PixelSize::new(cell_w, cell_h);
        m.baseline = baseline;
        m
    }

    #[test]
    fn test_offsets_follow_bearings() {
        let m = metrics(12, 36, -7);
        let mut diags = Diagnostics::new();
        let p = place_glyph(65, GlyphBitmap::solid(10, 20, 1, 28), &m, &mut diags);

        assert_eq!(p.offset_x, 1);
        assert_eq!(p.offset_y, 1);
        assert_eq!(p.shift, None);
        assert!(!p.is_clipped());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_glyph_above_cell_moves_down() {
        let m = metrics(12, 36, -7);
        let mut diags = Diagnostics::new();
        let p = place_glyph(65, GlyphBitmap::solid(4, 10, 0, 32), &m, &mut diags);

        assert_eq!(p.offset_y, 0);
        assert_eq!(p.shift, Some(VerticalShift::MovedDown { from: -3 }));
        assert!(!p.clipped_y);
        assert!(diags.contains(WarningCode::GlyphMovedDown));
        assert!(!diags.contains(WarningCode::GlyphClippedY));
    }

    #[test]
    fn test_glyph_below_cell_moves_up() {
        let m = metrics(12, 36, -7);
        let mut diags = Diagnostics::new();
        // 12 rows starting 2 below the origin: would end at row 43
        let p = place_glyph(95, GlyphBitmap::solid(8, 12, 0, -2), &m, &mut diags);

        assert_eq!(p.offset_y, 24);
        assert_eq!(p.shift, Some(VerticalShift::MovedUp { from: 31 }));
        assert!(!p.clipped_y);
        let d = diags.with_code(WarningCode::GlyphMovedUp).next().unwrap();
        assert_eq!(d.char_code, Some(95));
    }

    #[test]
    fn test_oversized_glyph_is_clipped() {
        let m = metrics(12, 36, -7);
        let mut diags = Diagnostics::new();
        let p = place_glyph(124, GlyphBitmap::solid(10, 40, 1, 28), &m, &mut diags);

        assert_eq!(p.offset_y, 0);
        assert!(p.clipped_y);
        assert!(diags.contains(WarningCode::GlyphClippedY));
    }

    #[test]
    fn test_horizontal_overflow_is_flagged_not_moved() {
        let m = metrics(12, 36, -7);
        let mut diags = Diagnostics::new();
        let p = place_glyph(87, GlyphBitmap::solid(12, 20, -1, 20), &m, &mut diags);
        assert_eq!(p.offset_x, -1);
        assert!(p.clipped_x);
        assert!(!p.clipped_y);

        let p = place_glyph(87, GlyphBitmap::solid(12, 20, 1, 20), &m, &mut diags);
        assert_eq!(p.offset_x, 1);
        assert!(p.clipped_x);
        assert_eq!(diags.with_code(WarningCode::GlyphClippedX).count(), 2);
    }

    #[test]
    fn test_blank_glyph_gets_a_slot() {
        let m = metrics(12, 36, -7);
        let mut diags = Diagnostics::new();
        let p = place_glyph(32, GlyphBitmap::blank(12), &m, &mut diags);
        assert_eq!(p.width(), 0);
        assert_eq!(p.height(), 0);
        assert_eq!(p.offset_y, 29);
        assert!(!p.is_clipped());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let cell = 36;
        for height in [0, 1, 20, 36, 37, 50] {
            for raw in -60..60 {
                let (once, _) = clamp_vertical(raw, height, cell);
                let (twice, shift) = clamp_vertical(once, height, cell);
                assert_eq!(once, twice, "raw {} height {}", raw, height);
                assert_eq!(shift, None, "raw {} height {}", raw, height);
            }
        }
    }

    #[test]
    fn test_clamped_glyph_fits_when_it_can() {
        let cell = 36;
        for height in 0..=cell {
            for raw in -60..60 {
                let (y, _) = clamp_vertical(raw, height, cell);
                assert!(y >= 0 && y + height <= cell);
            }
        }
    }

    #[test]
    fn test_resolve_covers_inclusive_range() {
        let m = metrics(12, 36, -7);
        let mut source = TableGlyphSource::new(36)
            .with_glyph(100, GlyphBitmap::solid(6, 10, 0, 10))
            .with_glyph(200, GlyphBitmap::solid(6, 10, 0, 10));
        let mut diags = Diagnostics::new();

        let placements =
            resolve_placements(&mut source, &m, CharRange::new(200, 100), &mut diags).unwrap();
        assert_eq!(placements.len(), 101);
        assert_eq!(placements.first().unwrap().code, 100);
        assert_eq!(placements.last().unwrap().code, 200);
        assert!(placements.windows(2).all(|w| w[0].code + 1 == w[1].code));
        assert_eq!(source.size(), Some(m.size));
    }

    #[test]
    fn test_resolve_aborts_on_missing_glyph() {
        let m = metrics(12, 36, -7);
        let mut source = TableGlyphSource::new(36)
            .with_glyph(65, GlyphBitmap::solid(6, 10, 0, 10))
            .strict();
        let mut diags = Diagnostics::new();

        let err = resolve_placements(&mut source, &m, CharRange::new(65, 67), &mut diags)
            .unwrap_err();
        assert!(matches!(err, PlacementError::Glyph { code: 66, .. }));
        assert_eq!(err.code(), "PLACE_003");
    }

    #[test]
    fn test_resolve_rejects_codes_past_limit() {
        let m = metrics(12, 36, -7);
        let mut source = TableGlyphSource::new(36);
        let mut diags = Diagnostics::new();
        let err = resolve_placements(&mut source, &m, CharRange::new(250, 300), &mut diags)
            .unwrap_err();
        assert!(matches!(err, PlacementError::RangeOutOfBounds(_)));
    }
}
