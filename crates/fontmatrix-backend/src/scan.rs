//! Metrics scanner.
//!
//! Walks the whole usable code range once to find the largest ascent and
//! descent, derives the shared cell geometry from them, and resolves the
//! baseline. The scan always covers codes 1..=254 so the cell does not
//! depend on the range that is finally rendered.

use fontmatrix_spec::{
    BackendError, BaselineMode, Diagnostics, FontMetrics, GlyphBitmap, PixelSize, RasterSize,
    WarningCode, MIN_POINT_SIZE, SCAN_FIRST, SCAN_LAST,
};
use thiserror::Error;

use crate::source::{GlyphSource, GlyphSourceError};

/// Errors that abort a metrics scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Point size below the minimum.
    #[error("invalid font size {0} pt: must be at least {MIN_POINT_SIZE} pt")]
    InvalidSize(u32),

    /// The source rejected the size or could not report line metrics.
    #[error(transparent)]
    Source(#[from] GlyphSourceError),

    /// A character could not be rasterized; the font is unusable.
    #[error("rasterizing character #{code} failed: {source}")]
    Glyph {
        code: u32,
        #[source]
        source: GlyphSourceError,
    },

    /// The selected baseline lies above the cell bottom.
    #[error("illegal baseline {0}: must not be greater than 0")]
    PositiveBaseline(i32),
}

impl BackendError for ScanError {
    fn code(&self) -> &'static str {
        match self {
            ScanError::InvalidSize(_) => "SCAN_001",
            ScanError::Source(_) => "SCAN_002",
            ScanError::Glyph { .. } => "SCAN_003",
            ScanError::PositiveBaseline(_) => "SCAN_004",
        }
    }

    fn category(&self) -> &'static str {
        "scan"
    }
}

/// Caller choices that influence baseline resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Replaces the detected baseline when set.
    pub forced_origin: Option<i32>,
    /// Which baseline becomes the active one.
    pub baseline_mode: BaselineMode,
}

impl ScanOptions {
    pub fn new(forced_origin: Option<i32>, baseline_mode: BaselineMode) -> Self {
        Self {
            forced_origin,
            baseline_mode,
        }
    }
}

fn rasterize<S: GlyphSource + ?Sized>(
    source: &mut S,
    code: u32,
) -> Result<GlyphBitmap, ScanError> {
    source
        .rasterize(code)
        .map_err(|source| ScanError::Glyph { code, source })
}

/// Scans a font and returns its metrics.
///
/// Warnings about heights exceeding the font's own line metrics and about
/// cell enlargement are pushed into `diagnostics`; they never fail the scan.
pub fn scan_metrics<S: GlyphSource + ?Sized>(
    source: &mut S,
    name: &str,
    size: &RasterSize,
    options: &ScanOptions,
    diagnostics: &mut Diagnostics,
) -> Result<FontMetrics, ScanError> {
    if size.points < MIN_POINT_SIZE {
        return Err(ScanError::InvalidSize(size.points));
    }
    source.set_size(size)?;

    let mut metrics = FontMetrics::new(name, *size);

    // 'M' fixes the provisional cell and the calculated baseline
    let em = rasterize(source, 'M' as u32)?;
    metrics.absolute_height = source.line_height()?;
    metrics.regular_height = em.vertical_advance;
    metrics.calculated_baseline = em.vertical_advance - metrics.absolute_height;
    metrics.cell = PixelSize::new(
        em.advance.max(0) as u32,
        metrics.absolute_height.max(0) as u32,
    );
    metrics.em = em.size();

    metrics.ex = rasterize(source, 'x' as u32)?.size();
    metrics.we = rasterize(source, 'W' as u32)?.size();

    for code in SCAN_FIRST..=SCAN_LAST {
        let glyph = rasterize(source, code)?;
        metrics.max_descent = metrics.max_descent.max(glyph.descent());
        metrics.max_ascent = metrics.max_ascent.max(glyph.ascent());
    }

    metrics.origin_forced = options.forced_origin.is_some();
    metrics.detected_baseline = options.forced_origin.unwrap_or(-metrics.max_descent);

    let ink = metrics.ink_height();
    if ink > metrics.absolute_height {
        diagnostics.report(
            WarningCode::AbsoluteHeightExceeded,
            format!(
                "absolute height exceeded! {}>{}",
                ink, metrics.absolute_height
            ),
        );
    }
    if ink > metrics.regular_height {
        diagnostics.report(
            WarningCode::RegularHeightExceeded,
            format!("regular height exceeded! {}>{}", ink, metrics.regular_height),
        );
    }
    if ink > metrics.cell_height() {
        diagnostics.report(
            WarningCode::CellEnlarged,
            format!(
                "enlarge matrix height from {} to {}",
                metrics.cell.height, ink
            ),
        );
        metrics.cell.height = ink as u32;
    }

    metrics.baseline = match options.baseline_mode {
        BaselineMode::Detect => metrics.detected_baseline,
        BaselineMode::Calculate => metrics.calculated_baseline,
    };
    if metrics.baseline > 0 {
        return Err(ScanError::PositiveBaseline(metrics.baseline));
    }

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TableGlyphSource;

    /// A small monospace font: 12 wide, 36 line height, 'M' with a vertical
    /// advance of 36.
    fn mono_source() -> TableGlyphSource {
        let mut m = GlyphBitmap::solid(10, 23, 1, 23).with_vertical_advance(36);
        m.advance = 12;
        TableGlyphSource::new(36)
            .with_blank_advance(12)
            .with_glyph('M' as u32, m)
            .with_glyph('x' as u32, GlyphBitmap::solid(10, 16, 1, 16))
            .with_glyph('W' as u32, GlyphBitmap::solid(12, 23, 0, 23))
            // descender
            .with_glyph('g' as u32, GlyphBitmap::solid(9, 23, 1, 16))
            // tallest
            .with_glyph('|' as u32, GlyphBitmap::solid(2, 35, 5, 28))
    }

    fn scan(
        source: &mut TableGlyphSource,
        options: ScanOptions,
    ) -> (Result<FontMetrics, ScanError>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let result = scan_metrics(
            source,
            "mono",
            &RasterSize::new(32, 72),
            &options,
            &mut diags,
        );
        (result, diags)
    }

    #[test]
    fn test_scan_basic_metrics() {
        let mut source = mono_source();
        let (result, diags) = scan(&mut source, ScanOptions::default());
        let m = result.unwrap();

        assert_eq!(m.name, "mono");
        assert_eq!(m.cell, PixelSize::new(12, 36));
        assert_eq!(m.absolute_height, 36);
        assert_eq!(m.max_ascent, 28);
        assert_eq!(m.max_descent, 7);
        assert_eq!(m.detected_baseline, -7);
        assert_eq!(m.baseline, -7);
        assert_eq!(m.calculated_baseline, 0);
        assert!(!m.origin_forced);
        assert_eq!(m.em, PixelSize::new(10, 23));
        assert_eq!(m.ex, PixelSize::new(10, 16));
        assert_eq!(m.we, PixelSize::new(12, 23));
        assert!(diags.is_empty(), "{:?}", diags);
    }

    #[test]
    fn test_maxima_bound_every_glyph() {
        let mut source = mono_source();
        let (result, _) = scan(&mut source, ScanOptions::default());
        let m = result.unwrap();

        for code in SCAN_FIRST..=SCAN_LAST {
            let g = source.rasterize(code).unwrap();
            assert!(g.ascent() >= 0 && g.descent() >= 0);
            assert!(g.ascent() <= m.max_ascent, "ascent of #{}", code);
            assert!(g.descent() <= m.max_descent, "descent of #{}", code);
        }
        assert!(m.cell_height() >= m.ink_height());
    }

    #[test]
    fn test_cell_is_enlarged_to_fit_ink() {
        let mut source = mono_source().with_glyph(0xC5, GlyphBitmap::solid(10, 33, 1, 33));
        let (result, diags) = scan(&mut source, ScanOptions::default());
        let m = result.unwrap();

        assert_eq!(m.max_ascent, 33);
        assert_eq!(m.ink_height(), 40);
        assert_eq!(m.cell.height, 40);
        assert!(diags.contains(WarningCode::AbsoluteHeightExceeded));
        assert!(diags.contains(WarningCode::RegularHeightExceeded));
        assert!(diags.contains(WarningCode::CellEnlarged));
    }

    #[test]
    fn test_code_outside_scan_range_is_ignored() {
        // 255 is never scanned, whatever the output range will be
        let mut source = mono_source().with_glyph(255, GlyphBitmap::solid(10, 60, 0, 60));
        let (result, diags) = scan(&mut source, ScanOptions::default());
        assert_eq!(result.unwrap().cell.height, 36);
        assert!(!diags.contains(WarningCode::CellEnlarged));
    }

    #[test]
    fn test_forced_origin_replaces_detected() {
        let mut source = mono_source();
        let (result, _) = scan(&mut source, ScanOptions::new(Some(-5), BaselineMode::Detect));
        let m = result.unwrap();
        assert_eq!(m.detected_baseline, -5);
        assert_eq!(m.baseline, -5);
        assert!(m.origin_forced);
        // maxima are still measured
        assert_eq!(m.max_descent, 7);
    }

    #[test]
    fn test_calculated_baseline_mode() {
        let mut m = GlyphBitmap::solid(10, 23, 1, 23).with_vertical_advance(33);
        m.advance = 12;
        let mut source = mono_source().with_glyph('M' as u32, m);
        let (result, _) = scan(&mut source, ScanOptions::new(None, BaselineMode::Calculate));
        let metrics = result.unwrap();
        assert_eq!(metrics.calculated_baseline, -3);
        assert_eq!(metrics.baseline, -3);
        assert_eq!(metrics.detected_baseline, -7);
    }

    #[test]
    fn test_positive_baseline_fails() {
        let mut source = mono_source();
        let (result, _) = scan(&mut source, ScanOptions::new(Some(3), BaselineMode::Detect));
        assert!(matches!(result, Err(ScanError::PositiveBaseline(3))));

        let mut m = GlyphBitmap::solid(10, 23, 1, 23).with_vertical_advance(40);
        m.advance = 12;
        let mut source = mono_source().with_glyph('M' as u32, m);
        let (result, _) = scan(&mut source, ScanOptions::new(None, BaselineMode::Calculate));
        assert!(matches!(result, Err(ScanError::PositiveBaseline(4))));
    }

    #[test]
    fn test_unrasterizable_glyph_aborts_scan() {
        let mut source = mono_source().strict();
        let (result, _) = scan(&mut source, ScanOptions::default());
        match result {
            Err(ScanError::Glyph { code, .. }) => assert_eq!(code, 1),
            other => panic!("expected glyph failure, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_tiny_size() {
        let mut source = mono_source();
        let mut diags = Diagnostics::new();
        let result = scan_metrics(
            &mut source,
            "mono",
            &RasterSize::new(1, 72),
            &ScanOptions::default(),
            &mut diags,
        );
        assert!(matches!(result, Err(ScanError::InvalidSize(1))));
    }
}
