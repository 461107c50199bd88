//! End-to-end scenarios for scanning, placement and rendering.
//!
//! Everything runs on in-memory glyph tables so no font file is needed.

use fontmatrix_backend::{
    clamp_vertical, place_glyph, scan_metrics, FontPipeline, GlyphSource, MatrixRenderer,
    ScanOptions, TableGlyphSource,
};
use fontmatrix_spec::{
    CharRange, Diagnostics, FontJob, FontMetrics, GlyphBitmap, PixelSize, RasterSize,
    RendererKind, WarningCode, SCAN_FIRST, SCAN_LAST,
};

fn metrics(cell_w: u32, cell_h: u32, baseline: i32) -> FontMetrics {
    let mut m = FontMetrics::new("scenario", RasterSize::new(32, 72));
    m.cell = PixelSize::new(cell_w, cell_h);
    m.baseline = baseline;
    m
}

/// A table with glyphs of many shapes: code `c` is `c % 9 + 1` wide,
/// `c % 23` tall and sits `c % 7` rows below the baseline.
fn varied_source() -> TableGlyphSource {
    let mut m = GlyphBitmap::solid(10, 23, 1, 23).with_vertical_advance(36);
    m.advance = 12;
    let mut source = TableGlyphSource::new(36).with_blank_advance(12);
    for code in SCAN_FIRST..=SCAN_LAST {
        let height = code % 23;
        let below = (code % 7) as i32;
        let glyph = GlyphBitmap::solid(code % 9 + 1, height, 0, height as i32 - below);
        source.insert(code, glyph);
    }
    source.insert('M' as u32, m);
    source
}

// ============================================================================
// Metrics Scanner
// ============================================================================

#[test]
fn test_scanned_maxima_are_true_maxima() {
    let mut source = varied_source();
    let mut diags = Diagnostics::new();
    let m = scan_metrics(
        &mut source,
        "varied",
        &RasterSize::new(32, 72),
        &ScanOptions::default(),
        &mut diags,
    )
    .unwrap();

    let mut max_ascent = 0;
    let mut max_descent = 0;
    for code in SCAN_FIRST..=SCAN_LAST {
        let g = source.rasterize(code).unwrap();
        assert!(g.ascent() >= 0 && g.descent() >= 0);
        max_ascent = max_ascent.max(g.ascent());
        max_descent = max_descent.max(g.descent());
    }
    assert_eq!(m.max_ascent, max_ascent);
    assert_eq!(m.max_descent, max_descent);
    assert!(m.cell_height() >= m.ink_height());
    assert!(m.baseline <= 0);
}

// ============================================================================
// Placement and rendering
// ============================================================================

#[test]
fn test_glyph_lands_on_computed_rows() {
    // cell 12x36, 10x20 glyph, top bearing 28, baseline -7: 36 - 7 - 28 = 1
    let m = metrics(12, 36, -7);
    let mut diags = Diagnostics::new();
    let p = place_glyph(65, GlyphBitmap::solid(10, 20, 0, 28), &m, &mut diags);
    assert_eq!(p.offset_y, 1);
    assert!(!p.is_clipped());
    assert!(diags.is_empty());

    let def = RendererKind::OneBit
        .render(&m, CharRange::new(65, 65), &[p])
        .unwrap();
    for row in 0..36 {
        for x in 0..12 {
            let expected = (1..=20).contains(&row) && x < 10;
            assert_eq!(def.bit(0, row, x), expected, "row {} column {}", row, x);
        }
    }
}

#[test]
fn test_tall_glyph_is_truncated_to_cell() {
    let m = metrics(12, 36, -7);
    let mut diags = Diagnostics::new();
    let p = place_glyph(124, GlyphBitmap::solid(10, 40, 0, 28), &m, &mut diags);
    assert!(p.clipped_y);
    assert!(diags.contains(WarningCode::GlyphClippedY));

    let def = RendererKind::OneBit
        .render(&m, CharRange::new(124, 124), &[p])
        .unwrap();
    assert_eq!(def.buffer.len(), 2 * 36);
    assert_eq!(def.clipped_pixels, 4 * 10);
    for row in 0..36 {
        assert_eq!(def.buffer.row(0, row), Some(&[0xFF, 0xC0][..]), "row {}", row);
    }
}

#[test]
fn test_solid_glyph_fills_its_area() {
    for (w, h) in [(1, 1), (7, 3), (8, 8), (9, 5), (17, 12)] {
        let m = metrics(w + 3, h + 2, 0);
        let mut glyph = GlyphBitmap::solid(w, h, 0, 0);
        glyph.top_bearing = h as i32 + 2;
        let mut diags = Diagnostics::new();
        let p = place_glyph(33, glyph, &m, &mut diags);
        assert_eq!((p.offset_x, p.offset_y), (0, 0));

        let def = RendererKind::OneBit
            .render(&m, CharRange::new(33, 33), &[p])
            .unwrap();
        assert_eq!(def.matrix_pitch, m.cell.width.div_ceil(8));
        for row in 0..h as usize {
            for x in 0..w {
                assert!(def.bit(0, row, x), "{}x{}: ({}, {})", w, h, x, row);
            }
        }
    }
}

#[test]
fn test_buffer_size_is_glyph_bytes_times_count() {
    let m = metrics(11, 19, -4);
    for kind in RendererKind::ALL {
        for (from, to) in [(0, 0), (32, 126), (0, 255), (200, 100)] {
            let range = CharRange::new(from, to);
            let composition = kind.init(&m, range).unwrap();
            let geometry = composition.geometry();
            assert_eq!(composition.buffer().len(), geometry.glyph_bytes * range.len());
            assert!(composition.buffer().as_bytes().iter().all(|&b| b == 0));
        }
    }
}

#[test]
fn test_clamping_twice_changes_nothing() {
    let m = metrics(12, 36, -7);
    for top in -50..60 {
        for height in [0u32, 5, 20, 36, 44] {
            let mut diags = Diagnostics::new();
            let p = place_glyph(1, GlyphBitmap::solid(4, height, 0, top), &m, &mut diags);
            let (again, shift) = clamp_vertical(p.offset_y, height as i32, 36);
            assert_eq!(again, p.offset_y);
            assert_eq!(shift, None);
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_reversed_range_is_normalized() {
    let mut source = varied_source();
    let job = FontJob::new("varied.ttf", 32).with_range(200, 100);
    let prepared = FontPipeline::prepare(&mut source, &job).unwrap();

    assert_eq!(prepared.range, CharRange::new(100, 200));
    assert_eq!(prepared.placements.len(), 101);
    assert_eq!(prepared.placements[0].code, 100);

    let def = prepared.render(RendererKind::TwoBit).unwrap();
    assert_eq!(def.first, 100);
    assert_eq!(def.last(), 200);
}

#[test]
fn test_last_glyph_of_range_is_rendered() {
    let mut m = GlyphBitmap::solid(6, 7, 0, 7).with_vertical_advance(8);
    m.advance = 8;
    let mut source = TableGlyphSource::new(8)
        .with_glyph('M' as u32, m)
        .with_glyph('Z' as u32, GlyphBitmap::solid(6, 7, 0, 7));
    let job = FontJob::new("z.ttf", 8).with_range('X' as u32, 'Z' as u32);
    let prepared = FontPipeline::prepare(&mut source, &job).unwrap();

    for kind in RendererKind::ALL {
        let def = prepared.render(kind).unwrap();
        let last = def.glyph_for_code('Z' as u32).unwrap();
        assert!(last.iter().any(|&b| b != 0), "{} dropped the last glyph", kind);
    }
}
