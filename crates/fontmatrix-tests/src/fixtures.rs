//! In-memory fonts and job files used across the end-to-end tests.
//!
//! No TrueType file ships with the repository, so the tests drive the
//! pipeline with [`TableGlyphSource`] fonts whose geometry is known exactly.

use fontmatrix_backend::TableGlyphSource;
use fontmatrix_spec::GlyphBitmap;

/// Line height of [`block_font`].
pub const BLOCK_LINE_HEIGHT: i32 = 10;

/// Horizontal advance of every [`block_font`] glyph.
pub const BLOCK_ADVANCE: i32 = 6;

/// Font path used in fixture jobs; the file itself never exists.
pub const BLOCK_FONT_PATH: &str = "fixtures/Block Sans.ttf";

/// Basename the block font gets at size 10 with the default naming.
pub const BLOCK_BASENAME: &str = "Block_Sans_10_6x10";

const GLYPH_M: [&str; 7] = [
    "*...*", "**.**", "*.*.*", "*.*.*", "*...*", "*...*", "*...*",
];

const GLYPH_W: [&str; 7] = [
    "*...*", "*...*", "*...*", "*.*.*", "*.*.*", "**.**", "*...*",
];

const GLYPH_X: [&str; 5] = ["*...*", ".*.*.", "..*..", ".*.*.", "*...*"];

const GLYPH_G: [&str; 7] = [
    ".****", "*...*", "*...*", ".****", "....*", "*...*", ".***.",
];

const BOX_UPPER: [&str; 7] = [
    "*****", "*...*", "*...*", "*...*", "*...*", "*...*", "*****",
];

const BOX_LOWER: [&str; 5] = ["*****", "*...*", "*...*", "*...*", "*****"];

const DESCENDERS: &str = "gjpqy";

/// A 5x7 block font on a 6x10 cell.
///
/// Upper case letters, digits and punctuation stand 7 rows above the
/// baseline, lower case letters 5 rows, and `g j p q y` reach 2 rows
/// below it. Codes outside printable ASCII are blank, so the scanned
/// metrics are: ascent 7, descent 2, baseline -2, cell 6x10.
pub fn block_font() -> TableGlyphSource {
    let mut font = TableGlyphSource::new(BLOCK_LINE_HEIGHT).with_blank_advance(BLOCK_ADVANCE);

    for code in 33u32..=126 {
        let c = char::from_u32(code).unwrap_or(' ');
        let glyph = if DESCENDERS.contains(c) {
            GlyphBitmap::from_rows(&GLYPH_G, 0, 5, BLOCK_ADVANCE)
        } else if c.is_ascii_lowercase() {
            GlyphBitmap::from_rows(&BOX_LOWER, 0, 5, BLOCK_ADVANCE)
        } else {
            GlyphBitmap::from_rows(&BOX_UPPER, 0, 7, BLOCK_ADVANCE)
        };
        font.insert(code, glyph);
    }

    font.insert(
        'M' as u32,
        GlyphBitmap::from_rows(&GLYPH_M, 0, 7, BLOCK_ADVANCE)
            .with_vertical_advance(BLOCK_LINE_HEIGHT),
    );
    font.insert('W' as u32, GlyphBitmap::from_rows(&GLYPH_W, 0, 7, BLOCK_ADVANCE));
    font.insert('x' as u32, GlyphBitmap::from_rows(&GLYPH_X, 0, 5, BLOCK_ADVANCE));
    font.insert(' ' as u32, GlyphBitmap::blank(BLOCK_ADVANCE));
    font
}

/// The block font with one glyph far taller than the line.
///
/// Code 124 (`|`) reaches 14 rows above the baseline, which enlarges the
/// cell to 14 + 2 = 16 rows and raises the height diagnostics.
pub fn tall_bar_font() -> TableGlyphSource {
    let mut font = block_font();
    font.insert(124, GlyphBitmap::solid(1, 16, 2, 14));
    font
}

/// A job file for the block font exercising every writer and renderer.
pub fn full_job_json(out_dir: &str) -> String {
    serde_json::json!({
        "font": BLOCK_FONT_PATH,
        "size": 10,
        "range": [48, 90],
        "renderers": ["1bit", "2bit"],
        "writers": ["ascii", "c-raw", "raw", "png"],
        "out_dir": out_dir,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontmatrix_backend::GlyphSource;
    use fontmatrix_spec::RasterSize;

    #[test]
    fn test_block_font_shapes() {
        let mut font = block_font();
        font.set_size(&RasterSize::new(10, 72)).unwrap();

        let m = font.rasterize('M' as u32).unwrap();
        assert_eq!((m.width, m.height, m.vertical_advance), (5, 7, 10));
        let g = font.rasterize('g' as u32).unwrap();
        assert_eq!((g.ascent(), g.descent()), (5, 2));
        let a = font.rasterize('a' as u32).unwrap();
        assert_eq!((a.ascent(), a.descent()), (5, 0));
        assert!(font.rasterize(200).unwrap().is_blank());
    }
}
