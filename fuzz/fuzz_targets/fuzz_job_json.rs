#![no_main]

use fontmatrix_backend::{FontPipeline, MatrixRenderer, TableGlyphSource};
use fontmatrix_spec::{validate_job, FontJob, GlyphBitmap};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(job) = FontJob::from_json(text) else {
        return;
    };
    if !validate_job(&job).is_ok() {
        return;
    }

    // Any job that passes validation must render without panicking.
    let mut m = GlyphBitmap::solid(5, 7, 0, 7).with_vertical_advance(10);
    m.advance = 6;
    let mut source = TableGlyphSource::new(10)
        .with_blank_advance(6)
        .with_glyph('M' as u32, m)
        .with_glyph('g' as u32, GlyphBitmap::solid(5, 7, 0, 5))
        .with_glyph('|' as u32, GlyphBitmap::solid(1, 14, 2, 12));

    let Ok(prepared) = FontPipeline::prepare(&mut source, &job) else {
        return;
    };
    for kind in &job.renderers {
        if let Ok(def) = kind.render(&prepared.metrics, prepared.range, &prepared.placements) {
            assert_eq!(def.buffer_size(), def.glyph_bytes * def.count);
        }
    }
});
