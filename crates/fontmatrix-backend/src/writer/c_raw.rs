//! C header plus raw array body.
//!
//! The `.c` file holds only the initializer list so it can be included
//! inside any array declaration, with whatever storage qualifier the target
//! needs:
//!
//! ```c
//! #include "PT_Mono_32_12x36.h"
//! static const uint8_t font_data[FONT_BUFFER_SIZE] = {
//!   #include "PT_Mono_32_12x36.c"
//! };
//! ```

use std::fmt::Write;

use fontmatrix_spec::WriterKind;

use super::{art_row, define_name, is_baseline_row, metadata_lines, Artifact, WriterError};
use crate::render::FontDefinition;

const RULE: &str = "------------------------------------------------------";

pub(super) fn write(
    def: &FontDefinition<'_>,
    basename: &str,
) -> Result<Vec<Artifact>, WriterError> {
    let guard = define_name(basename);
    let header = write_header(def, &guard)?;
    let source = write_source(def, &guard)?;
    Ok(vec![
        Artifact::new(WriterKind::CRaw, format!("{}.h", basename), header.into_bytes()),
        Artifact::new(WriterKind::CRaw, format!("{}.c", basename), source.into_bytes()),
    ])
}

fn write_comment_block(out: &mut String, def: &FontDefinition<'_>) -> std::fmt::Result {
    writeln!(out, "/* {}", RULE)?;
    for line in metadata_lines(def) {
        writeln!(out, " * {}", line)?;
    }
    writeln!(out, " * {}", RULE)?;
    writeln!(out, " */")?;
    writeln!(out)
}

fn write_header(def: &FontDefinition<'_>, guard: &str) -> Result<String, WriterError> {
    let m = def.metrics;
    let mut out = String::new();

    writeln!(out, "#ifndef __{}_H__", guard)?;
    writeln!(out, "#define __{}_H__ 1", guard)?;
    write_comment_block(&mut out, def)?;

    writeln!(out, "#define FONT_NAME           \"{}\"", m.name)?;
    writeln!(out, "#define FONT_START_WITH     {}", def.first)?;
    writeln!(out, "#define FONT_NUM_CHARS      {}", def.count)?;
    writeln!(out, "#define FONT_GLYPH_WIDTH    {}", m.cell.width)?;
    writeln!(out, "#define FONT_GLYPH_HEIGHT   {}", m.cell.height)?;
    writeln!(out, "#define FONT_MATRIX_WIDTH   {}", def.matrix_width)?;
    writeln!(out, "#define FONT_MATRIX_HEIGHT  {}", def.matrix_height)?;
    writeln!(out, "#define FONT_BUFFER_SIZE    {}", def.buffer_size())?;

    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, "#endif // __{}_H__", guard)?;
    Ok(out)
}

fn write_source(def: &FontDefinition<'_>, guard: &str) -> Result<String, WriterError> {
    let mut out = String::new();
    let total = def.buffer_size();
    let mut written = 0;

    writeln!(out, "#define __{}_C__ 1", guard)?;
    write_comment_block(&mut out, def)?;

    for glyph in 0..def.count {
        writeln!(out, "// ----- #{} ------------------ ", def.first as usize + glyph)?;
        for row in 0..def.matrix_height as usize {
            for &byte in def.buffer.row(glyph, row).unwrap_or_default() {
                written += 1;
                if written == total {
                    write!(out, "0x{:02X}", byte)?;
                } else {
                    write!(out, "0x{:02X},", byte)?;
                }
            }
            write!(out, "     // {}", art_row(def, glyph, row))?;
            if is_baseline_row(def, row) {
                out.push_str("  __");
            }
            out.push('\n');
        }
    }

    writeln!(out)?;
    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, "// ==================== end of file ====================")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::test_support::{tiny_definition, tiny_metrics};
    use fontmatrix_spec::RendererKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_defines() {
        let m = tiny_metrics();
        let def = tiny_definition(&m, RendererKind::TwoBit);
        let artifacts = write(&def, "tiny_4_4x3").unwrap();
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].file_name, "tiny_4_4x3.h");
        assert_eq!(artifacts[1].file_name, "tiny_4_4x3.c");

        let header = artifacts[0].as_text().unwrap();
        assert!(header.starts_with("#ifndef __TINY_4_4X3_H__\n#define __TINY_4_4X3_H__ 1\n"));
        assert!(header.contains(" *   renderer:     '2bit'\n"));
        assert!(header.contains("#define FONT_NAME           \"tiny\"\n"));
        assert!(header.contains("#define FONT_START_WITH     48\n"));
        assert!(header.contains("#define FONT_NUM_CHARS      2\n"));
        assert!(header.contains("#define FONT_GLYPH_WIDTH    4\n"));
        assert!(header.contains("#define FONT_MATRIX_WIDTH   8\n"));
        assert!(header.contains("#define FONT_BUFFER_SIZE    6\n"));
        assert!(header.ends_with("\n\n\n#endif // __TINY_4_4X3_H__\n"));
    }

    #[test]
    fn test_source_body() {
        let m = tiny_metrics();
        let def = tiny_definition(&m, RendererKind::OneBit);
        let artifacts = write(&def, "tiny").unwrap();
        let source = artifacts[1].as_text().unwrap();

        let body: Vec<&str> = source
            .lines()
            .skip_while(|l| !l.starts_with("// -----"))
            .take(8)
            .collect();
        assert_eq!(
            body,
            vec![
                "// ----- #48 ------------------ ",
                "0x00,     // ....",
                "0x00,     // ....  __",
                "0x00,     // ....",
                "// ----- #49 ------------------ ",
                "0x80,     // *...",
                "0x40,     // .*..  __",
                "0x20     // ..*.",
            ]
        );
        assert!(source.ends_with("// ==================== end of file ====================\n"));
    }

    #[test]
    fn test_source_byte_count_matches_buffer() {
        let m = tiny_metrics();
        let def = tiny_definition(&m, RendererKind::TwoBit);
        let artifacts = write(&def, "tiny").unwrap();
        let source = artifacts[1].as_text().unwrap();
        assert_eq!(source.matches("0x").count(), def.buffer_size());
        assert_eq!(source.matches("0x").count(), source.matches(',').count() + 1);
    }
}
