//! Character-art text dump of every glyph cell.

use std::fmt::Write;

use fontmatrix_spec::WriterKind;

use super::{art_row, is_baseline_row, metadata_lines, Artifact, WriterError};
use crate::render::FontDefinition;

const RULE: &str = "------------------------------------------------------";

pub(super) fn write(def: &FontDefinition<'_>, basename: &str) -> Result<Artifact, WriterError> {
    let mut out = String::new();

    writeln!(out, "{}", RULE)?;
    for line in metadata_lines(def) {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;

    for glyph in 0..def.count {
        writeln!(out, "----- #{} ------------------ ", def.first as usize + glyph)?;
        for row in 0..def.matrix_height as usize {
            out.push_str(&art_row(def, glyph, row));
            if is_baseline_row(def, row) {
                out.push_str("    ____");
            }
            out.push('\n');
        }
    }

    Ok(Artifact::new(
        WriterKind::Ascii,
        format!("{}.txt", basename),
        out.into_bytes(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::test_support::{tiny_definition, tiny_metrics};
    use fontmatrix_spec::RendererKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ascii_dump() {
        let m = tiny_metrics();
        let def = tiny_definition(&m, RendererKind::OneBit);
        let artifact = write(&def, "tiny").unwrap();
        assert_eq!(artifact.file_name, "tiny.txt");

        let text = artifact.as_text().unwrap();
        let body = text.split("\n\n").nth(1).unwrap();
        assert_eq!(
            body,
            "----- #48 ------------------ \n\
             ....\n\
             ....    ____\n\
             ....\n\
             ----- #49 ------------------ \n\
             *...\n\
             .*..    ____\n\
             ..*.\n"
        );
        assert!(text.starts_with(RULE));
        assert!(text.contains("  baseline:     -1\n"));
    }

    #[test]
    fn test_two_bit_rows_are_twice_as_wide() {
        let m = tiny_metrics();
        let def = tiny_definition(&m, RendererKind::TwoBit);
        let text = String::from_utf8(write(&def, "tiny").unwrap().data).unwrap();
        assert!(text.contains("\n..*.....    ____\n"));
    }
}
