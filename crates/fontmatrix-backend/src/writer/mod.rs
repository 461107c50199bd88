//! Output writers.
//!
//! Writers serialize a sealed [`FontDefinition`] into file artifacts. They
//! only read the composed buffer and the metrics; all geometry has been
//! fixed by the renderer. Nothing here touches the file system: each writer
//! returns in-memory [`Artifact`]s that the caller stores where it likes.

mod ascii;
mod c_raw;
mod preview;
mod raw;

pub use self::preview::{encode_preview, PngConfig, PngError, PreviewSheet, CELLS_PER_ROW};

use fontmatrix_spec::{ArtifactRecord, BackendError, WriterKind};
use thiserror::Error;

use crate::render::FontDefinition;

/// Errors raised while serializing a font definition.
#[derive(Debug, Error)]
pub enum WriterError {
    /// Text formatting failed.
    #[error("formatting output failed")]
    Format(#[from] std::fmt::Error),

    /// The PNG preview could not be encoded.
    #[error(transparent)]
    Png(#[from] PngError),

    /// The basename cannot be used for file names or identifiers.
    #[error("invalid output basename '{0}'")]
    InvalidBasename(String),
}

impl BackendError for WriterError {
    fn code(&self) -> &'static str {
        match self {
            WriterError::Format(_) => "WRITER_001",
            WriterError::Png(_) => "WRITER_002",
            WriterError::InvalidBasename(_) => "WRITER_003",
        }
    }

    fn category(&self) -> &'static str {
        "writer"
    }
}

/// One output file, still in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Writer that produced the file.
    pub writer: WriterKind,
    /// File name including extension, without directory.
    pub file_name: String,
    /// File contents.
    pub data: Vec<u8>,
    /// BLAKE3 hex digest of `data`.
    pub hash: String,
}

impl Artifact {
    pub fn new(writer: WriterKind, file_name: impl Into<String>, data: Vec<u8>) -> Self {
        let hash = blake3::hash(&data).to_hex().to_string();
        Self {
            writer,
            file_name: file_name.into(),
            data,
            hash,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Contents as text, if the artifact is valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }

    /// Report entry for this artifact stored at `path`.
    pub fn record(&self, path: impl Into<String>) -> ArtifactRecord {
        ArtifactRecord {
            writer: self.writer,
            path: path.into(),
            hash: self.hash.clone(),
            size: self.size(),
        }
    }
}

/// An output format.
pub trait FontWriter {
    /// Name used on the command line.
    fn name(&self) -> &'static str;

    /// Serializes `definition`; file names are derived from `basename`.
    fn write(
        &self,
        definition: &FontDefinition<'_>,
        basename: &str,
    ) -> Result<Vec<Artifact>, WriterError>;
}

impl FontWriter for WriterKind {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn write(
        &self,
        definition: &FontDefinition<'_>,
        basename: &str,
    ) -> Result<Vec<Artifact>, WriterError> {
        if basename.is_empty() {
            return Err(WriterError::InvalidBasename(basename.to_string()));
        }
        match self {
            WriterKind::Ascii => ascii::write(definition, basename).map(|a| vec![a]),
            WriterKind::CRaw => c_raw::write(definition, basename),
            WriterKind::Raw => Ok(vec![raw::write(definition, basename)]),
            WriterKind::Png => preview::write(definition, basename).map(|a| vec![a]),
        }
    }
}

/// Turns a basename into a C identifier fragment: upper case, everything
/// that is not an ASCII letter or digit becomes `_`.
pub fn define_name(basename: &str) -> String {
    basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// The metadata block shared by the text formats, one line per entry.
pub(crate) fn metadata_lines(def: &FontDefinition<'_>) -> Vec<String> {
    let m = def.metrics;
    vec![
        "FONT:".to_string(),
        format!("  name:         '{}'", m.name),
        format!("  range:        #{}..#{}", def.first, def.last()),
        format!("  size:         {} pt", m.size.points),
        format!("  dpi:          {}", m.size.dpi_label()),
        format!("  matrix:       {} x {}", def.matrix_width, def.matrix_height),
        format!("  renderer:     '{}'", def.name()),
        "GLYPH:".to_string(),
        format!("  glyph-matrix: {}", m.cell),
        format!("  nl-height:    {}", m.absolute_height),
        format!("  max-ascent:   {}", m.max_ascent),
        format!("  max-descent:  {}", m.max_descent),
        format!("  baseline:     {}", m.baseline),
        format!("  em:           {}", m.em),
        format!("  ex:           {}", m.ex),
        format!("  we:           {}", m.we),
    ]
}

/// Character art for one encoded row: `*` for a set bit, `.` otherwise.
pub(crate) fn art_row(def: &FontDefinition<'_>, glyph: usize, row: usize) -> String {
    (0..def.matrix_width)
        .map(|x| if def.bit(glyph, row, x) { '*' } else { '.' })
        .collect()
}

/// Returns true if `row` is the last row on or above the origin line.
pub(crate) fn is_baseline_row(def: &FontDefinition<'_>, row: usize) -> bool {
    row as i32 == def.metrics.baseline_row()
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use fontmatrix_spec::RendererKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_define_name() {
        assert_eq!(define_name("PT_Mono_55FT_32_12x36"), "PT_MONO_55FT_32_12X36");
        assert_eq!(define_name("my-font v2"), "MY_FONT_V2");
    }

    #[test]
    fn test_metadata_block() {
        let m = tiny_metrics();
        let def = tiny_definition(&m, RendererKind::TwoBit);
        let lines = metadata_lines(&def);
        assert_eq!(lines[0], "FONT:");
        assert_eq!(lines[2], "  range:        #48..#49");
        assert_eq!(lines[5], "  matrix:       8 x 3");
        assert_eq!(lines[6], "  renderer:     '2bit'");
        assert_eq!(lines[8], "  glyph-matrix: 4 x 3");
        assert_eq!(lines.len(), 16);
    }

    #[test]
    fn test_art_row_covers_encoded_width() {
        let m = tiny_metrics();
        let def = tiny_definition(&m, RendererKind::TwoBit);
        assert_eq!(art_row(&def, 1, 0), "*.......");
        assert_eq!(art_row(&def, 1, 1), "..*.....");
        assert!(is_baseline_row(&def, 1));
    }

    #[test]
    fn test_every_writer_hashes_its_output() {
        let m = tiny_metrics();
        let def = tiny_definition(&m, RendererKind::OneBit);
        for kind in WriterKind::ALL {
            let artifacts = kind.write(&def, "tiny").unwrap();
            assert!(!artifacts.is_empty());
            for a in artifacts {
                assert_eq!(a.writer, kind);
                assert!(a.file_name.starts_with("tiny."));
                assert_eq!(a.hash, blake3::hash(&a.data).to_hex().to_string());
                let record = a.record(format!("out/{}", a.file_name));
                assert_eq!(record.size, a.data.len());
            }
        }
        assert!(WriterKind::Raw.write(&def, "").is_err());
    }
}
