//! The matrix buffer, byte for byte.

use fontmatrix_spec::WriterKind;

use super::Artifact;
use crate::render::FontDefinition;

pub(super) fn write(def: &FontDefinition<'_>, basename: &str) -> Artifact {
    Artifact::new(
        WriterKind::Raw,
        format!("{}.bin", basename),
        def.buffer.as_bytes().to_vec(),
    )
}
