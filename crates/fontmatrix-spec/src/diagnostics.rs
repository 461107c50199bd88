//! Non-fatal diagnostics raised while scanning and placing glyphs.
//!
//! Warnings never change control flow. Stages push them into a
//! [`Diagnostics`] collector handed in by the caller, and the caller decides
//! how to surface them (colored terminal output, JSON report, ...).

use serde::{Deserialize, Serialize};

/// Warning codes for pipeline diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningCode {
    /// W001: Measured ink height exceeds the font's absolute line height
    AbsoluteHeightExceeded,
    /// W002: Measured ink height exceeds the nominal vertical advance
    RegularHeightExceeded,
    /// W003: Cell height was enlarged to fit the measured ink
    CellEnlarged,
    /// W004: Glyph was above the cell and moved down
    GlyphMovedDown,
    /// W005: Glyph was below the cell and moved up
    GlyphMovedUp,
    /// W006: Glyph does not fit vertically and will be clipped
    GlyphClippedY,
    /// W007: Glyph does not fit horizontally and will be clipped
    GlyphClippedX,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::AbsoluteHeightExceeded => "W001",
            WarningCode::RegularHeightExceeded => "W002",
            WarningCode::CellEnlarged => "W003",
            WarningCode::GlyphMovedDown => "W004",
            WarningCode::GlyphMovedUp => "W005",
            WarningCode::GlyphClippedY => "W006",
            WarningCode::GlyphClippedX => "W007",
        }
    }

    /// Default severity of this code.
    pub fn severity(&self) -> Severity {
        match self {
            WarningCode::RegularHeightExceeded | WarningCode::CellEnlarged => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// How loudly a diagnostic should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Advisory; shown in verbose mode only.
    Info,
    /// Always shown.
    Warning,
}

/// A single diagnostic entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable code.
    pub code: WarningCode,
    /// Severity derived from the code.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Character code the diagnostic refers to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_code: Option<u32>,
}

impl Diagnostic {
    /// Creates a font-wide diagnostic.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: message.into(),
            char_code: None,
        }
    }

    /// Creates a diagnostic attached to one character.
    pub fn for_glyph(code: WarningCode, char_code: u32, message: impl Into<String>) -> Self {
        Self {
            char_code: Some(char_code),
            ..Self::new(code, message)
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.char_code {
            Some(c) => write!(f, "{}: glyph #{}: {}", self.code, c, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

/// Ordered collector of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Appends a font-wide diagnostic.
    pub fn report(&mut self, code: WarningCode, message: impl Into<String>) {
        self.push(Diagnostic::new(code, message));
    }

    /// Appends a diagnostic for one character.
    pub fn report_glyph(&mut self, code: WarningCode, char_code: u32, message: impl Into<String>) {
        self.push(Diagnostic::for_glyph(code, char_code, message));
    }

    /// Moves all entries of `other` to the end of this collector.
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// All entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Entries with [`Severity::Warning`].
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Entries with the given code.
    pub fn with_code(&self, code: WarningCode) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.code == code)
    }

    /// Returns true if any entry has the given code.
    pub fn contains(&self, code: WarningCode) -> bool {
        self.entries.iter().any(|d| d.code == code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_code() {
        assert_eq!(WarningCode::CellEnlarged.severity(), Severity::Info);
        assert_eq!(WarningCode::RegularHeightExceeded.severity(), Severity::Info);
        assert_eq!(WarningCode::GlyphClippedX.severity(), Severity::Warning);
    }

    #[test]
    fn test_warnings_filter_skips_info() {
        let mut diags = Diagnostics::new();
        diags.report(WarningCode::CellEnlarged, "enlarge matrix height from 30 to 35");
        diags.report_glyph(WarningCode::GlyphMovedDown, 65, "move down (-2->0)");

        assert_eq!(diags.len(), 2);
        let warnings: Vec<_> = diags.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].char_code, Some(65));
        assert!(diags.contains(WarningCode::CellEnlarged));
        assert!(!diags.contains(WarningCode::GlyphMovedUp));
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::for_glyph(WarningCode::GlyphClippedY, 103, "will be clipped");
        assert_eq!(d.to_string(), "W006: glyph #103: will be clipped");
    }

    #[test]
    fn test_diagnostics_serialize_as_list() {
        let mut diags = Diagnostics::new();
        diags.report(WarningCode::AbsoluteHeightExceeded, "36>35");
        let json = serde_json::to_value(&diags).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["code"], "AbsoluteHeightExceeded");
        assert_eq!(json[0]["severity"], "warning");
        assert!(json[0].get("char_code").is_none());
    }
}
