//! Job configuration: which font, at which size, rendered how, written where.
//!
//! A job is usually assembled by the CLI from a JSON job file and command
//! line overrides. Validation lives in [`crate::validation`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SpecError;
use crate::metrics::{BaselineMode, RasterSize, DEFAULT_DPI};

/// Highest character code a matrix font can hold.
pub const MAX_CHAR_CODE: u32 = 255;

/// Codes always scanned for ascent/descent, independent of the output range.
pub const SCAN_FIRST: u32 = 1;
pub const SCAN_LAST: u32 = 254;

/// Inclusive character-code interval, always stored with `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct CharRange {
    from: u32,
    to: u32,
}

impl CharRange {
    /// Creates a range; reversed endpoints are swapped.
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            from: a.min(b),
            to: a.max(b),
        }
    }

    /// Printable ASCII, `[32, 126]`.
    pub fn printable_ascii() -> Self {
        Self::new(32, 126)
    }

    pub fn from(&self) -> u32 {
        self.from
    }

    pub fn to(&self) -> u32 {
        self.to
    }

    /// Number of codes in the range, always at least 1.
    pub fn len(&self) -> usize {
        (self.to - self.from + 1) as usize
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if `code` lies inside the range.
    pub fn contains(&self, code: u32) -> bool {
        (self.from..=self.to).contains(&code)
    }

    /// Iterates the codes in ascending order.
    pub fn codes(&self) -> std::ops::RangeInclusive<u32> {
        self.from..=self.to
    }

    /// Returns true if both endpoints fit in a matrix font.
    pub fn is_within_limit(&self) -> bool {
        self.to <= MAX_CHAR_CODE
    }
}

impl Default for CharRange {
    fn default() -> Self {
        Self::printable_ascii()
    }
}

impl From<[u32; 2]> for CharRange {
    fn from(v: [u32; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<CharRange> for [u32; 2] {
    fn from(r: CharRange) -> Self {
        [r.from, r.to]
    }
}

impl std::fmt::Display for CharRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}..#{}", self.from, self.to)
    }
}

/// Output pixel encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RendererKind {
    /// One bit per pixel.
    #[serde(rename = "1bit")]
    OneBit,
    /// Two bits per pixel; only the high bit of each slot is drawn.
    #[serde(rename = "2bit")]
    TwoBit,
}

impl RendererKind {
    /// All renderers in a stable order.
    pub const ALL: [RendererKind; 2] = [RendererKind::OneBit, RendererKind::TwoBit];

    /// Name used on the command line and in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            RendererKind::OneBit => "1bit",
            RendererKind::TwoBit => "2bit",
        }
    }

    /// Looks a renderer up by name.
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == name)
    }

    /// Bits per output pixel.
    pub fn bits_per_pixel(&self) -> u32 {
        match self {
            RendererKind::OneBit => 1,
            RendererKind::TwoBit => 2,
        }
    }

    /// One-line description for help output.
    pub fn description(&self) -> &'static str {
        match self {
            RendererKind::OneBit => "1 bit for each pixel in the fixed matrix (monospaced)",
            RendererKind::TwoBit => "2 bits for each pixel in the fixed matrix (monospaced)",
        }
    }
}

impl std::fmt::Display for RendererKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriterKind {
    /// Character-art text dump.
    Ascii,
    /// C header plus C source with the raw matrix bytes.
    CRaw,
    /// The matrix buffer verbatim.
    Raw,
    /// PNG preview sheet.
    Png,
}

impl WriterKind {
    /// All writers in a stable order.
    pub const ALL: [WriterKind; 4] = [
        WriterKind::Ascii,
        WriterKind::CRaw,
        WriterKind::Raw,
        WriterKind::Png,
    ];

    /// Name used on the command line and in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            WriterKind::Ascii => "ascii",
            WriterKind::CRaw => "c-raw",
            WriterKind::Raw => "raw",
            WriterKind::Png => "png",
        }
    }

    /// Looks a writer up by name.
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.as_str() == name)
    }

    /// One-line description for help output.
    pub fn description(&self) -> &'static str {
        match self {
            WriterKind::Ascii => "simple ASCII art of the font",
            WriterKind::CRaw => "raw C source of the final matrix data",
            WriterKind::Raw => "binary dump of the final matrix data",
            WriterKind::Png => "PNG preview sheet of all glyph cells",
        }
    }
}

impl std::fmt::Display for WriterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete font generation job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontJob {
    /// Path of the font file.
    #[serde(default)]
    pub font: PathBuf,

    /// Point size.
    #[serde(default)]
    pub size: u32,

    /// Vertical resolution.
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Horizontal resolution; absent means "same as dpi".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdpi: Option<u32>,

    /// Forced baseline, replacing the detected one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<i32>,

    /// Baseline selection mode.
    #[serde(default)]
    pub baseline: BaselineMode,

    /// Characters to render.
    #[serde(default)]
    pub range: CharRange,

    /// Encodings to render.
    #[serde(default = "default_renderers")]
    pub renderers: Vec<RendererKind>,

    /// Output formats to write.
    #[serde(default = "default_writers")]
    pub writers: Vec<WriterKind>,

    /// Output basename without extension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Directory receiving the written files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
}

fn default_dpi() -> u32 {
    DEFAULT_DPI
}

fn default_renderers() -> Vec<RendererKind> {
    vec![RendererKind::OneBit]
}

fn default_writers() -> Vec<WriterKind> {
    vec![WriterKind::Ascii]
}

impl FontJob {
    /// Creates a job with defaults for everything but font and size.
    pub fn new(font: impl Into<PathBuf>, size: u32) -> Self {
        Self {
            font: font.into(),
            size,
            dpi: default_dpi(),
            hdpi: None,
            origin: None,
            baseline: BaselineMode::default(),
            range: CharRange::default(),
            renderers: default_renderers(),
            writers: default_writers(),
            output: None,
            out_dir: None,
        }
    }

    /// Parses a job from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON job file.
    pub fn from_file(path: &Path) -> Result<Self, SpecError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Rasterization size of this job.
    pub fn raster_size(&self) -> RasterSize {
        RasterSize {
            points: self.size,
            dpi: self.dpi,
            hdpi: self.hdpi,
        }
    }

    /// Sets the resolution.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Sets a distinct horizontal resolution.
    pub fn with_hdpi(mut self, hdpi: u32) -> Self {
        self.hdpi = Some(hdpi);
        self
    }

    /// Forces the baseline.
    pub fn with_origin(mut self, origin: i32) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Sets the baseline mode.
    pub fn with_baseline(mut self, mode: BaselineMode) -> Self {
        self.baseline = mode;
        self
    }

    /// Sets the character range; reversed endpoints are swapped.
    pub fn with_range(mut self, from: u32, to: u32) -> Self {
        self.range = CharRange::new(from, to);
        self
    }

    /// Replaces the renderer list.
    pub fn with_renderers(mut self, renderers: Vec<RendererKind>) -> Self {
        self.renderers = renderers;
        self
    }

    /// Replaces the writer list.
    pub fn with_writers(mut self, writers: Vec<WriterKind>) -> Self {
        self.writers = writers;
        self
    }

    /// Sets the output basename.
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Sets the output directory.
    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }
}
