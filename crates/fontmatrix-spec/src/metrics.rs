//! Font-wide metrics shared by every pipeline stage.
//!
//! ```text
//!      cell.width
//!     |<--------->|
//!     |___________|_____________________
//!     |    **     |  ^             ^
//!     |           |  |             |
//!     |   ***     |  |             | max_ascent
//!     |     *     |  | cell.height |
//!     |     *     |  |             |
//!     |___*****___|__|_____________v____ origin (0)
//!     |           |  |   ^         ^
//!     |           |  |   |baseline | max_descent
//!     |___________|__v___|_________v____
//! ```
//!
//! The baseline is measured upward from the cell's bottom edge and is never
//! positive, so the origin row sits at `cell.height + baseline`.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// FreeType-style base resolution: pixels = points * dpi / 72.
pub const DEFAULT_DPI: u32 = 72;

/// Smallest point size the pipeline accepts.
pub const MIN_POINT_SIZE: u32 = 2;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for PixelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

/// The fixed rasterization size handed to the glyph source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RasterSize {
    /// Point size.
    pub points: u32,
    /// Vertical resolution in dpi.
    pub dpi: u32,
    /// Horizontal resolution in dpi; `None` means "same as `dpi`".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdpi: Option<u32>,
}

impl RasterSize {
    /// Creates a size with equal horizontal and vertical resolution.
    pub fn new(points: u32, dpi: u32) -> Self {
        Self {
            points,
            dpi,
            hdpi: None,
        }
    }

    /// Sets a distinct horizontal resolution.
    pub fn with_hdpi(mut self, hdpi: u32) -> Self {
        self.hdpi = Some(hdpi);
        self
    }

    /// Effective horizontal resolution.
    pub fn horizontal_dpi(&self) -> u32 {
        self.hdpi.unwrap_or(self.dpi)
    }

    /// Pixels per em along the vertical axis.
    pub fn pixels_per_em(&self) -> f32 {
        self.points as f32 * self.dpi as f32 / DEFAULT_DPI as f32
    }

    /// Horizontal stretch factor relative to the vertical axis.
    pub fn horizontal_scale(&self) -> f32 {
        if self.dpi == 0 {
            return 1.0;
        }
        self.horizontal_dpi() as f32 / self.dpi as f32
    }

    /// Human-readable resolution, "72" or "46 x 72" (horizontal first).
    pub fn dpi_label(&self) -> String {
        match self.hdpi {
            Some(h) => format!("{} x {}", h, self.dpi),
            None => self.dpi.to_string(),
        }
    }
}

/// How the active baseline is chosen after scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineMode {
    /// Use the detected (or forced) baseline.
    #[default]
    Detect,
    /// Use the baseline derived from the vertical advance of 'M'.
    Calculate,
}

impl BaselineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaselineMode::Detect => "detect",
            BaselineMode::Calculate => "calculate",
        }
    }
}

/// Metrics for one font at one size. Computed once by the scanner and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontMetrics {
    /// Identifier derived from the font file name.
    pub name: String,
    /// Rasterization size.
    pub size: RasterSize,
    /// Shared cell geometry of every glyph.
    pub cell: PixelSize,
    /// Line-to-line advance reported by the source.
    pub absolute_height: i32,
    /// Vertical advance of 'M'.
    pub regular_height: i32,
    /// Largest ink extent above the baseline (>= 0).
    pub max_ascent: i32,
    /// Largest ink extent below the baseline (>= 0).
    pub max_descent: i32,
    /// Active baseline used for placement (<= 0).
    pub baseline: i32,
    /// `-max_descent`, or the forced origin.
    pub detected_baseline: i32,
    /// `vertical_advance('M') - absolute_height`.
    pub calculated_baseline: i32,
    /// Whether `detected_baseline` came from a caller-forced origin.
    pub origin_forced: bool,
    /// Bitmap size of 'M'.
    pub em: PixelSize,
    /// Bitmap size of 'x'.
    pub ex: PixelSize,
    /// Bitmap size of 'W'.
    pub we: PixelSize,
}

impl FontMetrics {
    /// Creates zeroed metrics for a font name and size.
    pub fn new(name: impl Into<String>, size: RasterSize) -> Self {
        Self {
            name: name.into(),
            size,
            cell: PixelSize::default(),
            absolute_height: 0,
            regular_height: 0,
            max_ascent: 0,
            max_descent: 0,
            baseline: 0,
            detected_baseline: 0,
            calculated_baseline: 0,
            origin_forced: false,
            em: PixelSize::default(),
            ex: PixelSize::default(),
            we: PixelSize::default(),
        }
    }

    /// Total measured ink height (`max_ascent + max_descent`).
    pub fn ink_height(&self) -> i32 {
        self.max_ascent + self.max_descent
    }

    /// Cell height as a signed value for offset arithmetic.
    pub fn cell_height(&self) -> i32 {
        self.cell.height as i32
    }

    /// Cell width as a signed value for offset arithmetic.
    pub fn cell_width(&self) -> i32 {
        self.cell.width as i32
    }

    /// Last cell row that lies on or above the origin line.
    pub fn baseline_row(&self) -> i32 {
        self.cell_height() + self.baseline - 1
    }

    /// Default output basename: `<name>_<points>_<w>x<h>`.
    pub fn default_basename(&self) -> String {
        format!(
            "{}_{}_{}x{}",
            self.name, self.size.points, self.cell.width, self.cell.height
        )
    }
}

/// Derives a font identifier from a font file path.
///
/// The directory and the extension are stripped; whitespace and ASCII
/// punctuation become underscores.
///
/// ```
/// use fontmatrix_spec::font_name_from_path;
/// use std::path::Path;
///
/// assert_eq!(font_name_from_path(Path::new("/usr/share/PT Mono-55FT.ttf")), "PT_Mono_55FT");
/// ```
pub fn font_name_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.chars()
        .map(|c| {
            if c.is_whitespace() || c.is_ascii_punctuation() {
                '_'
            } else {
                c
            }
        })
        .collect()
}
