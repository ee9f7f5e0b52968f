//! Page formats, orientation and margins.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

/// Points per millimetre.
const MM: f32 = 72.0 / 25.4;

/// Supported paper formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    #[default]
    A4,
    A5,
    Letter,
    /// reMarkable tablet screen (1404x1872 px at 226 dpi)
    Remarkable,
}

impl PageFormat {
    /// Portrait (width, height) in points.
    pub fn portrait_size(self) -> (f32, f32) {
        match self {
            PageFormat::A4 => (210.0 * MM, 297.0 * MM),
            PageFormat::A5 => (148.0 * MM, 210.0 * MM),
            PageFormat::Letter => (612.0, 792.0),
            PageFormat::Remarkable => (1404.0 * 72.0 / 226.0, 1872.0 * 72.0 / 226.0),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            PageFormat::A4 => "a4",
            PageFormat::A5 => "a5",
            PageFormat::Letter => "letter",
            PageFormat::Remarkable => "remarkable",
        }
    }
}

impl fmt::Display for PageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageFormat {
    type Err = CalendarError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Ok(PageFormat::A4),
            "a5" => Ok(PageFormat::A5),
            "letter" => Ok(PageFormat::Letter),
            "remarkable" | "rm" => Ok(PageFormat::Remarkable),
            other => Err(CalendarError::invalid_input("format").with_reason(format!(
                "unknown page format '{other}'; expected a4, a5, letter or remarkable"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    /// Same margin on every side.
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(36.0)
    }
}

/// Printable rectangle in PDF coordinates (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentBox {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl ContentBox {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }
}

/// Physical page setup for generated documents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub format: PageFormat,
    pub orientation: Orientation,
    pub margins: Margins,
}

impl LayoutConfig {
    /// Starts a builder with A4 portrait and 36pt margins.
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::new()
    }

    /// Page (width, height) in points after applying orientation.
    pub fn page_size(&self) -> (f32, f32) {
        let (width, height) = self.format.portrait_size();
        match self.orientation {
            Orientation::Portrait => (width, height),
            Orientation::Landscape => (height, width),
        }
    }

    /// Printable area inside the margins.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::Layout` when the margins leave no printable
    /// area.
    pub fn content_box(&self) -> Result<ContentBox> {
        let (width, height) = self.page_size();
        let margins = self.margins;
        if [margins.top, margins.right, margins.bottom, margins.left]
            .iter()
            .any(|m| !m.is_finite() || *m < 0.0)
        {
            return Err(CalendarError::layout("margins must be finite and non-negative"));
        }
        let content = ContentBox {
            left: margins.left,
            right: width - margins.right,
            top: height - margins.top,
            bottom: margins.bottom,
        };
        if content.width() <= 0.0 || content.height() <= 0.0 {
            return Err(CalendarError::layout(format!(
                "margins leave no printable area on a {}x{} page",
                width.round(),
                height.round()
            )));
        }
        Ok(content)
    }
}

/// Builder for [`LayoutConfig`].
#[derive(Debug, Clone, Default)]
pub struct LayoutConfigBuilder {
    config: LayoutConfig,
}

impl LayoutConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: PageFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.config.orientation = orientation;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.config.margins = margins;
        self
    }

    /// Builds the configuration, checking the margins leave room to print.
    pub fn build(self) -> Result<LayoutConfig> {
        self.config.content_box()?;
        Ok(self.config)
    }
}
