use crate::error::AssemblyError;
use estimate_types::{A4, PageGeometry, Size};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Layout constants and output settings for an [`Assembler`](super::Assembler).
///
/// Every field has a default, so a JSON config only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssemblerConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    /// Vertical advance after each text line, and the gap below each image.
    pub line_height: f32,
    pub font_size: f32,
    /// Images are scaled down to fit a square of this side.
    pub max_image_dimension: f32,
    /// JPEG re-encode quality in `(0, 1]`.
    pub image_quality: f32,
    /// Containers nested deeper than this are printed as `[Truncated]`.
    pub max_depth: usize,
    /// Where finished documents are written. Defaults to the system temp dir.
    pub output_dir: Option<PathBuf>,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            page_width: A4.width,
            page_height: A4.height,
            margin: 40.0,
            line_height: 20.0,
            font_size: 12.0,
            max_image_dimension: 200.0,
            image_quality: 0.2,
            max_depth: 16,
            output_dir: None,
        }
    }
}

impl AssemblerConfig {
    pub fn from_json(json: &str) -> Result<Self, AssemblyError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AssemblyError::Config(format!("unreadable config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::new(Size::new(self.page_width, self.page_height), self.margin)
    }

    /// Quality on the 1-100 scale the JPEG encoder takes.
    pub fn jpeg_quality(&self) -> u8 {
        (self.image_quality * 100.0).round().clamp(1.0, 100.0) as u8
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Checks that a text line and the largest image both fit on an empty page.
    pub fn validate(&self) -> Result<(), AssemblyError> {
        let drawable_height = self.page_height - 2.0 * self.margin;
        let drawable_width = self.page_width - 2.0 * self.margin;
        if !(self.margin >= 0.0 && drawable_width > 0.0 && drawable_height > 0.0) {
            return Err(AssemblyError::Config(format!(
                "margin {} leaves no drawable area on a {}x{} page",
                self.margin, self.page_width, self.page_height
            )));
        }
        if !(self.line_height > 0.0 && self.line_height <= drawable_height) {
            return Err(AssemblyError::Config(format!(
                "line height {} must be positive and fit the drawable height {}",
                self.line_height, drawable_height
            )));
        }
        if !(self.font_size > 0.0) {
            return Err(AssemblyError::Config("font size must be positive".into()));
        }
        if !(self.max_image_dimension > 0.0
            && self.max_image_dimension <= drawable_height
            && self.max_image_dimension <= drawable_width)
        {
            return Err(AssemblyError::Config(format!(
                "max image dimension {} must be positive and fit the drawable area",
                self.max_image_dimension
            )));
        }
        if !(self.image_quality > 0.0 && self.image_quality <= 1.0) {
            return Err(AssemblyError::Config(format!(
                "image quality {} must be in (0, 1]",
                self.image_quality
            )));
        }
        if self.max_depth == 0 {
            return Err(AssemblyError::Config("max depth must be at least 1".into()));
        }
        Ok(())
    }
}
