//! Validation context: the color palette and the image allow-lists.
//!
//! Everything the validators compare against is carried here explicitly, so
//! tests run against fake folders and palettes instead of ambient constants.
//! The CLI layer fills the image lists by scanning the configured folders.

use serde::{Deserialize, Serialize};

use crate::error::{MarqueeError, Result};

/// Colors the device firmware can render. Order matters only for display.
pub const DEFAULT_COLORS: [&str; 18] = [
    "MINT",
    "BUGAMBILIA",
    "LILAC",
    "RED",
    "GREEN",
    "BLUE",
    "ORANGE",
    "YELLOW",
    "CYAN",
    "PURPLE",
    "PINK",
    "AQUA",
    "WHITE",
    "BROWN",
    "BEIGE",
    "DARK_GRAY",
    "GRAY",
    "DIMMEST_WHITE",
];

/// Which image folder a reference must resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Events,
    Schedules,
}

/// The allow-lists validators check membership against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    colors: Vec<String>,
    event_images: Vec<String>,
    schedule_images: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            event_images: Vec::new(),
            schedule_images: Vec::new(),
        }
    }
}

impl Catalog {
    /// A catalog with explicit contents, for callers that scanned folders or
    /// loaded a palette override.
    pub fn new(colors: Vec<String>, event_images: Vec<String>, schedule_images: Vec<String>) -> Self {
        Catalog {
            colors,
            event_images,
            schedule_images,
        }
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn images(&self, kind: ImageKind) -> &[String] {
        match kind {
            ImageKind::Events => &self.event_images,
            ImageKind::Schedules => &self.schedule_images,
        }
    }

    /// Check a color name against the palette, case-insensitively.
    ///
    /// # Errors
    /// [`MarqueeError::NotFound`] when the color is not in the palette.
    pub fn check_color(&self, color: &str) -> Result<()> {
        let upper = color.to_uppercase();
        if self.colors.iter().any(|c| *c == upper) {
            Ok(())
        } else {
            Err(MarqueeError::NotFound(format!(
                "color '{}' (valid: {})",
                color,
                self.colors.join(", ")
            )))
        }
    }

    /// Check an image reference against the allow-list for `kind`.
    ///
    /// When the allow-list is empty (the folder could not be scanned), fall
    /// back to requiring a `.bmp` suffix so offline validation still catches
    /// the obvious mistakes.
    ///
    /// # Errors
    /// [`MarqueeError::NotFound`] when the image is not in a non-empty list,
    /// [`MarqueeError::Format`] when the fallback suffix check fails.
    pub fn check_image(&self, kind: ImageKind, image: &str) -> Result<()> {
        let list = self.images(kind);
        if list.is_empty() {
            if image.ends_with(".bmp") {
                return Ok(());
            }
            return Err(MarqueeError::Format(format!(
                "image '{}' must be a .bmp file",
                image
            )));
        }
        if list.iter().any(|i| i == image) {
            Ok(())
        } else {
            Err(MarqueeError::NotFound(format!("image '{}'", image)))
        }
    }
}
