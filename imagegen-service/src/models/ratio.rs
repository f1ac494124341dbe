//! Aspect-ratio selection for generated images.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of aspect ratios the service accepts.
///
/// Every variant maps to one of the pixel-dimension strings the image
/// provider supports; the exhaustive matches below make a missing mapping a
/// compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Square,
    Landscape,
    Portrait,
}

#[derive(Debug, Error)]
#[error("Invalid ratio: {0} (available ratios: 1:1, 7:4, 4:7)")]
pub struct ParseRatioError(pub String);

impl AspectRatio {
    /// Pixel dimensions submitted to the image provider.
    pub fn size(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1024x1024",
            AspectRatio::Landscape => "1792x1024",
            AspectRatio::Portrait => "1024x1792",
        }
    }

    /// Wire tag accepted in requests.
    pub fn tag(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "7:4",
            AspectRatio::Portrait => "4:7",
        }
    }
}

impl FromStr for AspectRatio {
    type Err = ParseRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1:1" => Ok(AspectRatio::Square),
            "7:4" => Ok(AspectRatio::Landscape),
            "4:7" => Ok(AspectRatio::Portrait),
            other => Err(ParseRatioError(other.to_string())),
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
