use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Rendering quality requested from the viewer.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// Fastest, coarse geometry.
    Low,
    /// Balanced.
    Medium,
    /// Finest geometry.
    #[default]
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Viewer", inline)]
#[serde(default)]
/// Settings for each freshly created viewer.
pub struct ViewerOptions {
    /// Container width in pixels.
    #[schemars(title = "Width", range(min = 64, max = 8192))]
    pub width: u32,
    /// Container height in pixels.
    #[schemars(title = "Height", range(min = 64, max = 8192))]
    pub height: u32,
    /// Whether edges are antialiased.
    #[schemars(title = "Antialias")]
    pub antialias: bool,
    /// Geometry quality.
    #[schemars(title = "Quality")]
    pub quality: Quality,
    /// Background colour as `#rrggbb`.
    #[schemars(title = "Background")]
    pub background: String,
    /// Whether depth fog is drawn.
    #[schemars(title = "Fog")]
    pub fog: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            antialias: true,
            quality: Quality::High,
            background: "#313a41".to_owned(),
            fog: false,
        }
    }
}
