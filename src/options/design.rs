use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::viewer::Rgba;

/// `#454b52`.
const SLATE: Rgba = [69.0 / 255.0, 75.0 / 255.0, 82.0 / 255.0, 1.0];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Design", inline)]
#[serde(default)]
/// Colours and primitive sizes of the project view.
pub struct DesignOptions {
    /// Default UI colour as `#rrggbb`.
    #[schemars(title = "Default Color")]
    pub default_color: String,
    /// Uniform colour of the backbone layer as `#rrggbb`.
    #[schemars(title = "Backbone Color")]
    pub darkened_color: String,
    /// Contact tube colour as `#rrggbb`.
    #[schemars(title = "Contact Color")]
    pub contact_color: String,
    /// Contact tube radius in Angstroms.
    #[schemars(title = "Contact Radius", range(min = 0.05, max = 1.0), extend("step" = 0.05))]
    pub contact_radius: f32,
    /// Membrane sphere radius in Angstroms.
    #[schemars(title = "Membrane Radius", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub membrane_radius: f32,
    /// Membrane sphere colour (RGBA, 0-1).
    #[schemars(skip)]
    pub membrane_color: Rgba,
}

impl Default for DesignOptions {
    fn default() -> Self {
        Self {
            default_color: "#454b52".to_owned(),
            darkened_color: "#a9bcc1".to_owned(),
            contact_color: "#ff0000".to_owned(),
            contact_radius: 0.2,
            membrane_radius: 0.75,
            membrane_color: [1.0, 1.0, 1.0, 0.5],
        }
    }
}

impl DesignOptions {
    /// Default UI colour; slate grey when the configured value is not a
    /// colour.
    #[must_use]
    pub fn default_rgba(&self) -> Rgba {
        parse_hex_color(&self.default_color).unwrap_or(SLATE)
    }

    /// Backbone colour, falling back to [`Self::default_rgba`].
    #[must_use]
    pub fn backbone_rgba(&self) -> Rgba {
        parse_hex_color(&self.darkened_color).unwrap_or_else(|| self.default_rgba())
    }

    /// Contact tube colour; red when the configured value is not a colour.
    #[must_use]
    pub fn contact_rgba(&self) -> Rgba {
        parse_hex_color(&self.contact_color).unwrap_or([1.0, 0.0, 0.0, 1.0])
    }
}

/// Parse `#rrggbb` or `#rrggbbaa` into RGBA components.
#[must_use]
pub fn parse_hex_color(hex: &str) -> Option<Rgba> {
    let digits = hex.strip_prefix('#')?;
    if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|v| f32::from(v) / 255.0)
    };
    let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
    Some([channel(0)?, channel(2)?, channel(4)?, alpha])
}
