//! Server-managed constants and their display form.
//!
//! `GET /rest/settings/` returns the backend's enum constants as raw
//! upper-snake-case strings. They are normalized once into
//! [`DisplayOption`]s: a human label for the UI, a stable index for
//! selection, and the raw string, which stays the only server key.

mod labels;

use serde::{Deserialize, Serialize};

pub use labels::{
    amino_acid_group, helix_label, one_letter_code, replace_underscores,
    split_at_uppercase,
};

use crate::viewer::RenderMode;

/// One selectable constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOption {
    /// Human-readable label.
    pub text: String,
    /// Position in the normalized set. Used for UI selection only.
    pub index: usize,
    /// The raw constant as sent by the server.
    pub raw: String,
}

/// Raw settings payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Computable features.
    pub features: Vec<String>,
    /// Reconstruction levels, coarsest first.
    pub reconstruction_levels: Vec<String>,
    /// Secondary structure classes.
    pub secondary_structures: Vec<String>,
    /// Membrane topologies.
    pub topologies: Vec<String>,
    /// Sequence motif types.
    pub motif_types: Vec<String>,
    /// Residue interaction types.
    pub interaction_types: Vec<String>,
}

/// Normalized constants held by the application state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Constants {
    /// Viewer render modes, defined client-side.
    pub render_modes: Vec<DisplayOption>,
    /// Computable features.
    pub features: Vec<DisplayOption>,
    /// Reconstruction levels.
    pub reconstruction_levels: Vec<DisplayOption>,
    /// Secondary structure classes.
    pub secondary_structures: Vec<DisplayOption>,
    /// Membrane topologies.
    pub topologies: Vec<DisplayOption>,
    /// Sequence motif types.
    pub motif_types: Vec<DisplayOption>,
    /// Residue interaction types.
    pub interaction_types: Vec<DisplayOption>,
}

impl Constants {
    /// Normalize every set of `settings` and add the render modes.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            render_modes: render_mode_options(),
            features: normalize_constants(&settings.features),
            reconstruction_levels: normalize_constants(
                &settings.reconstruction_levels,
            ),
            secondary_structures: normalize_constants(
                &settings.secondary_structures,
            ),
            topologies: normalize_constants(&settings.topologies),
            motif_types: normalize_constants(&settings.motif_types),
            interaction_types: normalize_constants(&settings.interaction_types),
        }
    }
}

fn normalize_with<S, F>(raw: &[S], label: F) -> Vec<DisplayOption>
where
    S: AsRef<str>,
    F: Fn(&str) -> String,
{
    raw.iter()
        .enumerate()
        .map(|(index, entry)| DisplayOption {
            text: label(entry.as_ref()),
            index,
            raw: entry.as_ref().to_owned(),
        })
        .collect()
}

/// Normalize upper-snake-case server constants.
///
/// `MEMBRANE_TOPOLOGY` becomes `membrane topology`. Order and count are
/// preserved.
pub fn normalize_constants<S: AsRef<str>>(raw: &[S]) -> Vec<DisplayOption> {
    normalize_with(raw, |entry| replace_underscores(&entry.to_lowercase()))
}

/// Normalize camel-case render mode names (`lineTrace` → `line trace`).
pub fn normalize_render_modes<S: AsRef<str>>(raw: &[S]) -> Vec<DisplayOption> {
    normalize_with(raw, split_at_uppercase)
}

/// Display options for every [`RenderMode`], in viewer order.
#[must_use]
pub fn render_mode_options() -> Vec<DisplayOption> {
    let raw: Vec<&str> =
        RenderMode::ALL.iter().copied().map(RenderMode::as_str).collect();
    normalize_render_modes(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_keep_order_and_raw_value() {
        let raw = ["SECONDARY_STRUCTURE", "ACCESSIBLE_SURFACE_AREA", "NONE"];
        let options = normalize_constants(&raw);
        assert_eq!(options.len(), 3);
        for (i, option) in options.iter().enumerate() {
            assert_eq!(option.index, i);
            assert_eq!(option.raw, raw[i]);
        }
        assert_eq!(options[0].text, "secondary structure");
        assert_eq!(options[1].text, "accessible surface area");
        assert_eq!(options[2].text, "none");
    }

    #[test]
    fn normalization_is_deterministic() {
        let raw = ["MEMBRANE_TOPOLOGY", "MEMBRANE_TOPOLOGY"];
        let options = normalize_constants(&raw);
        assert_eq!(options[0].text, options[1].text);
        assert_eq!(options[1].index, 1);
    }

    #[test]
    fn empty_input_yields_no_options() {
        let raw: [&str; 0] = [];
        assert!(normalize_constants(&raw).is_empty());
        assert!(Constants::from_settings(&Settings::default())
            .features
            .is_empty());
    }

    #[test]
    fn render_modes_split_camel_case() {
        let modes = render_mode_options();
        let texts: Vec<&str> = modes.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(
            texts,
            [
                "cartoon",
                "sline",
                "lines",
                "trace",
                "line trace",
                "tube",
                "spheres",
                "balls and sticks"
            ]
        );
        assert_eq!(modes[7].raw, "ballsAndSticks");
    }

    #[test]
    fn settings_payload_tolerates_missing_sets() {
        let settings: Settings =
            serde_json::from_str(r#"{"features": ["INTERACTIONS"]}"#).unwrap();
        let constants = Constants::from_settings(&settings);
        assert_eq!(constants.features[0].text, "interactions");
        assert!(constants.topologies.is_empty());
        assert_eq!(constants.render_modes.len(), RenderMode::ALL.len());
    }
}
