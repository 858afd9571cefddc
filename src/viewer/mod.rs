//! The render seam between the binder and a 3D molecular viewer.
//!
//! A viewer keeps named layers: structure layers drawn with a
//! [`RenderMode`], and custom meshes collecting tubes and spheres. The
//! binder addresses layers only by name, so any viewer that can add,
//! remove, show and hide named layers can sit behind [`Viewer`].

mod mesh;
mod scene;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use mesh::{CustomMesh, Sphere, Tube};
pub use scene::{
    Camera, Layer, LayerContent, SceneFactory, SceneViewer, StructureLayer,
};

use crate::options::ViewerOptions;
use crate::pdb::Structure;

/// RGBA colour, components in `0.0..=1.0`.
pub type Rgba = [f32; 4];

/// Depiction style of a structure layer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum RenderMode {
    /// Secondary-structure cartoon.
    #[default]
    Cartoon,
    /// Smooth line trace.
    Sline,
    /// Bonds as lines.
    Lines,
    /// Cα trace as cylinders.
    Trace,
    /// Cα trace as lines.
    LineTrace,
    /// Smooth tube through the backbone.
    Tube,
    /// Space-filling spheres.
    Spheres,
    /// Balls and sticks.
    BallsAndSticks,
}

impl RenderMode {
    /// Every mode, in the order offered to the user.
    pub const ALL: [Self; 8] = [
        Self::Cartoon,
        Self::Sline,
        Self::Lines,
        Self::Trace,
        Self::LineTrace,
        Self::Tube,
        Self::Spheres,
        Self::BallsAndSticks,
    ];

    /// Raw mode name understood by the viewer.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cartoon => "cartoon",
            Self::Sline => "sline",
            Self::Lines => "lines",
            Self::Trace => "trace",
            Self::LineTrace => "lineTrace",
            Self::Tube => "tube",
            Self::Spheres => "spheres",
            Self::BallsAndSticks => "ballsAndSticks",
        }
    }

    /// Parse a raw mode name.
    #[must_use]
    pub fn from_raw(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == raw)
    }
}

/// A 3D viewer bound to one display container.
pub trait Viewer {
    /// Enable or disable depth fog.
    fn set_fog(&mut self, enabled: bool);

    /// Draw `structure` as layer `name` using `mode` and a uniform colour.
    fn render_as(
        &mut self,
        name: &str,
        structure: &Structure,
        mode: RenderMode,
        color: Rgba,
    );

    /// Append a tube to the custom mesh `mesh`, creating it if needed.
    fn add_tube(&mut self, mesh: &str, tube: Tube);

    /// Append a sphere to the custom mesh `mesh`, creating it if needed.
    fn add_sphere(&mut self, mesh: &str, sphere: Sphere);

    /// Remove layer `name`.
    fn remove(&mut self, name: &str);

    /// Make layer `name` visible.
    fn show(&mut self, name: &str);

    /// Hide layer `name` without discarding it.
    fn hide(&mut self, name: &str);

    /// Whether a layer called `name` exists.
    fn contains(&self, name: &str) -> bool;

    /// Point the camera at the center of `structure`.
    fn center_on(&mut self, structure: &Structure);

    /// Move the camera so the centered structure fills the view.
    fn auto_zoom(&mut self);

    /// Ask for the next frame to be drawn.
    fn request_redraw(&mut self);
}

/// Creates fresh viewers sized for the display container.
pub trait ViewerFactory {
    /// The viewer type produced.
    type Viewer: Viewer;

    /// Build a new viewer.
    fn create(&mut self, options: &ViewerOptions) -> Self::Viewer;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_names_round_trip() {
        for mode in RenderMode::ALL {
            assert_eq!(RenderMode::from_raw(mode.as_str()), Some(mode));
        }
        assert_eq!(RenderMode::from_raw("ribbon"), None);
    }

    #[test]
    fn serde_uses_raw_names() {
        let json = serde_json::to_string(&RenderMode::BallsAndSticks).unwrap();
        assert_eq!(json, "\"ballsAndSticks\"");
    }
}
