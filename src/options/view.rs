use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::viewer::RenderMode;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "View", inline)]
#[serde(default)]
/// Toggles of the project view. The binder keeps the live copy.
#[allow(clippy::struct_excessive_bools)]
pub struct ViewOptions {
    /// Whether membrane spheres are shown.
    #[schemars(title = "Show Membrane")]
    pub render_membrane: bool,
    /// Whether contact tubes are shown.
    #[schemars(title = "Show Contacts")]
    pub render_contacts: bool,
    /// Whether the raw PDB text panel is shown.
    #[schemars(title = "Show PDB Text")]
    pub render_pdb: bool,
    /// Backbone depiction.
    #[schemars(title = "Render Mode")]
    pub render_mode: RenderMode,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            render_membrane: true,
            render_contacts: true,
            render_pdb: false,
            render_mode: RenderMode::Cartoon,
        }
    }
}
