//! In-memory viewer: named layers, mesh primitives and camera state.
//!
//! [`SceneViewer`] does not rasterize anything. It keeps exactly what a
//! GPU viewer would be asked to draw, which makes the binder's behaviour
//! observable and lets a renderer consume the layers later.

use glam::Vec3;

use super::{
    CustomMesh, RenderMode, Rgba, Sphere, Tube, Viewer, ViewerFactory,
};
use crate::options::{Quality, ViewerOptions};
use crate::pdb::Structure;
use crate::secondary_structure::SsKind;

/// Vertical field of view used for auto-zoom, in degrees.
const FOV_Y_DEGREES: f32 = 45.0;
/// Extra room around the bounding sphere after auto-zoom.
const ZOOM_PADDING: f32 = 1.1;

/// Summary of a structure drawn into a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureLayer {
    /// Depiction style.
    pub mode: RenderMode,
    /// Uniform colour.
    pub color: Rgba,
    /// Atoms drawn.
    pub atoms: usize,
    /// Residues drawn.
    pub residues: usize,
    /// Residues assigned to helices.
    pub helix_residues: usize,
    /// Residues assigned to sheets.
    pub sheet_residues: usize,
}

/// What a layer holds.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerContent {
    /// A structure drawn with a render mode.
    Structure(StructureLayer),
    /// Custom primitives.
    Mesh(CustomMesh),
}

/// One named layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Layer name.
    pub name: String,
    /// Whether the layer is drawn.
    pub visible: bool,
    /// Layer payload.
    pub content: LayerContent,
}

impl Layer {
    /// The mesh payload, if this is a mesh layer.
    #[must_use]
    pub fn mesh(&self) -> Option<&CustomMesh> {
        match &self.content {
            LayerContent::Mesh(mesh) => Some(mesh),
            LayerContent::Structure(_) => None,
        }
    }

    /// The structure payload, if this is a structure layer.
    #[must_use]
    pub fn structure(&self) -> Option<&StructureLayer> {
        match &self.content {
            LayerContent::Structure(s) => Some(s),
            LayerContent::Mesh(_) => None,
        }
    }
}

/// Camera looking at `center` from `distance` Angstroms away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Point the camera orbits.
    pub center: Vec3,
    /// Distance from the center.
    pub distance: f32,
    /// Bounding radius of the last centered structure.
    pub focus_radius: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            distance: 50.0,
            focus_radius: 0.0,
        }
    }
}

/// Layered in-memory viewer.
#[derive(Debug, Clone)]
pub struct SceneViewer {
    width: u32,
    height: u32,
    antialias: bool,
    quality: Quality,
    background: String,
    fog: bool,
    layers: Vec<Layer>,
    camera: Camera,
    redraws: u32,
}

impl SceneViewer {
    /// Create an empty viewer sized from `options`.
    #[must_use]
    pub fn new(options: &ViewerOptions) -> Self {
        Self {
            width: options.width,
            height: options.height,
            antialias: options.antialias,
            quality: options.quality,
            background: options.background.clone(),
            fog: true,
            layers: Vec::new(),
            camera: Camera::default(),
            redraws: 0,
        }
    }

    /// Viewport size in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether edges are antialiased.
    #[must_use]
    pub fn antialias(&self) -> bool {
        self.antialias
    }

    /// Geometry quality requested at creation.
    #[must_use]
    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Background colour as configured.
    #[must_use]
    pub fn background(&self) -> &str {
        &self.background
    }

    /// Whether depth fog is on.
    #[must_use]
    pub fn fog(&self) -> bool {
        self.fog
    }

    /// Layers in insertion order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Look up a layer by name.
    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Number of redraw requests received.
    #[must_use]
    pub fn redraws(&self) -> u32 {
        self.redraws
    }

    fn layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.name == name)
    }

    fn mesh_mut(&mut self, name: &str) -> Option<&mut CustomMesh> {
        let idx = match self.layers.iter().position(|l| l.name == name) {
            Some(idx) => idx,
            None => {
                self.layers.push(Layer {
                    name: name.to_owned(),
                    visible: true,
                    content: LayerContent::Mesh(CustomMesh::default()),
                });
                self.layers.len() - 1
            }
        };
        let layer = &mut self.layers[idx];
        if !matches!(layer.content, LayerContent::Mesh(_)) {
            log::warn!("layer '{name}' replaced by a custom mesh");
            layer.content = LayerContent::Mesh(CustomMesh::default());
        }
        match &mut layer.content {
            LayerContent::Mesh(mesh) => Some(mesh),
            LayerContent::Structure(_) => None,
        }
    }

    fn set_visible(&mut self, name: &str, visible: bool) {
        match self.layer_mut(name) {
            Some(layer) => layer.visible = visible,
            None => log::debug!("no layer '{name}' to toggle"),
        }
    }
}

impl Viewer for SceneViewer {
    fn set_fog(&mut self, enabled: bool) {
        self.fog = enabled;
    }

    fn render_as(
        &mut self,
        name: &str,
        structure: &Structure,
        mode: RenderMode,
        color: Rgba,
    ) {
        let mut helix_residues = 0;
        let mut sheet_residues = 0;
        for residue in structure.residues() {
            match residue.ss {
                SsKind::Helix => helix_residues += 1,
                SsKind::Sheet => sheet_residues += 1,
                SsKind::Coil => {}
            }
        }
        let content = LayerContent::Structure(StructureLayer {
            mode,
            color,
            atoms: structure.atom_count(),
            residues: structure.residue_count(),
            helix_residues,
            sheet_residues,
        });
        match self.layer_mut(name) {
            Some(layer) => {
                layer.content = content;
                layer.visible = true;
            }
            None => self.layers.push(Layer {
                name: name.to_owned(),
                visible: true,
                content,
            }),
        }
    }

    fn add_tube(&mut self, mesh: &str, tube: Tube) {
        if let Some(mesh) = self.mesh_mut(mesh) {
            mesh.tubes.push(tube);
        }
    }

    fn add_sphere(&mut self, mesh: &str, sphere: Sphere) {
        if let Some(mesh) = self.mesh_mut(mesh) {
            mesh.spheres.push(sphere);
        }
    }

    fn remove(&mut self, name: &str) {
        self.layers.retain(|l| l.name != name);
    }

    fn show(&mut self, name: &str) {
        self.set_visible(name, true);
    }

    fn hide(&mut self, name: &str) {
        self.set_visible(name, false);
    }

    fn contains(&self, name: &str) -> bool {
        self.layer(name).is_some()
    }

    fn center_on(&mut self, structure: &Structure) {
        if let Some(center) = structure.centroid() {
            self.camera.center = center;
            self.camera.focus_radius = structure.bounding_radius(center);
        }
    }

    fn auto_zoom(&mut self) {
        let half_fov = FOV_Y_DEGREES.to_radians() / 2.0;
        let radius = self.camera.focus_radius.max(1.0);
        self.camera.distance = radius * ZOOM_PADDING / half_fov.tan();
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}

/// Hands out [`SceneViewer`]s and counts them.
#[derive(Debug, Clone, Default)]
pub struct SceneFactory {
    created: usize,
}

impl SceneFactory {
    /// Number of viewers created so far.
    #[must_use]
    pub fn created(&self) -> usize {
        self.created
    }
}

impl ViewerFactory for SceneFactory {
    type Viewer = SceneViewer;

    fn create(&mut self, options: &ViewerOptions) -> SceneViewer {
        self.created += 1;
        SceneViewer::new(options)
    }
}
